use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage engine error: {0}")]
    Engine(String),

    #[error("Store lock poisoned")]
    Poisoned,
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Engine(err.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Engine(err.to_string())
    }
}
