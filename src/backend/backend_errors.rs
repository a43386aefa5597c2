use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Backend rejected the request ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Parsing error: {0}")]
    Parsing(String),
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        BackendError::Parsing(err.to_string())
    }
}
