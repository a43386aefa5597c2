use thiserror::Error;

use crate::backend::BackendError;
use crate::storage::StoreError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Backend error: {0}")]
    Backend(BackendError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl From<BackendError> for AuthError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::InvalidCredentials => AuthError::InvalidCredentials,
            other => AuthError::Backend(other),
        }
    }
}

/// Result type for auth operations
pub type Result<T> = std::result::Result<T, AuthError>;
