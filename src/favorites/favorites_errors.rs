use thiserror::Error;

use crate::backend::BackendError;

/// Custom error type for favorite operations. Unlike quote listings, a
/// failed toggle is surfaced to the caller so the UI never renders a state
/// the backend did not confirm.
#[derive(Debug, Error)]
pub enum FavoriteError {
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

/// Result type for favorite operations
pub type Result<T> = std::result::Result<T, FavoriteError>;
