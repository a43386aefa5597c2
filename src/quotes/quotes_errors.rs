use thiserror::Error;

use crate::backend::BackendError;

/// Custom error type for quote listing operations. A failed fetch stays a
/// failure; it is never collapsed into an empty listing.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

/// Result type for quote operations
pub type Result<T> = std::result::Result<T, QuoteError>;
