use thiserror::Error;

use crate::quotes::QuoteError;
use crate::storage::StoreError;

#[derive(Debug, Error)]
pub enum DailyQuoteError {
    #[error("No quotes available to choose from")]
    NoQuotesAvailable,

    #[error("Quote listing failed: {0}")]
    Quotes(#[from] QuoteError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for daily quote operations
pub type Result<T> = std::result::Result<T, DailyQuoteError>;
