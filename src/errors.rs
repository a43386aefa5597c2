use thiserror::Error;

use crate::auth::AuthError;
use crate::backend::BackendError;
use crate::daily::DailyQuoteError;
use crate::favorites::FavoriteError;
use crate::notifications::NotificationError;
use crate::quotes::QuoteError;
use crate::sharing::ShareError;
use crate::storage::StoreError;

// Create a type alias for Result using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the QuoteVault core
#[derive(Error, Debug)]
pub enum Error {
    #[error("Backend operation failed: {0}")]
    Backend(#[from] BackendError),

    #[error("Local storage operation failed: {0}")]
    Store(#[from] StoreError),

    #[error("Quote operation failed: {0}")]
    Quote(#[from] QuoteError),

    #[error("Favorite operation failed: {0}")]
    Favorite(#[from] FavoriteError),

    #[error("Daily quote operation failed: {0}")]
    DailyQuote(#[from] DailyQuoteError),

    #[error("Notification operation failed: {0}")]
    Notification(#[from] NotificationError),

    #[error("Share operation failed: {0}")]
    Share(#[from] ShareError),

    #[error("Auth operation failed: {0}")]
    Auth(#[from] AuthError),
}
