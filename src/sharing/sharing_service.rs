use async_trait::async_trait;
use log::error;
use thiserror::Error;

use crate::quotes::Quote;

pub const SHARE_DIALOG_TITLE: &str = "Share this quote";

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("Share surface error: {0}")]
    Surface(String),
}

/// Native share affordance of the platform; receives the already formatted
/// message
#[async_trait]
pub trait ShareSurface: Send + Sync {
    async fn share(&self, message: &str, dialog_title: &str) -> Result<(), ShareError>;
}

/// Quote text quoted on its own line, attribution below, app signature last
pub fn format_share_message(quote: &Quote) -> String {
    format!(
        "\"{}\"\n\n\u{2014} {}\n\nShared from QuoteVault App",
        quote.text, quote.author
    )
}

pub async fn share_quote(surface: &dyn ShareSurface, quote: &Quote) -> Result<(), ShareError> {
    surface
        .share(&format_share_message(quote), SHARE_DIALOG_TITLE)
        .await
        .map_err(|e| {
            error!("Failed to share quote {}: {}", quote.id, e);
            e
        })
}
