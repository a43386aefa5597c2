use async_trait::async_trait;

use super::favorites_errors::Result;
use crate::quotes::Quote;

#[async_trait]
pub trait FavoriteServiceTrait: Send + Sync {
    /// Flips the favorite status of (user, quote) against backend state and
    /// returns the confirmed new status. Safe to call repeatedly; at most
    /// one favorite record exists per pair at any time.
    async fn toggle_favorite(&self, quote_id: &str, user_id: &str) -> Result<bool>;

    /// All quotes the user has favorited, category flattened, favorite flag
    /// forced true.
    async fn get_favorite_quotes(&self, user_id: &str) -> Result<Vec<Quote>>;
}
