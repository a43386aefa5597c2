use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use log::{debug, warn};
use serde_json::json;
use tokio::sync::Mutex;

use super::favorites_errors::Result;
use super::favorites_traits::FavoriteServiceTrait;
use crate::backend::{BackendClient, BackendError, Filter};
use crate::constants::{FAVORITES_TABLE, QUOTES_TABLE};
use crate::quotes::Quote;

/// Embedded select joining each favorite row to its quote and the quote's
/// category
const FAVORITE_COLUMNS: &str = "id,quote_id,\
    quotes(id,text,author,category,category_id,tags,is_public,user_id,created_at,\
    categories(id,name,color))";

pub struct FavoriteService {
    backend: Arc<dyn BackendClient>,
    /// One lock per (user, quote) pair. A rapid double-tap on the same
    /// heart must not interleave the existence check with the insert or
    /// delete.
    toggle_locks: DashMap<(String, String), Arc<Mutex<()>>>,
}

impl FavoriteService {
    pub fn new(backend: Arc<dyn BackendClient>) -> Self {
        FavoriteService {
            backend,
            toggle_locks: DashMap::new(),
        }
    }

    fn pair_lock(&self, user_id: &str, quote_id: &str) -> Arc<Mutex<()>> {
        self.toggle_locks
            .entry((user_id.to_string(), quote_id.to_string()))
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Drops the pair's lock entry once no toggle holds it, so the map
    /// tracks in-flight pairs instead of every pair ever touched. The shard
    /// lock taken by `remove_if` excludes a concurrent `pair_lock`, making
    /// the uniqueness check race-free.
    fn release_pair_lock(&self, user_id: &str, quote_id: &str) {
        self.toggle_locks.remove_if(
            &(user_id.to_string(), quote_id.to_string()),
            |_, lock| Arc::strong_count(lock) == 1,
        );
    }

    #[cfg(test)]
    pub(crate) fn in_flight_toggles(&self) -> usize {
        self.toggle_locks.len()
    }

    fn pair_filters(quote_id: &str, user_id: &str) -> [Filter; 2] {
        [Filter::eq("quote_id", quote_id), Filter::eq("user_id", user_id)]
    }

    /// Best-effort refresh of the cached flag on the quote row. The
    /// favorites relation stays authoritative; a failure here is logged and
    /// dropped.
    async fn update_denormalized_flag(&self, quote_id: &str, favorited: bool) {
        let patch = json!({ "is_favorite": favorited });
        if let Err(e) = self
            .backend
            .update(QUOTES_TABLE, patch, &[Filter::eq("id", quote_id)])
            .await
        {
            warn!("Failed to refresh is_favorite on quote {}: {}", quote_id, e);
        }
    }

    async fn toggle_locked(&self, quote_id: &str, user_id: &str) -> Result<bool> {
        let existing = self
            .backend
            .select(FAVORITES_TABLE, "id", &Self::pair_filters(quote_id, user_id), None)
            .await?;

        if existing.is_empty() {
            let record = json!({ "quote_id": quote_id, "user_id": user_id });
            match self.backend.insert(FAVORITES_TABLE, record).await {
                Ok(_) => {}
                // Lost a race against another session or device; the record
                // exists, which is the state a favorite request wants.
                Err(BackendError::UniqueViolation(detail)) => {
                    debug!(
                        "Favorite already present for user {} quote {}: {}",
                        user_id, quote_id, detail
                    );
                }
                Err(e) => return Err(e.into()),
            }
            self.update_denormalized_flag(quote_id, true).await;
            Ok(true)
        } else {
            self.backend
                .delete(FAVORITES_TABLE, &Self::pair_filters(quote_id, user_id))
                .await?;
            self.update_denormalized_flag(quote_id, false).await;
            Ok(false)
        }
    }
}

#[async_trait]
impl FavoriteServiceTrait for FavoriteService {
    async fn toggle_favorite(&self, quote_id: &str, user_id: &str) -> Result<bool> {
        let lock = self.pair_lock(user_id, quote_id);
        let result = {
            let _guard = lock.lock().await;
            self.toggle_locked(quote_id, user_id).await
        };
        drop(lock);
        self.release_pair_lock(user_id, quote_id);
        result
    }

    async fn get_favorite_quotes(&self, user_id: &str) -> Result<Vec<Quote>> {
        let rows = self
            .backend
            .select(
                FAVORITES_TABLE,
                FAVORITE_COLUMNS,
                &[Filter::eq("user_id", user_id)],
                None,
            )
            .await?;

        let mut quotes = Vec::with_capacity(rows.len());
        for row in &rows {
            match Quote::from_record(&row["quotes"]) {
                Some(mut quote) => {
                    quote.is_favorite = true;
                    quotes.push(quote);
                }
                // Favorite pointing at a deleted quote; skip it
                None => warn!("Favorite row {} has no resolvable quote", row["id"]),
            }
        }
        Ok(quotes)
    }
}
