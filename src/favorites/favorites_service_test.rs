use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::backend::{BackendClient, BackendError, Filter, MemoryBackend, OrderBy};
use crate::constants::{FAVORITES_TABLE, QUOTES_TABLE};
use crate::favorites::favorites_service::FavoriteService;
use crate::favorites::favorites_traits::FavoriteServiceTrait;

const USER: &str = "u1";

#[tokio::test]
async fn toggle_twice_flips_state_and_leaves_no_record() {
    let backend = Arc::new(MemoryBackend::with_demo_data());
    let service = FavoriteService::new(backend.clone());

    assert!(service.toggle_favorite("quote-1", USER).await.unwrap());
    assert_eq!(backend.rows(FAVORITES_TABLE).len(), 1);

    assert!(!service.toggle_favorite("quote-1", USER).await.unwrap());
    assert!(backend.rows(FAVORITES_TABLE).is_empty());
}

#[tokio::test]
async fn favorite_updates_denormalized_flag_best_effort() {
    let backend = Arc::new(MemoryBackend::with_demo_data());
    let service = FavoriteService::new(backend.clone());

    service.toggle_favorite("quote-2", USER).await.unwrap();
    let rows = backend
        .select(QUOTES_TABLE, "id,is_favorite", &[Filter::eq("id", "quote-2")], None)
        .await
        .unwrap();
    assert_eq!(rows[0]["is_favorite"], true);

    service.toggle_favorite("quote-2", USER).await.unwrap();
    let rows = backend
        .select(QUOTES_TABLE, "id,is_favorite", &[Filter::eq("id", "quote-2")], None)
        .await
        .unwrap();
    assert_eq!(rows[0]["is_favorite"], false);
}

#[tokio::test]
async fn get_favorite_quotes_flattens_category_and_forces_flag() {
    let backend = Arc::new(MemoryBackend::with_demo_data());
    let service = FavoriteService::new(backend.clone());

    service.toggle_favorite("quote-4", USER).await.unwrap();

    let favorites = service.get_favorite_quotes(USER).await.unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].id, "quote-4");
    assert!(favorites[0].is_favorite);
    // Flattened from the embedded category object
    assert_eq!(favorites[0].category.as_deref(), Some("Wisdom"));
    assert_eq!(favorites[0].category_id.as_deref(), Some("cat-wisdom"));
}

#[tokio::test]
async fn favorite_of_deleted_quote_is_skipped() {
    let backend = Arc::new(MemoryBackend::with_demo_data());
    let service = FavoriteService::new(backend.clone());

    service.toggle_favorite("quote-1", USER).await.unwrap();
    service.toggle_favorite("quote-2", USER).await.unwrap();
    backend
        .delete(QUOTES_TABLE, &[Filter::eq("id", "quote-1")])
        .await
        .unwrap();

    let favorites = service.get_favorite_quotes(USER).await.unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].id, "quote-2");
}

#[tokio::test]
async fn concurrent_toggles_on_one_pair_stay_consistent() {
    let backend = Arc::new(MemoryBackend::with_demo_data());
    let service = Arc::new(FavoriteService::new(backend.clone()));

    let first = {
        let service = service.clone();
        tokio::spawn(async move { service.toggle_favorite("quote-3", USER).await })
    };
    let second = {
        let service = service.clone();
        tokio::spawn(async move { service.toggle_favorite("quote-3", USER).await })
    };

    let mut results = vec![
        first.await.unwrap().unwrap(),
        second.await.unwrap().unwrap(),
    ];
    results.sort();

    // One call favorites, the other unfavorites; never two inserts
    assert_eq!(results, vec![false, true]);
    assert!(backend.rows(FAVORITES_TABLE).is_empty());
    assert_eq!(service.in_flight_toggles(), 0);
}

#[tokio::test]
async fn pair_locks_are_released_after_each_toggle() {
    let backend = Arc::new(MemoryBackend::with_demo_data());
    let service = FavoriteService::new(backend.clone());

    for quote_id in ["quote-1", "quote-2", "quote-3"] {
        service.toggle_favorite(quote_id, USER).await.unwrap();
    }
    service.toggle_favorite("quote-1", "u2").await.unwrap();

    // The lock map tracks in-flight toggles only; completed pairs leave
    // nothing behind
    assert_eq!(service.in_flight_toggles(), 0);
}

/// Delegates to a real backend but reports "no favorite rows" for the first
/// existence check, reproducing the window where another session inserts
/// between check and act.
struct RacingBackend {
    inner: Arc<MemoryBackend>,
    hide_once: AtomicBool,
}

#[async_trait]
impl BackendClient for RacingBackend {
    async fn select(
        &self,
        table: &str,
        columns: &str,
        filters: &[Filter],
        order: Option<OrderBy>,
    ) -> Result<Vec<Value>, BackendError> {
        if table == FAVORITES_TABLE && self.hide_once.swap(false, Ordering::SeqCst) {
            return Ok(Vec::new());
        }
        self.inner.select(table, columns, filters, order).await
    }

    async fn insert(&self, table: &str, record: Value) -> Result<Value, BackendError> {
        self.inner.insert(table, record).await
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> Result<(), BackendError> {
        self.inner.delete(table, filters).await
    }

    async fn update(
        &self,
        table: &str,
        patch: Value,
        filters: &[Filter],
    ) -> Result<(), BackendError> {
        self.inner.update(table, patch, filters).await
    }
}

#[tokio::test]
async fn unique_violation_on_insert_reads_as_already_favorited() {
    let inner = Arc::new(MemoryBackend::with_demo_data());
    inner
        .insert(FAVORITES_TABLE, json!({ "quote_id": "quote-5", "user_id": USER }))
        .await
        .unwrap();

    let backend = Arc::new(RacingBackend {
        inner: inner.clone(),
        hide_once: AtomicBool::new(true),
    });
    let service = FavoriteService::new(backend);

    // Check sees nothing, insert conflicts; the toggle still reports the
    // favorited state instead of an error.
    assert!(service.toggle_favorite("quote-5", USER).await.unwrap());
    assert_eq!(inner.rows(FAVORITES_TABLE).len(), 1);
}

/// Backend whose writes always fail
struct FailingBackend;

#[async_trait]
impl BackendClient for FailingBackend {
    async fn select(
        &self,
        _table: &str,
        _columns: &str,
        _filters: &[Filter],
        _order: Option<OrderBy>,
    ) -> Result<Vec<Value>, BackendError> {
        Ok(Vec::new())
    }

    async fn insert(&self, _table: &str, _record: Value) -> Result<Value, BackendError> {
        Err(BackendError::Api {
            status: 503,
            message: "service unavailable".to_string(),
        })
    }

    async fn delete(&self, _table: &str, _filters: &[Filter]) -> Result<(), BackendError> {
        Err(BackendError::Api {
            status: 503,
            message: "service unavailable".to_string(),
        })
    }

    async fn update(
        &self,
        _table: &str,
        _patch: Value,
        _filters: &[Filter],
    ) -> Result<(), BackendError> {
        Err(BackendError::Api {
            status: 503,
            message: "service unavailable".to_string(),
        })
    }
}

#[tokio::test]
async fn insert_failure_propagates_to_caller() {
    let service = FavoriteService::new(Arc::new(FailingBackend));
    assert!(service.toggle_favorite("quote-1", USER).await.is_err());
}
