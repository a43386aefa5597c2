use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;

use crate::backend::MemoryBackend;
use crate::constants::QUOTES_TABLE;
use crate::daily::daily_errors::DailyQuoteError;
use crate::daily::daily_quote_service::DailyQuoteService;
use crate::quotes::{QuoteRepository, QuoteScope};
use crate::storage::{LocalStore, MemoryStore, StoreError};

fn service_with_demo_data() -> (Arc<MemoryStore>, DailyQuoteService) {
    let backend = Arc::new(MemoryBackend::with_demo_data());
    let store = Arc::new(MemoryStore::new());
    let service = DailyQuoteService::new(
        Arc::new(QuoteRepository::new(backend)),
        store.clone(),
    );
    (store, service)
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[tokio::test]
async fn same_date_resolves_to_the_same_quote() {
    let (_store, service) = service_with_demo_data();
    let day = date("2025-08-23");

    let first = service.quote_for_date(&QuoteScope::Public, day).await.unwrap();
    let second = service.quote_for_date(&QuoteScope::Public, day).await.unwrap();

    assert_eq!(first.id, second.id);
}

#[tokio::test]
async fn choices_for_other_dates_are_never_touched() {
    let (store, service) = service_with_demo_data();
    let d1 = date("2025-08-22");
    let d2 = date("2025-08-23");

    let q1 = service.quote_for_date(&QuoteScope::Public, d1).await.unwrap();
    let persisted_d1 = store.get(&DailyQuoteService::storage_key(d1)).unwrap();
    assert_eq!(persisted_d1.as_deref(), Some(q1.id.as_str()));

    // Resolving and refreshing on d2 must leave d1 alone
    service.quote_for_date(&QuoteScope::Public, d2).await.unwrap();
    service.new_quote_for_date(&QuoteScope::Public, d2).await.unwrap();

    assert_eq!(
        store.get(&DailyQuoteService::storage_key(d1)).unwrap(),
        persisted_d1
    );
}

#[tokio::test]
async fn manual_refresh_overwrites_today_with_a_different_quote() {
    let (store, service) = service_with_demo_data();
    let day = date("2025-08-23");
    let key = DailyQuoteService::storage_key(day);

    let initial = service.quote_for_date(&QuoteScope::Public, day).await.unwrap();
    let refreshed = service.new_quote_for_date(&QuoteScope::Public, day).await.unwrap();

    assert_ne!(initial.id, refreshed.id);
    assert_eq!(store.get(&key).unwrap().as_deref(), Some(refreshed.id.as_str()));

    // Subsequent resolution sticks with the refreshed choice
    let resolved = service.quote_for_date(&QuoteScope::Public, day).await.unwrap();
    assert_eq!(resolved.id, refreshed.id);
}

#[tokio::test]
async fn refresh_with_a_single_quote_returns_it_again() {
    let backend = Arc::new(MemoryBackend::new());
    backend.seed(
        QUOTES_TABLE,
        vec![json!({
            "id": "only-one",
            "text": "Lone quote.",
            "author": "Solo",
            "tags": [],
            "is_public": true,
        })],
    );
    let store = Arc::new(MemoryStore::new());
    let service = DailyQuoteService::new(Arc::new(QuoteRepository::new(backend)), store);
    let day = date("2025-08-23");

    service.quote_for_date(&QuoteScope::Public, day).await.unwrap();
    let refreshed = service.new_quote_for_date(&QuoteScope::Public, day).await.unwrap();
    assert_eq!(refreshed.id, "only-one");
}

#[tokio::test]
async fn stale_persisted_id_triggers_a_redraw() {
    let (store, service) = service_with_demo_data();
    let day = date("2025-08-23");
    let key = DailyQuoteService::storage_key(day);

    store.set(&key, "quote-deleted-long-ago").unwrap();

    let quote = service.quote_for_date(&QuoteScope::Public, day).await.unwrap();
    assert_ne!(quote.id, "quote-deleted-long-ago");
    assert_eq!(store.get(&key).unwrap().as_deref(), Some(quote.id.as_str()));
}

#[tokio::test]
async fn selection_is_spread_over_the_whole_list() {
    let (store, service) = service_with_demo_data();
    let day = date("2025-08-23");
    let key = DailyQuoteService::storage_key(day);

    let mut seen = HashSet::new();
    for _ in 0..400 {
        store.remove(&key).unwrap();
        let quote = service.quote_for_date(&QuoteScope::Public, day).await.unwrap();
        seen.insert(quote.id);
    }

    // 400 uniform draws over 5 quotes miss one with probability ~5e-39
    assert_eq!(seen.len(), 5);
}

#[tokio::test]
async fn empty_quote_list_is_an_error() {
    let backend = Arc::new(MemoryBackend::new());
    let service = DailyQuoteService::new(
        Arc::new(QuoteRepository::new(backend)),
        Arc::new(MemoryStore::new()),
    );

    let result = service.quote_for_date(&QuoteScope::Public, date("2025-08-23")).await;
    assert!(matches!(result, Err(DailyQuoteError::NoQuotesAvailable)));
}

/// Store whose every operation fails
struct BrokenStore;

impl LocalStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Engine("disk on fire".to_string()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Engine("disk on fire".to_string()))
    }

    fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Engine("disk on fire".to_string()))
    }

    fn keys_with_prefix(&self, _prefix: &str) -> Result<Vec<String>, StoreError> {
        Err(StoreError::Engine("disk on fire".to_string()))
    }
}

#[tokio::test]
async fn storage_failure_degrades_to_a_fresh_pick() {
    let backend = Arc::new(MemoryBackend::with_demo_data());
    let service = DailyQuoteService::new(
        Arc::new(QuoteRepository::new(backend)),
        Arc::new(BrokenStore),
    );

    // Unreadable store reads as "nothing persisted"; the quote still arrives
    let quote = service
        .quote_for_date(&QuoteScope::Public, date("2025-08-23"))
        .await
        .unwrap();
    assert!(!quote.id.is_empty());
}

#[tokio::test]
async fn prune_drops_only_entries_older_than_cutoff() {
    let (store, service) = service_with_demo_data();

    store.set("dailyQuote_2025-08-01", "quote-1").unwrap();
    store.set("dailyQuote_2025-08-10", "quote-2").unwrap();
    store.set("dailyQuote_2025-08-23", "quote-3").unwrap();
    store.set("dailyQuote_garbage", "quote-4").unwrap();
    store.set("@auth_session", "{}").unwrap();

    let removed = service.prune_entries_before(date("2025-08-15")).unwrap();
    assert_eq!(removed, 2);

    assert_eq!(store.get("dailyQuote_2025-08-01").unwrap(), None);
    assert_eq!(store.get("dailyQuote_2025-08-10").unwrap(), None);
    assert!(store.get("dailyQuote_2025-08-23").unwrap().is_some());
    // Malformed keys and foreign keys are left alone
    assert!(store.get("dailyQuote_garbage").unwrap().is_some());
    assert!(store.get("@auth_session").unwrap().is_some());
}
