use std::sync::Arc;

use chrono::{Local, NaiveDate};
use log::{debug, warn};
use rand::seq::SliceRandom;

use super::daily_errors::{DailyQuoteError, Result};
use crate::constants::DAILY_QUOTE_KEY_PREFIX;
use crate::quotes::{Quote, QuoteRepositoryTrait, QuoteScope};
use crate::storage::LocalStore;

/// Outcome of checking the persisted choice for a date against the loaded
/// quote list
enum Resolution {
    /// Persisted id found and still resolves to a loaded quote
    Resolved(usize),
    /// Nothing persisted for this date yet
    Unset,
    /// Persisted id no longer matches any loaded quote (e.g. the quote was
    /// deleted upstream)
    Stale(String),
}

/// Chooses one quote per calendar day and persists the choice so the same
/// quote reappears on every open that day. The date key is the device-local
/// calendar date; reproducibility comes only from the persisted key, never
/// from seeding the random source.
pub struct DailyQuoteService {
    quotes: Arc<dyn QuoteRepositoryTrait>,
    store: Arc<dyn LocalStore>,
}

impl DailyQuoteService {
    pub fn new(quotes: Arc<dyn QuoteRepositoryTrait>, store: Arc<dyn LocalStore>) -> Self {
        DailyQuoteService { quotes, store }
    }

    pub fn storage_key(date: NaiveDate) -> String {
        format!("{}{}", DAILY_QUOTE_KEY_PREFIX, date.format("%Y-%m-%d"))
    }

    /// Quote of the day. Stable across repeated calls on the same date;
    /// re-picks only when nothing is persisted for today or the persisted
    /// id went stale.
    pub async fn quote_of_the_day(&self, scope: &QuoteScope) -> Result<Quote> {
        self.quote_for_date(scope, Local::now().date_naive()).await
    }

    /// Manual "new quote": redraws for today and overwrites today's
    /// persisted entry. Entries for other dates are never touched.
    pub async fn new_quote(&self, scope: &QuoteScope) -> Result<Quote> {
        self.new_quote_for_date(scope, Local::now().date_naive()).await
    }

    pub async fn quote_for_date(&self, scope: &QuoteScope, date: NaiveDate) -> Result<Quote> {
        let quotes = self.load(scope).await?;
        match self.resolve(&quotes, date) {
            Resolution::Resolved(index) => Ok(quotes[index].clone()),
            Resolution::Unset => Ok(self.pick_and_persist(&quotes, None, date)),
            Resolution::Stale(old_id) => {
                debug!("Persisted daily quote {} no longer resolves, redrawing", old_id);
                Ok(self.pick_and_persist(&quotes, None, date))
            }
        }
    }

    pub async fn new_quote_for_date(&self, scope: &QuoteScope, date: NaiveDate) -> Result<Quote> {
        let quotes = self.load(scope).await?;
        let current = self.persisted_id(date);
        Ok(self.pick_and_persist(&quotes, current, date))
    }

    /// Drops persisted choices strictly older than `cutoff` and returns how
    /// many were removed. Growth is otherwise unbounded (one entry per day
    /// the app is opened); whether and when to prune is the embedding app's
    /// call.
    pub fn prune_entries_before(&self, cutoff: NaiveDate) -> Result<usize> {
        let keys = self.store.keys_with_prefix(DAILY_QUOTE_KEY_PREFIX)?;
        let mut removed = 0;
        for key in keys {
            let date_part = key.strip_prefix(DAILY_QUOTE_KEY_PREFIX).unwrap_or(&key);
            match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
                Ok(date) if date < cutoff => {
                    self.store.remove(&key)?;
                    removed += 1;
                }
                Ok(_) => {}
                Err(_) => warn!("Ignoring malformed daily quote key: {}", key),
            }
        }
        Ok(removed)
    }

    async fn load(&self, scope: &QuoteScope) -> Result<Vec<Quote>> {
        let quotes = self.quotes.list_quotes(scope).await?;
        if quotes.is_empty() {
            return Err(DailyQuoteError::NoQuotesAvailable);
        }
        Ok(quotes)
    }

    fn persisted_id(&self, date: NaiveDate) -> Option<String> {
        let key = Self::storage_key(date);
        // An unreadable entry is treated the same as an absent one
        match self.store.get(&key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read {}: {}", key, e);
                None
            }
        }
    }

    fn resolve(&self, quotes: &[Quote], date: NaiveDate) -> Resolution {
        match self.persisted_id(date) {
            Some(id) => match quotes.iter().position(|quote| quote.id == id) {
                Some(index) => Resolution::Resolved(index),
                None => Resolution::Stale(id),
            },
            None => Resolution::Unset,
        }
    }

    /// Uniform draw over the loaded list, excluding the current choice when
    /// there is one and the list offers an alternative, so a manual refresh
    /// visibly changes the quote. Persists under the date key; a write
    /// failure is logged and the drawn quote still returned.
    fn pick_and_persist(
        &self,
        quotes: &[Quote],
        exclude_id: Option<String>,
        date: NaiveDate,
    ) -> Quote {
        let pool: Vec<&Quote> = match exclude_id {
            Some(ref id) if quotes.len() > 1 => {
                quotes.iter().filter(|quote| quote.id != *id).collect()
            }
            _ => quotes.iter().collect(),
        };

        // load() guarantees a non-empty list, and the exclusion above never
        // empties a list of two or more
        let chosen = pool
            .choose(&mut rand::thread_rng())
            .map(|quote| (*quote).clone())
            .unwrap_or_else(|| quotes[0].clone());

        let key = Self::storage_key(date);
        if let Err(e) = self.store.set(&key, &chosen.id) {
            warn!("Failed to persist daily quote under {}: {}", key, e);
        }
        chosen
    }
}
