use std::sync::Arc;

use async_trait::async_trait;
use log::{error, warn};
use serde_json::Value;

use super::quotes_errors::Result;
use super::quotes_model::{Category, Quote, QuoteScope};
use super::quotes_traits::QuoteRepositoryTrait;
use crate::backend::{BackendClient, Filter, OrderBy};
use crate::constants::{CATEGORIES_TABLE, CATEGORY_ALL, QUOTES_TABLE};

const QUOTE_COLUMNS: &str =
    "id,text,author,category,category_id,tags,is_public,user_id,created_at,is_favorite";
const CATEGORY_COLUMNS: &str = "id,name,color,icon,created_at";

pub struct QuoteRepository {
    backend: Arc<dyn BackendClient>,
}

impl QuoteRepository {
    pub fn new(backend: Arc<dyn BackendClient>) -> Self {
        QuoteRepository { backend }
    }

    fn scope_filter(scope: &QuoteScope) -> Filter {
        match scope {
            QuoteScope::Public => Filter::eq("is_public", "true"),
            QuoteScope::User(user_id) => Filter::any_of(vec![
                ("user_id".to_string(), user_id.clone()),
                ("is_public".to_string(), "true".to_string()),
            ]),
        }
    }

    fn normalize(rows: &[Value]) -> Vec<Quote> {
        rows.iter()
            .filter_map(|row| {
                let quote = Quote::from_record(row);
                if quote.is_none() {
                    warn!("Skipping quote row without an id: {}", row);
                }
                quote
            })
            .collect()
    }

    async fn query_quotes(&self, filters: &[Filter]) -> Result<Vec<Quote>> {
        let rows = self
            .backend
            .select(QUOTES_TABLE, QUOTE_COLUMNS, filters, None)
            .await
            .map_err(|e| {
                error!("Failed to list quotes: {}", e);
                e
            })?;
        Ok(Self::normalize(&rows))
    }
}

#[async_trait]
impl QuoteRepositoryTrait for QuoteRepository {
    async fn list_quotes(&self, scope: &QuoteScope) -> Result<Vec<Quote>> {
        self.query_quotes(&[Self::scope_filter(scope)]).await
    }

    async fn list_quotes_by_category(
        &self,
        category_name: &str,
        scope: &QuoteScope,
    ) -> Result<Vec<Quote>> {
        if category_name.eq_ignore_ascii_case(CATEGORY_ALL) {
            return self.list_quotes(scope).await;
        }
        self.query_quotes(&[
            Filter::eq("category", category_name),
            Self::scope_filter(scope),
        ])
        .await
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        let rows = self
            .backend
            .select(CATEGORIES_TABLE, CATEGORY_COLUMNS, &[], Some(OrderBy::asc("name")))
            .await
            .map_err(|e| {
                error!("Failed to list categories: {}", e);
                e
            })?;
        Ok(rows.iter().filter_map(Category::from_record).collect())
    }
}
