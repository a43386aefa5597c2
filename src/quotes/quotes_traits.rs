use async_trait::async_trait;

use super::quotes_errors::Result;
use super::quotes_model::{Category, Quote, QuoteScope};

#[async_trait]
pub trait QuoteRepositoryTrait: Send + Sync {
    async fn list_quotes(&self, scope: &QuoteScope) -> Result<Vec<Quote>>;

    /// Equality filter on the category display name on top of the scope
    /// rule. The sentinel name "all" (any casing) lists everything.
    async fn list_quotes_by_category(
        &self,
        category_name: &str,
        scope: &QuoteScope,
    ) -> Result<Vec<Quote>>;

    async fn list_categories(&self) -> Result<Vec<Category>>;
}
