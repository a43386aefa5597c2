use async_trait::async_trait;
use serde_json::Value;

use super::backend_errors::BackendError;
use crate::auth::AuthSession;

/// Row filter understood by every backend implementation
#[derive(Debug, Clone)]
pub enum Filter {
    /// column = value
    Eq { column: String, value: String },
    /// At least one of the (column, value) equality tests holds
    Or(Vec<(String, String)>),
}

impl Filter {
    pub fn eq(column: &str, value: impl Into<String>) -> Self {
        Filter::Eq {
            column: column.to_string(),
            value: value.into(),
        }
    }

    pub fn any_of(tests: Vec<(String, String)>) -> Self {
        Filter::Or(tests)
    }
}

#[derive(Debug, Clone)]
pub struct OrderBy {
    pub column: String,
    pub ascending: bool,
}

impl OrderBy {
    pub fn asc(column: &str) -> Self {
        OrderBy {
            column: column.to_string(),
            ascending: true,
        }
    }

    pub fn desc(column: &str) -> Self {
        OrderBy {
            column: column.to_string(),
            ascending: false,
        }
    }
}

/// Table-oriented hosted backend. The core only ever needs
/// select-with-filter (with relational embedding in the column list),
/// insert, delete, and single-field update.
///
/// Rows travel as raw JSON values; normalization into domain models happens
/// at the repository boundary.
#[async_trait]
pub trait BackendClient: Send + Sync {
    async fn select(
        &self,
        table: &str,
        columns: &str,
        filters: &[Filter],
        order: Option<OrderBy>,
    ) -> Result<Vec<Value>, BackendError>;

    /// Inserts one record and returns its stored representation.
    /// Implementations must surface unique-constraint conflicts as
    /// [`BackendError::UniqueViolation`].
    async fn insert(&self, table: &str, record: Value) -> Result<Value, BackendError>;

    async fn delete(&self, table: &str, filters: &[Filter]) -> Result<(), BackendError>;

    async fn update(
        &self,
        table: &str,
        patch: Value,
        filters: &[Filter],
    ) -> Result<(), BackendError>;
}

/// Session-based authentication endpoints of the hosted backend
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, BackendError>;

    async fn sign_out(&self, access_token: &str) -> Result<(), BackendError>;
}
