use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use serde_json::{json, Value};
use uuid::Uuid;

use super::backend_client::{AuthBackend, BackendClient, Filter, OrderBy};
use super::backend_errors::BackendError;
use crate::auth::{AuthSession, User};
use crate::constants::{CATEGORIES_TABLE, FAVORITES_TABLE, QUOTES_TABLE};

/// In-process backend with the same observable behavior as the hosted
/// service: equality/OR filters, ordering, relational embedding along
/// favorites -> quotes -> categories, and a uniqueness constraint on
/// favorites (user_id, quote_id).
///
/// Backs the bundled demo data set and the test suites. Rows are returned
/// whole rather than projected to the requested columns; callers only read
/// the fields they asked for.
pub struct MemoryBackend {
    tables: RwLock<HashMap<String, Vec<Value>>>,
    /// email -> (password, user)
    users: RwLock<HashMap<String, (String, User)>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        MemoryBackend {
            tables: RwLock::new(HashMap::new()),
            users: RwLock::new(HashMap::new()),
        }
    }

    /// Backend pre-loaded with the demo categories and quotes shipped with
    /// the app
    pub fn with_demo_data() -> Self {
        let backend = Self::new();
        backend.seed(CATEGORIES_TABLE, demo_categories());
        backend.seed(QUOTES_TABLE, demo_quotes());
        backend
    }

    pub fn seed(&self, table: &str, rows: Vec<Value>) {
        if let Ok(mut tables) = self.tables.write() {
            tables.entry(table.to_string()).or_default().extend(rows);
        }
    }

    pub fn register_user(&self, email: &str, password: &str, user: User) {
        if let Ok(mut users) = self.users.write() {
            users.insert(email.to_string(), (password.to_string(), user));
        }
    }

    /// Snapshot of a table's raw rows, for inspection in tests
    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.tables
            .read()
            .ok()
            .and_then(|tables| tables.get(table).cloned())
            .unwrap_or_default()
    }

    fn lock_error() -> BackendError {
        BackendError::Api {
            status: 500,
            message: "backend state lock poisoned".to_string(),
        }
    }

    fn find_by_id(rows: &[Value], id: &Value) -> Option<Value> {
        let id = id.as_str()?;
        rows.iter().find(|row| row["id"] == id).cloned()
    }

    /// Expands foreign keys into embedded objects the way the hosted
    /// backend resolves embedded column lists. Only the two relationships
    /// the app uses are known here.
    fn embed(
        tables: &HashMap<String, Vec<Value>>,
        table: &str,
        columns: &str,
        mut row: Value,
    ) -> Value {
        if table == FAVORITES_TABLE && columns.contains("quotes(") {
            let quotes = tables.get(QUOTES_TABLE).map(Vec::as_slice).unwrap_or(&[]);
            let embedded = match Self::find_by_id(quotes, &row["quote_id"]) {
                Some(quote) if columns.contains("categories(") => {
                    Self::embed(tables, QUOTES_TABLE, columns, quote)
                }
                Some(quote) => quote,
                None => Value::Null,
            };
            row["quotes"] = embedded;
        }

        if table == QUOTES_TABLE && columns.contains("categories(") {
            let categories = tables
                .get(CATEGORIES_TABLE)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            row["categories"] =
                Self::find_by_id(categories, &row["category_id"]).unwrap_or(Value::Null);
        }

        row
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn value_matches(row: &Value, column: &str, expected: &str) -> bool {
    match &row[column] {
        Value::String(actual) => actual == expected,
        Value::Bool(actual) => expected.parse::<bool>().map(|e| *actual == e).unwrap_or(false),
        Value::Number(actual) => actual.to_string() == expected,
        _ => false,
    }
}

fn row_matches(row: &Value, filter: &Filter) -> bool {
    match filter {
        Filter::Eq { column, value } => value_matches(row, column, value),
        Filter::Or(tests) => tests
            .iter()
            .any(|(column, value)| value_matches(row, column, value)),
    }
}

#[async_trait]
impl BackendClient for MemoryBackend {
    async fn select(
        &self,
        table: &str,
        columns: &str,
        filters: &[Filter],
        order: Option<OrderBy>,
    ) -> Result<Vec<Value>, BackendError> {
        let tables = self.tables.read().map_err(|_| Self::lock_error())?;
        let rows = tables.get(table).map(Vec::as_slice).unwrap_or(&[]);

        let mut selected: Vec<Value> = rows
            .iter()
            .filter(|row| filters.iter().all(|filter| row_matches(row, filter)))
            .map(|row| Self::embed(&tables, table, columns, row.clone()))
            .collect();

        if let Some(order) = order {
            selected.sort_by(|a, b| {
                let left = a[order.column.as_str()].as_str().unwrap_or_default().to_string();
                let right = b[order.column.as_str()].as_str().unwrap_or_default().to_string();
                let ordering = left.cmp(&right);
                if order.ascending {
                    ordering
                } else {
                    ordering.reverse()
                }
            });
        }

        debug!("memory select {} -> {} row(s)", table, selected.len());
        Ok(selected)
    }

    async fn insert(&self, table: &str, record: Value) -> Result<Value, BackendError> {
        let mut tables = self.tables.write().map_err(|_| Self::lock_error())?;
        let rows = tables.entry(table.to_string()).or_default();

        if table == FAVORITES_TABLE {
            let duplicate = rows.iter().any(|row| {
                row["user_id"] == record["user_id"] && row["quote_id"] == record["quote_id"]
            });
            if duplicate {
                return Err(BackendError::UniqueViolation(format!(
                    "duplicate key value violates unique constraint ({})",
                    UNIQUE_FAVORITE_CONSTRAINT
                )));
            }
        }

        let mut stored = record;
        if stored["id"].is_null() {
            stored["id"] = Value::String(Uuid::new_v4().to_string());
        }
        if stored["created_at"].is_null() {
            stored["created_at"] = Value::String(Utc::now().to_rfc3339());
        }

        rows.push(stored.clone());
        Ok(stored)
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> Result<(), BackendError> {
        let mut tables = self.tables.write().map_err(|_| Self::lock_error())?;
        if let Some(rows) = tables.get_mut(table) {
            rows.retain(|row| !filters.iter().all(|filter| row_matches(row, filter)));
        }
        Ok(())
    }

    async fn update(
        &self,
        table: &str,
        patch: Value,
        filters: &[Filter],
    ) -> Result<(), BackendError> {
        let fields = patch.as_object().ok_or_else(|| {
            BackendError::Parsing("update patch must be a JSON object".to_string())
        })?;

        let mut tables = self.tables.write().map_err(|_| Self::lock_error())?;
        if let Some(rows) = tables.get_mut(table) {
            for row in rows
                .iter_mut()
                .filter(|row| filters.iter().all(|filter| row_matches(row, filter)))
            {
                for (key, value) in fields {
                    row[key.as_str()] = value.clone();
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl AuthBackend for MemoryBackend {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, BackendError> {
        let users = self.users.read().map_err(|_| Self::lock_error())?;
        match users.get(email) {
            Some((stored_password, user)) if stored_password == password => Ok(AuthSession {
                user: user.clone(),
                access_token: Uuid::new_v4().to_string(),
                refresh_token: None,
            }),
            _ => Err(BackendError::InvalidCredentials),
        }
    }

    async fn sign_out(&self, _access_token: &str) -> Result<(), BackendError> {
        Ok(())
    }
}

const UNIQUE_FAVORITE_CONSTRAINT: &str = "favorites_user_id_quote_id_key";

fn demo_categories() -> Vec<Value> {
    [
        ("cat-motivation", "Motivation", "#2563EB"),
        ("cat-life", "Life", "#16A34A"),
        ("cat-inspiration", "Inspiration", "#9333EA"),
        ("cat-wisdom", "Wisdom", "#D97706"),
        ("cat-happiness", "Happiness", "#DB2777"),
    ]
    .iter()
    .map(|(id, name, color)| {
        json!({
            "id": id,
            "name": name,
            "color": color,
            "icon": Value::Null,
            "created_at": "2025-01-01T00:00:00Z",
        })
    })
    .collect()
}

fn demo_quotes() -> Vec<Value> {
    [
        (
            "quote-1",
            "The only way to do great work is to love what you do.",
            "Steve Jobs",
            "Motivation",
            "cat-motivation",
            vec!["work", "passion", "success"],
        ),
        (
            "quote-2",
            "Life is what happens to you while you're busy making other plans.",
            "John Lennon",
            "Life",
            "cat-life",
            vec!["life", "wisdom"],
        ),
        (
            "quote-3",
            "The future belongs to those who believe in the beauty of their dreams.",
            "Eleanor Roosevelt",
            "Inspiration",
            "cat-inspiration",
            vec!["dreams", "future"],
        ),
        (
            "quote-4",
            "It is during our darkest moments that we must focus to see the light.",
            "Aristotle",
            "Wisdom",
            "cat-wisdom",
            vec!["darkness", "light", "hope"],
        ),
        (
            "quote-5",
            "Whoever is happy will make others happy too.",
            "Anne Frank",
            "Happiness",
            "cat-happiness",
            vec!["happiness", "joy"],
        ),
    ]
    .iter()
    .map(|(id, text, author, category, category_id, tags)| {
        json!({
            "id": id,
            "text": text,
            "author": author,
            "category": category,
            "category_id": category_id,
            "tags": tags,
            "is_public": true,
            "user_id": Value::Null,
            "created_at": "2025-01-01T00:00:00Z",
            "is_favorite": false,
        })
    })
    .collect()
}
