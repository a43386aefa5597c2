use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Canonical quote entity, normalized from the backend row shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: String,
    pub text: String,
    pub author: String,
    /// Denormalized category display name
    pub category: Option<String>,
    pub category_id: Option<String>,
    pub tags: Vec<String>,
    pub is_public: bool,
    pub user_id: Option<String>,
    pub created_at: Option<String>,
    /// Derived favorite flag for the viewing user. The favorites relation
    /// is authoritative; this is a cached read.
    #[serde(default)]
    pub is_favorite: bool,
}

/// Reference data owned by the backend; never mutated by the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub created_at: Option<String>,
}

/// Visibility rule applied to quote listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteScope {
    /// Public quotes only (anonymous browsing)
    Public,
    /// Quotes owned by this user, plus public quotes
    User(String),
}

impl Quote {
    /// Builds a Quote from a backend row. An embedded category object is
    /// flattened onto `category`/`category_id` and wins over the
    /// denormalized columns when both are present. Tags are coerced to a
    /// sequence of strings; anything malformed becomes empty. Rows without
    /// an id are not quotes.
    pub fn from_record(record: &Value) -> Option<Quote> {
        let id = record["id"].as_str()?.to_string();

        let mut quote = Quote {
            id,
            text: record["text"].as_str().unwrap_or_default().to_string(),
            author: record["author"].as_str().unwrap_or_default().to_string(),
            category: record["category"].as_str().map(str::to_string),
            category_id: record["category_id"].as_str().map(str::to_string),
            tags: coerce_tags(&record["tags"]),
            is_public: record["is_public"].as_bool().unwrap_or(false),
            user_id: record["user_id"].as_str().map(str::to_string),
            created_at: record["created_at"].as_str().map(str::to_string),
            is_favorite: record["is_favorite"].as_bool().unwrap_or(false),
        };

        let embedded = &record["categories"];
        if embedded.is_object() {
            if let Some(name) = embedded["name"].as_str() {
                quote.category = Some(name.to_string());
            }
            if let Some(category_id) = embedded["id"].as_str() {
                quote.category_id = Some(category_id.to_string());
            }
        }

        Some(quote)
    }
}

impl Category {
    pub fn from_record(record: &Value) -> Option<Category> {
        Some(Category {
            id: record["id"].as_str()?.to_string(),
            name: record["name"].as_str().unwrap_or_default().to_string(),
            color: record["color"].as_str().map(str::to_string),
            icon: record["icon"].as_str().map(str::to_string),
            created_at: record["created_at"].as_str().map(str::to_string),
        })
    }
}

fn coerce_tags(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|tags| {
            tags.iter()
                .filter_map(|tag| tag.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
