use std::sync::RwLock;

use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;

use super::backend_client::{AuthBackend, BackendClient, Filter, OrderBy};
use super::backend_errors::BackendError;
use crate::auth::{AuthSession, User};

/// Postgres unique-constraint violation, surfaced by the REST layer in the
/// error body
const UNIQUE_VIOLATION_CODE: &str = "23505";

/// HTTP client for a Supabase-style hosted backend (PostgREST tables plus
/// GoTrue auth endpoints). One instance per application session, injected
/// into repositories and services.
pub struct SupabaseClient {
    http: Client,
    base_url: String,
    anon_key: String,
    access_token: RwLock<Option<String>>,
}

impl SupabaseClient {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        SupabaseClient {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            access_token: RwLock::new(None),
        }
    }

    /// Installs (or clears) the user access token used for authenticated
    /// requests. Without one, requests carry the anon key.
    pub fn set_access_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.access_token.write() {
            *guard = token;
        }
    }

    fn bearer(&self) -> String {
        self.access_token
            .read()
            .ok()
            .and_then(|guard| guard.clone())
            .unwrap_or_else(|| self.anon_key.clone())
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn auth_url(&self, endpoint: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, endpoint)
    }

    fn filter_params(filters: &[Filter]) -> Vec<(String, String)> {
        filters
            .iter()
            .map(|filter| match filter {
                Filter::Eq { column, value } => (column.clone(), format!("eq.{}", value)),
                Filter::Or(tests) => {
                    let clauses: Vec<String> = tests
                        .iter()
                        .map(|(column, value)| format!("{}.eq.{}", column, value))
                        .collect();
                    ("or".to_string(), format!("({})", clauses.join(",")))
                }
            })
            .collect()
    }

    async fn check(response: Response) -> Result<Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        error!("Backend request failed ({}): {}", status, body);

        if status == StatusCode::CONFLICT || body.contains(UNIQUE_VIOLATION_CODE) {
            return Err(BackendError::UniqueViolation(body));
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(BackendError::Unauthorized(body));
        }
        if status == StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound(body));
        }
        Err(BackendError::Api {
            status: status.as_u16(),
            message: body,
        })
    }
}

#[async_trait]
impl BackendClient for SupabaseClient {
    async fn select(
        &self,
        table: &str,
        columns: &str,
        filters: &[Filter],
        order: Option<OrderBy>,
    ) -> Result<Vec<Value>, BackendError> {
        let mut params = vec![("select".to_string(), columns.to_string())];
        params.extend(Self::filter_params(filters));
        if let Some(order) = order {
            let direction = if order.ascending { "asc" } else { "desc" };
            params.push(("order".to_string(), format!("{}.{}", order.column, direction)));
        }

        debug!("GET {} with {} filter(s)", table, filters.len());
        let response = self
            .http
            .get(self.rest_url(table))
            .header("apikey", &self.anon_key)
            .bearer_auth(self.bearer())
            .query(&params)
            .send()
            .await?;
        let response = Self::check(response).await?;
        let rows: Vec<Value> = response.json().await?;
        Ok(rows)
    }

    async fn insert(&self, table: &str, record: Value) -> Result<Value, BackendError> {
        debug!("POST {}", table);
        let response = self
            .http
            .post(self.rest_url(table))
            .header("apikey", &self.anon_key)
            .header("Prefer", "return=representation")
            .bearer_auth(self.bearer())
            .json(&record)
            .send()
            .await?;
        let response = Self::check(response).await?;
        let mut rows: Vec<Value> = response.json().await?;
        rows.pop()
            .ok_or_else(|| BackendError::Parsing("insert returned no representation".to_string()))
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> Result<(), BackendError> {
        debug!("DELETE {} with {} filter(s)", table, filters.len());
        let response = self
            .http
            .delete(self.rest_url(table))
            .header("apikey", &self.anon_key)
            .bearer_auth(self.bearer())
            .query(&Self::filter_params(filters))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn update(
        &self,
        table: &str,
        patch: Value,
        filters: &[Filter],
    ) -> Result<(), BackendError> {
        debug!("PATCH {} with {} filter(s)", table, filters.len());
        let response = self
            .http
            .patch(self.rest_url(table))
            .header("apikey", &self.anon_key)
            .bearer_auth(self.bearer())
            .query(&Self::filter_params(filters))
            .json(&patch)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[async_trait]
impl AuthBackend for SupabaseClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, BackendError> {
        let response = self
            .http
            .post(self.auth_url("token?grant_type=password"))
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            return Err(BackendError::InvalidCredentials);
        }

        let response = Self::check(response).await?;
        let body: Value = response.json().await?;
        let session = parse_session(&body)?;
        self.set_access_token(Some(session.access_token.clone()));
        Ok(session)
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), BackendError> {
        let response = self
            .http
            .post(self.auth_url("logout"))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;
        Self::check(response).await?;
        self.set_access_token(None);
        Ok(())
    }
}

fn parse_session(body: &Value) -> Result<AuthSession, BackendError> {
    let user = &body["user"];
    let id = user["id"]
        .as_str()
        .ok_or_else(|| BackendError::Parsing("session missing user id".to_string()))?;
    let access_token = body["access_token"]
        .as_str()
        .ok_or_else(|| BackendError::Parsing("session missing access token".to_string()))?;

    Ok(AuthSession {
        user: User {
            id: id.to_string(),
            email: user["email"].as_str().unwrap_or_default().to_string(),
            name: user["user_metadata"]["name"].as_str().map(str::to_string),
            created_at: user["created_at"].as_str().map(str::to_string),
        },
        access_token: access_token.to_string(),
        refresh_token: body["refresh_token"].as_str().map(str::to_string),
    })
}
