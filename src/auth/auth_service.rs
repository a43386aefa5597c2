use std::sync::Arc;

use log::warn;

use super::auth_errors::{AuthError, Result};
use super::auth_model::{AuthSession, User};
use crate::backend::{AuthBackend, BackendError};
use crate::constants::{DAILY_QUOTE_KEY_PREFIX, SESSION_STORAGE_KEY};
use crate::storage::LocalStore;

/// Session management against the hosted auth endpoints. The session is
/// cached in the device-local store so the user stays signed in between
/// app starts.
pub struct AuthService {
    backend: Arc<dyn AuthBackend>,
    store: Arc<dyn LocalStore>,
}

impl AuthService {
    pub fn new(backend: Arc<dyn AuthBackend>, store: Arc<dyn LocalStore>) -> Self {
        AuthService { backend, store }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        let session = self.backend.sign_in(email, password).await?;
        let serialized = serde_json::to_string(&session)
            .map_err(|e| AuthError::Backend(BackendError::Parsing(e.to_string())))?;
        self.store.set(SESSION_STORAGE_KEY, &serialized)?;
        Ok(session)
    }

    /// Cached session, if any. A corrupt or unreadable cache entry is
    /// logged and treated as signed out.
    pub fn current_session(&self) -> Option<AuthSession> {
        let raw = match self.store.get(SESSION_STORAGE_KEY) {
            Ok(value) => value?,
            Err(e) => {
                warn!("Failed to read session cache: {}", e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!("Discarding corrupt session cache: {}", e);
                None
            }
        }
    }

    pub fn current_user(&self) -> Option<User> {
        self.current_session().map(|session| session.user)
    }

    /// Signs out at the backend and invalidates the device-local state this
    /// crate owns: the session cache and every persisted daily quote
    /// choice. Local state is cleared even when the backend call fails
    /// (e.g. the network is down); the device must always be able to sign
    /// out of itself.
    pub async fn sign_out(&self) -> Result<()> {
        if let Some(session) = self.current_session() {
            if let Err(e) = self.backend.sign_out(&session.access_token).await {
                warn!("Backend sign-out failed, clearing local session anyway: {}", e);
            }
        }

        self.store.remove(SESSION_STORAGE_KEY)?;
        for key in self.store.keys_with_prefix(DAILY_QUOTE_KEY_PREFIX)? {
            self.store.remove(&key)?;
        }
        Ok(())
    }
}
