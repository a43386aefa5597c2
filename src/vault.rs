use std::sync::Arc;

use crate::auth::AuthService;
use crate::backend::{AuthBackend, BackendClient};
use crate::daily::DailyQuoteService;
use crate::favorites::FavoriteService;
use crate::notifications::{NotificationPlatform, NotificationService};
use crate::quotes::QuoteRepository;
use crate::storage::LocalStore;

/// Service graph for one application session. Built once at app start from
/// explicitly injected backend, storage, and platform handles; torn down
/// with the app.
pub struct QuoteVault {
    pub quotes: Arc<QuoteRepository>,
    pub favorites: Arc<FavoriteService>,
    pub daily: Arc<DailyQuoteService>,
    pub notifications: Arc<NotificationService>,
    pub auth: Arc<AuthService>,
}

impl QuoteVault {
    pub fn new(
        backend: Arc<dyn BackendClient>,
        auth_backend: Arc<dyn AuthBackend>,
        store: Arc<dyn LocalStore>,
        platform: Arc<dyn NotificationPlatform>,
    ) -> Self {
        let quotes = Arc::new(QuoteRepository::new(backend.clone()));
        QuoteVault {
            favorites: Arc::new(FavoriteService::new(backend)),
            daily: Arc::new(DailyQuoteService::new(quotes.clone(), store.clone())),
            notifications: Arc::new(NotificationService::new(platform)),
            auth: Arc::new(AuthService::new(auth_backend, store)),
            quotes,
        }
    }
}
