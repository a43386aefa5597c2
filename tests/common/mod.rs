#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;

use quotevault_core::auth::User;
use quotevault_core::backend::MemoryBackend;
use quotevault_core::notifications::{
    DailyTrigger, NotificationChannel, NotificationContent, NotificationPlatform,
};
use quotevault_core::storage::MemoryStore;
use quotevault_core::QuoteVault;

pub const TEST_EMAIL: &str = "sam@example.com";
pub const TEST_PASSWORD: &str = "hunter2";
pub const TEST_USER_ID: &str = "u1";

/// Platform stub that grants permission and records what gets scheduled
pub struct GrantingPlatform {
    pub scheduled: Mutex<Vec<(DailyTrigger, NotificationContent)>>,
}

impl GrantingPlatform {
    pub fn new() -> Self {
        GrantingPlatform {
            scheduled: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl NotificationPlatform for GrantingPlatform {
    async fn permission_granted(&self) -> Result<bool, quotevault_core::notifications::NotificationError> {
        Ok(true)
    }

    async fn request_permission(&self) -> Result<bool, quotevault_core::notifications::NotificationError> {
        Ok(true)
    }

    async fn ensure_channel(
        &self,
        _channel: &NotificationChannel,
    ) -> Result<(), quotevault_core::notifications::NotificationError> {
        Ok(())
    }

    async fn schedule_daily(
        &self,
        trigger: DailyTrigger,
        content: NotificationContent,
    ) -> Result<(), quotevault_core::notifications::NotificationError> {
        self.scheduled.lock().unwrap().push((trigger, content));
        Ok(())
    }

    async fn cancel_all(&self) -> Result<(), quotevault_core::notifications::NotificationError> {
        self.scheduled.lock().unwrap().clear();
        Ok(())
    }
}

pub struct TestApp {
    pub vault: QuoteVault,
    pub backend: Arc<MemoryBackend>,
    pub store: Arc<MemoryStore>,
    pub platform: Arc<GrantingPlatform>,
}

/// Full service graph over the seeded in-process backend, with one
/// registered test user
pub fn build_app() -> TestApp {
    let backend = Arc::new(MemoryBackend::with_demo_data());
    backend.register_user(
        TEST_EMAIL,
        TEST_PASSWORD,
        User {
            id: TEST_USER_ID.to_string(),
            email: TEST_EMAIL.to_string(),
            name: Some("Sam".to_string()),
            created_at: None,
        },
    );

    let store = Arc::new(MemoryStore::new());
    let platform = Arc::new(GrantingPlatform::new());
    let vault = QuoteVault::new(
        backend.clone(),
        backend.clone(),
        store.clone(),
        platform.clone(),
    );

    TestApp {
        vault,
        backend,
        store,
        platform,
    }
}
