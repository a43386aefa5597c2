use async_trait::async_trait;

use super::notifications_errors::Result;
use super::notifications_model::{DailyTrigger, NotificationChannel, NotificationContent};

/// Platform notification subsystem. It owns permissions and all scheduling
/// state; the core only asks it to set up or tear down the daily trigger
/// and never inspects what is scheduled.
#[async_trait]
pub trait NotificationPlatform: Send + Sync {
    async fn permission_granted(&self) -> Result<bool>;

    /// Prompts the user. Returns the resulting grant state; denial is not
    /// an error.
    async fn request_permission(&self) -> Result<bool>;

    async fn ensure_channel(&self, channel: &NotificationChannel) -> Result<()>;

    async fn schedule_daily(
        &self,
        trigger: DailyTrigger,
        content: NotificationContent,
    ) -> Result<()>;

    async fn cancel_all(&self) -> Result<()>;
}
