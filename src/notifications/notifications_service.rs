use std::sync::Arc;

use log::debug;

use super::notifications_errors::Result;
use super::notifications_model::{DailyTrigger, NotificationChannel, NotificationContent};
use super::notifications_traits::NotificationPlatform;
use crate::constants::{
    DAILY_REMINDER_BODY, DAILY_REMINDER_HOUR, DAILY_REMINDER_MINUTE, DAILY_REMINDER_TITLE,
    NOTIFICATION_CHANNEL_ID, NOTIFICATION_CHANNEL_NAME,
};

/// Thin wrapper over the platform notification subsystem for the daily
/// reminder. Holds no persisted state of its own.
pub struct NotificationService {
    platform: Arc<dyn NotificationPlatform>,
}

impl NotificationService {
    pub fn new(platform: Arc<dyn NotificationPlatform>) -> Self {
        NotificationService { platform }
    }

    /// Turns the daily reminder on. Returns `Ok(false)` when the user
    /// denies permission; the caller surfaces that to the user, nothing is
    /// scheduled, and no retry happens here.
    pub async fn enable_daily(&self) -> Result<bool> {
        let channel = NotificationChannel {
            id: NOTIFICATION_CHANNEL_ID.to_string(),
            name: NOTIFICATION_CHANNEL_NAME.to_string(),
        };
        self.platform.ensure_channel(&channel).await?;

        let granted = if self.platform.permission_granted().await? {
            true
        } else {
            self.platform.request_permission().await?
        };
        if !granted {
            debug!("Notification permission denied; daily reminder stays off");
            return Ok(false);
        }

        // Replace whatever was scheduled before; exactly one recurring
        // trigger may exist
        self.platform.cancel_all().await?;
        self.platform
            .schedule_daily(
                DailyTrigger {
                    hour: DAILY_REMINDER_HOUR,
                    minute: DAILY_REMINDER_MINUTE,
                },
                NotificationContent {
                    title: DAILY_REMINDER_TITLE.to_string(),
                    body: DAILY_REMINDER_BODY.to_string(),
                },
            )
            .await?;
        Ok(true)
    }

    /// Turns the daily reminder off unconditionally
    pub async fn disable_daily(&self) -> Result<()> {
        self.platform.cancel_all().await
    }
}
