/// Channel the daily reminder is delivered on (required on Android, a no-op
/// elsewhere)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationChannel {
    pub id: String,
    pub name: String,
}

/// Recurring local-time trigger, firing once per day indefinitely
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTrigger {
    pub hour: u32,
    pub minute: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
}
