pub(crate) mod notifications_errors;
pub(crate) mod notifications_model;
pub(crate) mod notifications_service;
pub(crate) mod notifications_traits;


// Re-export the public interface
pub use notifications_model::{DailyTrigger, NotificationChannel, NotificationContent};
pub use notifications_service::NotificationService;
pub use notifications_traits::NotificationPlatform;

// Re-export error types for convenience
pub use notifications_errors::NotificationError;
