use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Platform notification error: {0}")]
    Platform(String),
}

/// Result type for notification operations
pub type Result<T> = std::result::Result<T, NotificationError>;
