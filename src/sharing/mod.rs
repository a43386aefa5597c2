pub(crate) mod sharing_service;

// Re-export the public interface
pub use sharing_service::{
    format_share_message, share_quote, ShareError, ShareSurface, SHARE_DIALOG_TITLE,
};
