pub mod auth;
pub mod backend;
pub mod constants;
pub mod daily;
pub mod errors;
pub mod favorites;
pub mod notifications;
pub mod quotes;
pub mod sharing;
pub mod storage;

mod vault;

pub use quotes::*;
pub use vault::QuoteVault;
