/// Storage key prefix for persisted daily quote choices, completed with a
/// device-local `YYYY-MM-DD` date
pub const DAILY_QUOTE_KEY_PREFIX: &str = "dailyQuote_";

/// Storage key for the cached auth session
pub const SESSION_STORAGE_KEY: &str = "@auth_session";

/// Sentinel category name meaning "no category filter"
pub const CATEGORY_ALL: &str = "all";

/// Local time of the daily reminder
pub const DAILY_REMINDER_HOUR: u32 = 9;
pub const DAILY_REMINDER_MINUTE: u32 = 0;

/// Android notification channel
pub const NOTIFICATION_CHANNEL_ID: &str = "daily-quotes";
pub const NOTIFICATION_CHANNEL_NAME: &str = "Daily Quotes";

/// Daily reminder content
pub const DAILY_REMINDER_TITLE: &str = "\u{1F4D6} Daily Quote";
pub const DAILY_REMINDER_BODY: &str = "Open QuoteVault to read today's inspiration \u{2728}";

/// Backend table names
pub const QUOTES_TABLE: &str = "quotes";
pub const CATEGORIES_TABLE: &str = "categories";
pub const FAVORITES_TABLE: &str = "favorites";
