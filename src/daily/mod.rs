pub(crate) mod daily_errors;
pub(crate) mod daily_quote_service;

#[cfg(test)]
mod daily_quote_service_test;

// Re-export the public interface
pub use daily_quote_service::DailyQuoteService;

// Re-export error types for convenience
pub use daily_errors::DailyQuoteError;
