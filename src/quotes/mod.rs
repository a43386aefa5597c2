pub(crate) mod quotes_errors;
pub(crate) mod quotes_model;
pub(crate) mod quotes_repository;
pub(crate) mod quotes_search;
pub(crate) mod quotes_traits;


// Re-export the public interface
pub use quotes_model::{Category, Quote, QuoteScope};
pub use quotes_repository::QuoteRepository;
pub use quotes_search::filter_quotes;
pub use quotes_traits::QuoteRepositoryTrait;

// Re-export error types for convenience
pub use quotes_errors::QuoteError;
