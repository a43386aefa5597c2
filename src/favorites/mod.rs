pub(crate) mod favorites_errors;
pub(crate) mod favorites_service;
pub(crate) mod favorites_traits;

#[cfg(test)]
mod favorites_service_test;

// Re-export the public interface
pub use favorites_service::FavoriteService;
pub use favorites_traits::FavoriteServiceTrait;

// Re-export error types for convenience
pub use favorites_errors::FavoriteError;
