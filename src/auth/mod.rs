pub(crate) mod auth_errors;
pub(crate) mod auth_model;
pub(crate) mod auth_service;


// Re-export the public interface
pub use auth_model::{AuthSession, User};
pub use auth_service::AuthService;

// Re-export error types for convenience
pub use auth_errors::AuthError;
