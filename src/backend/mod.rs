pub(crate) mod backend_client;
pub(crate) mod backend_errors;
pub(crate) mod memory_backend;
pub(crate) mod supabase_client;

// Re-export the public interface
pub use backend_client::{AuthBackend, BackendClient, Filter, OrderBy};
pub use memory_backend::MemoryBackend;
pub use supabase_client::SupabaseClient;

// Re-export error types for convenience
pub use backend_errors::BackendError;
