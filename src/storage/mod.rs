pub(crate) mod memory_store;
pub(crate) mod sqlite_store;
pub(crate) mod storage_errors;
pub(crate) mod storage_traits;

// Re-export the public interface
pub use memory_store::MemoryStore;
pub use sqlite_store::SqliteStore;
pub use storage_traits::LocalStore;

// Re-export error types for convenience
pub use storage_errors::StoreError;
