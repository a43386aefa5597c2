use super::storage_errors::StoreError;

/// Opaque string-keyed persistence on the device. Owns the daily quote
/// records and the cached auth session; the hosted backend never sees
/// either.
pub trait LocalStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&self, key: &str) -> Result<(), StoreError>;

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError>;
}
