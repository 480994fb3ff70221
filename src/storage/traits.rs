//! Storage trait definitions

use crate::errors::StoreError;

pub type StoreResult<T> = Result<T, StoreError>;

/// Durable string-to-string store with no expiry. Entries stay until they
/// are explicitly removed.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
    fn remove(&self, key: &str) -> StoreResult<()>;
}
