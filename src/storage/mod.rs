//! Key-value persistence layer
//!
//! - `KeyValueStore` - get/set/remove of text blobs by key
//! - `FileStore` - one JSON file per key under a data directory
//! - `MemoryStore` - in-process map, for tests and ephemeral sessions

mod file_system;
mod memory;

pub use file_system::FileStore;
pub use memory::MemoryStore;

use crate::error::StorageError;

/// Durable text storage addressed by a fixed key
///
/// Implementations must make `set` visible to any later `get` on the same
/// store, including one from a fresh instance over the same backing medium.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Keys are restricted to `[A-Za-z0-9_-]` so they map safely onto file names
pub(crate) fn check_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
