//! Durable key-value storage for shopper state.
//!
//! The storefront persists two string values (the serialized cart and the
//! serialized favorites) under fixed keys. Backends only move strings; they
//! never interpret the values.
//!
//! - [`FileStore`] - one file per key inside a data directory
//! - [`MemoryStore`] - `HashMap` behind a lock, for tests and ephemeral runs

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors from storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error from the underlying filesystem.
    #[error("I/O error on {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The key cannot be mapped to a storage location.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// Internal lock was poisoned by a panicking writer.
    #[error("storage lock poisoned")]
    LockPoisoned,
}

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// String key-value store with whole-value replace semantics.
///
/// Implementations must guarantee that a `get` never observes a partially
/// written value.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing is stored.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}

/// Keys are restricted to ASCII letters, digits, `-` and `_` so that every
/// backend can use them verbatim as file names.
fn validate_key(key: &str) -> StorageResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
