/// Durable key-value store
///
/// This module provides the storage substrate the services persist into:
/// a `Store` trait with synchronous `get`/`set`/`remove` over string keys
/// and string values (browser local-storage semantics), plus two backends:
///
/// - `memory`: process-lifetime map, used in tests and ephemeral runs
/// - `file`: one file per bucket under a data directory, surviving restarts
///
/// Services receive the store as an explicit `Arc<dyn Store>` at
/// construction; there is no ambient global storage.
///
/// # Atomicity
///
/// Atomicity is per key only. Services read a whole bucket, mutate a local
/// copy, and write it back, so two concurrent writers to the same bucket
/// can lose an update. Single-writer-at-a-time usage is the assumed
/// contract.
///
/// # Bucket layout
///
/// Four fixed keys, each holding a JSON document:
///
/// | Key            | Contents                      |
/// |----------------|-------------------------------|
/// | `app_users`    | array of `User`               |
/// | `current_user` | single `User`, or absent      |
/// | `auth_token`   | raw token string, or absent   |
/// | `app_tasks`    | array of `Task`               |
pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Fixed bucket keys
pub mod keys {
    /// All registered users, in insertion order
    pub const USERS: &str = "app_users";

    /// Cached record of the currently authenticated user
    pub const CURRENT_USER: &str = "current_user";

    /// Session token issued at login
    pub const TOKEN: &str = "auth_token";

    /// All tasks across users, in insertion order
    pub const TASKS: &str = "app_tasks";
}

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Underlying I/O failure (file backend)
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A bucket held data that could not be decoded
    #[error("Corrupt bucket {key}: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be encoded for storage
    #[error("Failed to encode value for bucket {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Synchronous string key-value storage
///
/// `get` returns `None` for absent keys. `remove` of an absent key is a
/// no-op. Implementations must be safe to share across tasks.
pub trait Store: Send + Sync {
    /// Reads the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Deletes the value under `key`; absent keys are ignored
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Reads and decodes the JSON document stored under `key`
///
/// Returns `Ok(None)` when the key is absent. An undecodable document is a
/// `StoreError::Corrupt`, not silently discarded.
pub fn read_json<T: DeserializeOwned>(
    store: &dyn Store,
    key: &str,
) -> Result<Option<T>, StoreError> {
    match store.get(key)? {
        Some(raw) => {
            let value = serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
                key: key.to_string(),
                source,
            })?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

/// Encodes `value` as JSON and stores it under `key`
pub fn write_json<T: Serialize>(
    store: &dyn Store,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &raw)
}
