//! Key/value persistence for the session.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser build persists to `sessionStorage` through [`BrowserStorage`];
//! tests and native callers use [`MemoryStorage`]. Both sit behind
//! [`KeyValueStorage`], whose shape follows the Web Storage API so the
//! browser implementation stays a thin wrapper.


#[cfg(feature = "hydrate")]
mod browser;
mod memory;

#[cfg(feature = "hydrate")]
pub use browser::BrowserStorage;
pub use memory::MemoryStorage;

use serde::Serialize;
use serde::de::DeserializeOwned;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage operation failed: {0}")]
    Operation(String),
}

pub trait KeyValueStorage {
    /// Read `key`. `Ok(None)` when the key is absent.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backing store rejects the read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// # Errors
    ///
    /// Returns a [`StorageError`] if the write is rejected (e.g. quota).
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backing store rejects the removal.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;

    /// Remove every entry.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backing store rejects the clear.
    fn clear(&self) -> Result<(), StorageError>;
}

/// Read a string value, treating read failures as absent.
pub fn load_string(storage: &dyn KeyValueStorage, key: &str) -> Option<String> {
    match storage.get_item(key) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("storage read of '{key}' failed: {e}");
            None
        }
    }
}

/// Load a JSON value for `key`. Absent, unreadable, or unparsable values
/// all yield `None`.
pub fn load_json<T: DeserializeOwned>(storage: &dyn KeyValueStorage, key: &str) -> Option<T> {
    let raw = load_string(storage, key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::debug!("ignoring unparsable '{key}' in storage: {e}");
            None
        }
    }
}

/// Save a JSON value for `key`.
///
/// # Errors
///
/// Returns a [`StorageError`] if the value cannot be encoded or written.
pub fn save_json<T: Serialize>(storage: &dyn KeyValueStorage, key: &str, value: &T) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|e| StorageError::Operation(e.to_string()))?;
    storage.set_item(key, &raw)
}
