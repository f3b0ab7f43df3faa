//! Web Storage backend. Requires a browser environment.

use super::{KeyValueStorage, StorageError};

fn js_error(e: &wasm_bindgen::JsValue) -> StorageError {
    StorageError::Operation(format!("{e:?}"))
}

/// `sessionStorage` of the current window.
pub struct BrowserStorage {
    inner: web_sys::Storage,
}

impl BrowserStorage {
    /// Tab-scoped storage; survives reloads, not new tabs.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] without a window or when the
    /// browser denies access.
    pub fn session() -> Result<Self, StorageError> {
        let window = web_sys::window().ok_or(StorageError::Unavailable)?;
        let inner = window
            .session_storage()
            .map_err(|e| js_error(&e))?
            .ok_or(StorageError::Unavailable)?;
        Ok(Self { inner })
    }
}

impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get_item(key).map_err(|e| js_error(&e))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.set_item(key, value).map_err(|e| js_error(&e))
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove_item(key).map_err(|e| js_error(&e))
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.inner.clear().map_err(|e| js_error(&e))
    }
}
