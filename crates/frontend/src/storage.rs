//! Browser-backed token persistence

use crate::config::AppConfig;
use docuchat_http::{StorageError, TokenStorage};
use web_sys::Storage;

/// Keeps the bearer token in `localStorage` under a single key
#[derive(Debug, Clone, Copy)]
pub struct BrowserTokenStorage {
    key: &'static str,
}

impl BrowserTokenStorage {
    pub const fn new() -> Self {
        Self::with_key(AppConfig::TOKEN_STORAGE_KEY)
    }

    pub const fn with_key(key: &'static str) -> Self {
        Self { key }
    }

    fn storage() -> Result<Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or_else(|| StorageError::Unavailable("localStorage is not accessible".into()))
    }
}

impl Default for BrowserTokenStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStorage for BrowserTokenStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(self.key)
            .map_err(|e| StorageError::Operation(format!("{e:?}")))
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(self.key, token)
            .map_err(|e| StorageError::Operation(format!("{e:?}")))
    }

    fn clear(&self) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(self.key)
            .map_err(|e| StorageError::Operation(format!("{e:?}")))
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_round_trip_through_local_storage() {
        let storage = BrowserTokenStorage::with_key("docuchat-test-token");
        storage.save("abc").unwrap();
        assert_eq!(storage.load().unwrap().as_deref(), Some("abc"));

        storage.clear().unwrap();
        assert_eq!(storage.load().unwrap(), None);
    }

    #[wasm_bindgen_test]
    fn test_token_is_stored_raw() {
        let storage = BrowserTokenStorage::with_key("docuchat-test-raw");
        storage.save("tok123").unwrap();

        let raw = BrowserTokenStorage::storage()
            .unwrap()
            .get_item("docuchat-test-raw")
            .unwrap();
        assert_eq!(raw.as_deref(), Some("tok123"));
        storage.clear().unwrap();
    }
}
