//! Session token store
//!
//! [`TokenStore`] holds the one active bearer token. Every read observes a
//! complete earlier write: the token lives behind an [`ArcSwapOption`], so a
//! new token replaces the old one in a single atomic swap. A [`TokenStorage`]
//! slot keeps the token across reloads; the store reads it once on open.
//!
//! Requests that outlive the token they were sent with use the conditional
//! updates ([`TokenStore::replace_if`], [`TokenStore::clear_if`]) so a late
//! refresh result never touches a session that started after them.

use arc_swap::ArcSwapOption;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::{debug, warn};

/// Durable storage failures
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing storage cannot be reached
    #[error("Token storage unavailable: {0}")]
    Unavailable(String),

    /// Reading or writing the slot failed
    #[error("Token storage operation failed: {0}")]
    Operation(String),
}

/// A single durable string slot holding the raw token
pub trait TokenStorage: Send + Sync {
    fn load(&self) -> Result<Option<String>, StorageError>;
    fn save(&self, token: &str) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

/// Process-local storage, used natively and in tests
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStorage {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that already holds `token`, as if persisted by an earlier run
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(token.into()))),
        }
    }

    /// Current slot contents
    pub fn stored(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        let slot = self
            .slot
            .lock()
            .map_err(|_| StorageError::Unavailable("token slot lock poisoned".into()))?;
        Ok(slot.clone())
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| StorageError::Unavailable("token slot lock poisoned".into()))?;
        *slot = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| StorageError::Unavailable("token slot lock poisoned".into()))?;
        *slot = None;
        Ok(())
    }
}

/// Holder of the active bearer token
#[derive(Clone)]
pub struct TokenStore {
    active: Arc<ArcSwapOption<String>>,
    storage: Arc<dyn TokenStorage>,
    /// Serializes writers so memory and storage change together
    writer: Arc<Mutex<()>>,
}

impl TokenStore {
    /// Open the store, activating any token found in `storage`
    pub fn open(storage: Arc<dyn TokenStorage>) -> Self {
        let initial = match storage.load() {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "Failed to read persisted token");
                None
            }
        };
        if initial.is_some() {
            debug!("Restored persisted token");
        }

        Self {
            active: Arc::new(ArcSwapOption::new(initial.map(Arc::new))),
            storage,
            writer: Arc::new(Mutex::new(())),
        }
    }

    /// Store backed by a fresh [`MemoryTokenStorage`]
    pub fn in_memory() -> Self {
        Self::open(Arc::new(MemoryTokenStorage::new()))
    }

    /// Make `token` the active token and persist it
    pub fn set_token(&self, token: impl Into<String>) {
        let token = Arc::new(token.into());
        let _writer = self.lock_writer();
        self.persist(&token);
        self.active.store(Some(token));
    }

    /// The active token, if any
    pub fn get_token(&self) -> Option<String> {
        self.active.load_full().map(|token| token.as_ref().clone())
    }

    /// Handle on the active token for a later [`replace_if`](Self::replace_if)
    /// or [`clear_if`](Self::clear_if). Handles compare by identity: a token
    /// stored again with the same text is still a different token.
    pub fn current(&self) -> Option<Arc<String>> {
        self.active.load_full()
    }

    pub fn has_token(&self) -> bool {
        self.active.load().is_some()
    }

    /// Drop the active token from memory and storage
    pub fn clear_token(&self) {
        let _writer = self.lock_writer();
        self.active.store(None);
        self.forget();
    }

    /// Replace the active token with `token`, but only while `expected` is
    /// still the active one. Returns whether the swap happened.
    pub fn replace_if(&self, expected: &Option<Arc<String>>, token: impl Into<String>) -> bool {
        self.install_if(expected, Arc::new(token.into()))
    }

    /// Clear the store, but only while `expected` is still the active token.
    /// Returns whether anything was cleared.
    pub fn clear_if(&self, expected: &Option<Arc<String>>) -> bool {
        if expected.is_none() {
            return false;
        }
        let _writer = self.lock_writer();
        let previous = self.active.compare_and_swap(expected, None);
        if !same_token(&previous, expected) {
            debug!("Token changed since the request was sent, keeping it");
            return false;
        }
        self.forget();
        true
    }

    /// [`replace_if`](Self::replace_if) keeping the caller's handle on the
    /// new token
    pub(crate) fn install_if(&self, expected: &Option<Arc<String>>, token: Arc<String>) -> bool {
        let _writer = self.lock_writer();
        let previous = self
            .active
            .compare_and_swap(expected, Some(Arc::clone(&token)));
        if !same_token(&previous, expected) {
            debug!("Token changed since the request was sent, discarding replacement");
            return false;
        }
        self.persist(&token);
        true
    }

    fn lock_writer(&self) -> MutexGuard<'_, ()> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, token: &str) {
        if let Err(e) = self.storage.save(token) {
            warn!(error = %e, "Failed to persist token");
        }
    }

    fn forget(&self) {
        if let Err(e) = self.storage.clear() {
            warn!(error = %e, "Failed to clear persisted token");
        }
    }
}

fn same_token(a: &Option<Arc<String>>, b: &Option<Arc<String>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

impl fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenStore")
            .field("active", &self.has_token().then_some("<redacted>"))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStorage;

    impl TokenStorage for BrokenStorage {
        fn load(&self) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("no storage".into()))
        }

        fn save(&self, _token: &str) -> Result<(), StorageError> {
            Err(StorageError::Operation("quota exceeded".into()))
        }

        fn clear(&self) -> Result<(), StorageError> {
            Err(StorageError::Operation("denied".into()))
        }
    }

    #[test]
    fn test_set_then_get_round_trip() {
        let store = TokenStore::in_memory();
        assert_eq!(store.get_token(), None);

        store.set_token("t");
        assert_eq!(store.get_token().as_deref(), Some("t"));

        store.clear_token();
        assert_eq!(store.get_token(), None);
        assert!(!store.has_token());
    }

    #[test]
    fn test_new_token_supersedes_old() {
        let store = TokenStore::in_memory();
        store.set_token("first");
        store.set_token("second");
        assert_eq!(store.get_token().as_deref(), Some("second"));
    }

    #[test]
    fn test_token_is_persisted_and_cleared() {
        let storage = MemoryTokenStorage::new();
        let store = TokenStore::open(Arc::new(storage.clone()));

        store.set_token("abc");
        assert_eq!(storage.stored().as_deref(), Some("abc"));

        store.clear_token();
        assert_eq!(storage.stored(), None);
    }

    #[test]
    fn test_open_restores_persisted_token() {
        let store = TokenStore::open(Arc::new(MemoryTokenStorage::with_token("persisted")));
        assert_eq!(store.get_token().as_deref(), Some("persisted"));
    }

    #[test]
    fn test_empty_persisted_token_is_ignored() {
        let store = TokenStore::open(Arc::new(MemoryTokenStorage::with_token("")));
        assert!(!store.has_token());
    }

    #[test]
    fn test_clones_share_state() {
        let store = TokenStore::in_memory();
        let other = store.clone();
        store.set_token("shared");
        assert_eq!(other.get_token().as_deref(), Some("shared"));
    }

    #[test]
    fn test_storage_failures_do_not_block_memory() {
        let store = TokenStore::open(Arc::new(BrokenStorage));
        assert!(!store.has_token());

        store.set_token("still-active");
        assert_eq!(store.get_token().as_deref(), Some("still-active"));

        store.clear_token();
        assert!(!store.has_token());
    }

    #[test]
    fn test_replace_if_only_swaps_the_expected_token() {
        let storage = MemoryTokenStorage::new();
        let store = TokenStore::open(Arc::new(storage.clone()));
        store.set_token("old");
        let sent_with = store.current();

        assert!(store.replace_if(&sent_with, "refreshed"));
        assert_eq!(store.get_token().as_deref(), Some("refreshed"));
        assert_eq!(storage.stored().as_deref(), Some("refreshed"));

        // a second replacement from the same request is stale now
        assert!(!store.replace_if(&sent_with, "late"));
        assert_eq!(store.get_token().as_deref(), Some("refreshed"));
        assert_eq!(storage.stored().as_deref(), Some("refreshed"));
    }

    #[test]
    fn test_clear_if_keeps_a_newer_token() {
        let storage = MemoryTokenStorage::new();
        let store = TokenStore::open(Arc::new(storage.clone()));
        store.set_token("old");
        let sent_with = store.current();

        store.set_token("fresh");
        assert!(!store.clear_if(&sent_with));
        assert_eq!(store.get_token().as_deref(), Some("fresh"));
        assert_eq!(storage.stored().as_deref(), Some("fresh"));

        let current = store.current();
        assert!(store.clear_if(&current));
        assert!(!store.has_token());
        assert_eq!(storage.stored(), None);
    }

    #[test]
    fn test_same_text_is_still_a_new_token() {
        let store = TokenStore::in_memory();
        store.set_token("same");
        let sent_with = store.current();
        store.set_token("same");

        assert!(!store.clear_if(&sent_with));
        assert!(store.has_token());
    }

    #[test]
    fn test_clear_if_without_token_is_noop() {
        let store = TokenStore::in_memory();
        assert!(!store.clear_if(&None));
    }

    #[test]
    fn test_debug_redacts_token() {
        let store = TokenStore::in_memory();
        store.set_token("super-secret");
        let rendered = format!("{store:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("redacted"));
    }
}
