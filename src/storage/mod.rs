use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub(crate) const WATCHLIST_KEY: &str = "watchlist";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageErrorKind {
    /// No window / localStorage disabled (private mode, sandboxed iframe).
    Unavailable,
    Read,
    Write,
    Parse,
    Serialize,
}

#[derive(Clone, Debug)]
pub struct StorageError {
    pub kind: StorageErrorKind,
    pub message: String,
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for StorageError {}

impl StorageError {
    fn unavailable() -> Self {
        Self {
            kind: StorageErrorKind::Unavailable,
            message: "localStorage is not available".to_string(),
        }
    }

    fn read(key: &str) -> Self {
        Self {
            kind: StorageErrorKind::Read,
            message: format!("failed to read `{key}`"),
        }
    }

    fn write(key: &str) -> Self {
        Self {
            kind: StorageErrorKind::Write,
            message: format!("failed to write `{key}`"),
        }
    }

    fn parse(key: &str, e: impl std::fmt::Display) -> Self {
        Self {
            kind: StorageErrorKind::Parse,
            message: format!("snapshot `{key}` is malformed: {e}"),
        }
    }

    fn serialize(key: &str, e: impl std::fmt::Display) -> Self {
        Self {
            kind: StorageErrorKind::Serialize,
            message: format!("cannot encode `{key}`: {e}"),
        }
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

/// String key/value durable storage.
///
/// Mirrors the subset of the Web Storage API we rely on. `get_item` returns
/// `Ok(None)` for a missing key.
pub trait SnapshotStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;
    fn remove_item(&self, key: &str) -> StorageResult<()>;
}

/// `window.localStorage`.
///
/// Looked up on every call rather than held, so the handle stays `Send` and
/// can live inside reactive signals.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> StorageResult<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or_else(StorageError::unavailable)
    }
}

impl SnapshotStorage for LocalStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|_| StorageError::read(key))
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|_| StorageError::write(key))
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        Self::storage()?
            .remove_item(key)
            .map_err(|_| StorageError::write(key))
    }
}

/// Process-local storage for tests and non-browser hosts.
///
/// Clones share the same backing map, like two handles to one origin's
/// localStorage.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let items = self.items.lock().map_err(|_| StorageError::read(key))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut items = self.items.lock().map_err(|_| StorageError::write(key))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        let mut items = self.items.lock().map_err(|_| StorageError::write(key))?;
        items.remove(key);
        Ok(())
    }
}

/// Read and decode `key`. A missing key is `Ok(None)`, not an error.
pub(crate) fn load_json<T: DeserializeOwned>(
    storage: &impl SnapshotStorage,
    key: &str,
) -> StorageResult<Option<T>> {
    let Some(json) = storage.get_item(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&json)
        .map(Some)
        .map_err(|e| StorageError::parse(key, e))
}

/// Encode `value` and overwrite whatever is stored under `key`.
pub(crate) fn save_json<T: Serialize>(
    storage: &impl SnapshotStorage,
    key: &str,
    value: &T,
) -> StorageResult<()> {
    let json = serde_json::to_string(value).map_err(|e| StorageError::serialize(key, e))?;
    storage.set_item(key, &json)
}
