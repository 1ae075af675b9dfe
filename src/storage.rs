//! Key-value persistence scopes backing the identity store.
//!
//! DESIGN
//! ======
//! Two scopes exist per client: a per-session scope that lives as long as
//! the process (`MemoryStore`) and a durable scope that survives restarts
//! (`FileStore`). Both sit behind `KeyValueStore` so the identity store
//! never reaches for ambient globals and tests can inject plain maps.
//!
//! TRADE-OFFS
//! ==========
//! `FileStore` re-reads the document on every access instead of caching it.
//! Two values are stored in total, so the extra read is cheaper than keeping
//! a cache coherent with other processes sharing the same file.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use crate::error::StorageError;

/// Storage key for the per-session identifier.
pub const SESSION_ID_KEY: &str = "sessionId";
/// Storage key for the durable per-device user identifier.
pub const USER_ID_KEY: &str = "userId";

/// String key-value scope.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// In-process scope. Cleared when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.values.read().map_err(|_| StorageError::Poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.values.write().map_err(|_| StorageError::Poisoned)?;
        values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut values = self.values.write().map_err(|_| StorageError::Poisoned)?;
        values.remove(key);
        Ok(())
    }
}

// =============================================================================
// FILE STORE
// =============================================================================

/// Durable scope persisted as a flat JSON object (`{"userId": "..."}`).
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Create a store backed by `path`. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(io_error(&self.path, &e)),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|e| StorageError::Corrupt(e.to_string()))
    }

    fn write_document(&self, document: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| io_error(parent, &e))?;
            }
        }
        let raw = serde_json::to_string_pretty(document).map_err(|e| StorageError::Corrupt(e.to_string()))?;

        // Write beside the target and rename so readers never see a torn file.
        let staging = self.path.with_extension("tmp");
        std::fs::write(&staging, raw).map_err(|e| io_error(&staging, &e))?;
        std::fs::rename(&staging, &self.path).map_err(|e| io_error(&self.path, &e))
    }

    fn update(&self, edit: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().map_err(|_| StorageError::Poisoned)?;
        let mut document = self.read_document()?;
        edit(&mut document);
        self.write_document(&document)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_document()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|document| {
            document.insert(key.to_owned(), value.to_owned());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.update(|document| {
            document.remove(key);
        })
    }
}

fn io_error(path: &Path, err: &std::io::Error) -> StorageError {
    StorageError::Io { path: path.display().to_string(), message: err.to_string() }
}
