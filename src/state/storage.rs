//! Key/value persistence for state that outlives a process.
//!
//! Stores are small: every operation reads and rewrites the whole
//! collection. [`JsonFileStore`] keeps all keys in one JSON object on disk;
//! `MemoryStore` is the in-process equivalent used by tests.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;

use super::platform::paths::default_storage_path;

// ============================================================================
// Error Type
// ============================================================================

/// Errors raised by a persistence backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] io::Error),

    /// A value could not be serialized.
    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The platform has no data directory to keep the store in.
    #[error(
        "Could not determine data directory. Expected XDG_DATA_HOME or ~/.local/share on Linux, ~/Library/Application Support on macOS, %APPDATA% on Windows"
    )]
    NoDataDir,
}

// ============================================================================
// Trait
// ============================================================================

/// A string key/value store.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

type Entries = BTreeMap<String, String>;

// ============================================================================
// JSON File Store
// ============================================================================

/// Keeps every key in a single JSON object file.
///
/// A missing file is an empty store. A file that does not parse is logged
/// and treated as empty; the next write replaces it.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Opens the store in the platform data directory.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NoDataDir` if the platform has none.
    pub fn open_default() -> Result<Self, StorageError> {
        default_storage_path()
            .map(Self::new)
            .ok_or(StorageError::NoDataDir)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Entries, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(Entries::new());
        }

        match serde_json::from_str(&content) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "ignoring unreadable store: {e}");
                Ok(Entries::new())
            }
        }
    }

    fn write_entries(&self, entries: &Entries) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    fn update(&self, apply: impl FnOnce(&mut Entries)) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read_entries()?;
        apply(&mut entries);
        self.write_entries(&entries)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

// ============================================================================
// Memory Store
// ============================================================================

/// In-memory store.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<Entries>,
}

#[cfg(test)]
impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries().remove(key);
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
