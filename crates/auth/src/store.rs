//! Session persistence.
//!
//! The record is a single JSON document so token and role can never be seen
//! half-written. The file store writes a sibling temp file and renames it over
//! the target.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;

use crate::PersistedSession;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session storage I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("persisted session is unreadable: {0}")]
    Corrupt(String),

    #[error("session storage is unavailable")]
    Unavailable,
}

/// Backing medium for the session record.
///
/// `load` returning `Ok(None)` is the normal "nobody signed in" case.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<PersistedSession>, StoreError>;

    /// Overwrite any prior record.
    fn save(&self, record: &PersistedSession) -> Result<(), StoreError>;

    /// Remove the record. Clearing an empty store succeeds.
    fn clear(&self) -> Result<(), StoreError>;
}

/// Process-local store. Used in tests and when no data directory exists.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    record: Mutex<Option<PersistedSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: PersistedSession) -> Self {
        Self {
            record: Mutex::new(Some(record)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<PersistedSession>, StoreError> {
        let guard = self.record.lock().map_err(|_| StoreError::Unavailable)?;
        Ok(guard.clone())
    }

    fn save(&self, record: &PersistedSession) -> Result<(), StoreError> {
        let mut guard = self.record.lock().map_err(|_| StoreError::Unavailable)?;
        *guard = Some(record.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut guard = self.record.lock().map_err(|_| StoreError::Unavailable)?;
        *guard = None;
        Ok(())
    }
}

/// JSON file store (`{"token": ..., "rol": ...}`).
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "session.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<PersistedSession>, StoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StoreError::Corrupt(format!("{}: {e}", self.path.display())))
    }

    fn save(&self, record: &PersistedSession) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let body = serde_json::to_vec_pretty(record)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;

        let tmp = self.temp_path();
        std::fs::write(&tmp, body)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
