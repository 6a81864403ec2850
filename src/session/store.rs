//! Session state persistence
//!
//! A small trait seam over the storage backing plus the shipped JSON-file
//! implementation. Storage is advisory infrastructure: every failure path
//! degrades to "no prior state" rather than surfacing an error to the guard.

use super::record::{SessionRecord, SCHEMA_VERSION};
use crate::config::STATE_FILE_PREFIX;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur during state persistence
#[derive(Error, Debug)]
pub enum StoreError {
    /// Standard I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Error during JSON serialization or deserialization
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Interface for session-state backings
///
/// `load` is infallible by design: an unreadable or corrupt record is
/// indistinguishable from a missing one. Only writes can report failure, and
/// callers are expected to log and carry on.
#[cfg_attr(test, mockall::automock)]
pub trait SessionStore {
    /// Stored record for this key, or a fresh one if none is readable
    fn load(&self, key: &str) -> SessionRecord;

    /// Overwrite the stored record, atomically from the caller's view
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` when the record cannot be written.
    fn save(&self, key: &str, record: &SessionRecord) -> Result<(), StoreError>;

    /// Reinitialize the record to empty; invoked at session start
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` when the fresh record cannot be written.
    fn reset(&self, key: &str) -> Result<(), StoreError>;
}

/// JSON-file store, one `claude-delegation-{key}.json` per session
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    /// Create a store rooted at the given directory
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the state file for a session key
    #[must_use]
    pub fn state_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{STATE_FILE_PREFIX}{key}.json"))
    }

    fn read_record(path: &Path) -> Result<SessionRecord, StoreError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self, key: &str) -> SessionRecord {
        let path = self.state_path(key);
        match Self::read_record(&path) {
            Ok(record) if record.schema == SCHEMA_VERSION => record,
            Ok(record) => {
                warn!(
                    path = %path.display(),
                    schema = record.schema,
                    "Unrecognized session record schema, starting fresh"
                );
                SessionRecord::new()
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "No readable session record, starting fresh");
                SessionRecord::new()
            }
        }
    }

    fn save(&self, key: &str, record: &SessionRecord) -> Result<(), StoreError> {
        let path = self.state_path(key);
        // Write-then-rename so a concurrent load never sees a partial record.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(record)?)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn reset(&self, key: &str) -> Result<(), StoreError> {
        self.save(key, &SessionRecord::new())
    }
}

/// Session key for the current invocation.
///
/// Hook processes are spawned per event by the session's owning process, so
/// the parent pid identifies the session across invocations.
#[must_use]
pub fn session_key() -> String {
    #[cfg(unix)]
    let id = std::os::unix::process::parent_id();
    #[cfg(not(unix))]
    let id = std::process::id();
    id.to_string()
}
