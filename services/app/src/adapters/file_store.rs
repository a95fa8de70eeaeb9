//! services/app/src/adapters/file_store.rs
//!
//! File-backed implementations of the two storage ports: the persisted state
//! snapshot (JSON) and the opaque credential token. This is the durable
//! storage that survives a restart of the client.

use lawlens_core::persist::{PersistedSnapshot, SNAPSHOT_VERSION};
use lawlens_core::ports::{CredentialStore, PortError, PortResult, SnapshotStore};
use std::fs;
use std::path::PathBuf;
use tracing::warn;

//=========================================================================================
// Snapshot Storage
//=========================================================================================

/// A `SnapshotStore` that keeps the snapshot as a single JSON file.
#[derive(Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SnapshotStore for FileSnapshotStore {
    /// Loads the last snapshot. A missing file is a clean first start; an
    /// unreadable or unparsable file is reported as an error so the store
    /// can fall back to defaults.
    fn load(&self) -> PortResult<Option<PersistedSnapshot>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PortError::Unexpected(e.to_string())),
        };

        let snapshot: PersistedSnapshot = serde_json::from_str(&contents)
            .map_err(|e| PortError::Unexpected(format!("corrupt snapshot file: {e}")))?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(PortError::Unexpected(format!(
                "unsupported snapshot version {}",
                snapshot.version
            )));
        }
        Ok(Some(snapshot))
    }

    /// Writes the snapshot to a sibling temp file first and renames it into
    /// place, so a crash mid-write can never leave a truncated snapshot.
    fn save(&self, snapshot: &PersistedSnapshot) -> PortResult<()> {
        let json = serde_json::to_string_pretty(snapshot)
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json).map_err(|e| PortError::Unexpected(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(())
    }
}

//=========================================================================================
// Credential Storage
//=========================================================================================

/// A `CredentialStore` that keeps the token in a plain file, created on
/// login and removed on logout.
#[derive(Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The stored token, if any. Used when attaching credentials to
    /// authenticated backend calls.
    pub fn current_token(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(token) => Some(token),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Failed to read credential token: {e}");
                None
            }
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn store_token(&self, token: &str) -> PortResult<()> {
        fs::write(&self.path, token).map_err(|e| PortError::Unexpected(e.to_string()))
    }

    fn clear_token(&self) -> PortResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PortError::Unexpected(e.to_string())),
        }
    }
}
