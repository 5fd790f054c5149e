//! # Snapshot Backends
//!
//! Key-value blob storage for the serialized snapshot. A backend knows
//! nothing about POS data: it stores and returns strings under a key.
//!
//! ## Implementations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       SnapshotBackend                                   │
//! │                                                                         │
//! │  MemoryBackend                      FileBackend                        │
//! │  ─────────────                      ───────────                        │
//! │  • HashMap<String, String>          • <data_dir>/<key>.json            │
//! │  • Lost when dropped                • Write temp file, then rename     │
//! │  • Tests and throwaway sessions     • Survives restarts                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::PersistResult;

/// Where the snapshot blob lives.
pub trait SnapshotBackend {
    /// Returns the blob stored under `key`, or `None` if nothing was saved.
    fn load(&self, key: &str) -> PersistResult<Option<String>>;

    /// Replaces the blob stored under `key`.
    fn save(&mut self, key: &str, blob: &str) -> PersistResult<()>;

    /// Deletes the blob under `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> PersistResult<()>;
}

// =============================================================================
// Memory Backend
// =============================================================================

/// In-process backend.
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    slots: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotBackend for MemoryBackend {
    fn load(&self, key: &str) -> PersistResult<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn save(&mut self, key: &str, blob: &str) -> PersistResult<()> {
        self.slots.insert(key.to_string(), blob.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> PersistResult<()> {
        self.slots.remove(key);
        Ok(())
    }
}

// =============================================================================
// File Backend
// =============================================================================

/// One JSON file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Uses `dir` as the data directory. It is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileBackend { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SnapshotBackend for FileBackend {
    fn load(&self, key: &str) -> PersistResult<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(?path, "No stored snapshot");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, key: &str, blob: &str) -> PersistResult<()> {
        fs::create_dir_all(&self.dir)?;

        // A crash mid-write leaves the .tmp behind, never a truncated snapshot.
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&tmp, blob)?;
        fs::rename(&tmp, &path)?;

        debug!(?path, bytes = blob.len(), "Snapshot written");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> PersistResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}
