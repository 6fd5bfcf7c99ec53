//! Whole-file JSON snapshots of an `InventoryStore`.
//!
//! The on-disk document is a flat JSON object mapping item name to quantity,
//! pretty-printed with 2-space indentation. Every save rewrites the full file.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::item::{ItemName, Quantity};
use crate::store::InventoryStore;

/// File used when the caller does not name one.
pub const DEFAULT_INVENTORY_FILE: &str = "inventory.json";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize inventory: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl PersistenceError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// What `InventoryStore::load` found at the source path.
///
/// Only `Loaded` keeps data; the other two leave the store empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded { items: usize },
    NotFound,
    Malformed { reason: String },
}

impl InventoryStore {
    /// Replace the whole store with the snapshot at `path`.
    ///
    /// A missing or unparseable file resets the store to empty and is reported
    /// through the returned outcome. Other read failures leave the store
    /// untouched and return an error.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<LoadOutcome, PersistenceError> {
        let path = path.as_ref();

        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                self.items.clear();
                tracing::info!(
                    path = %path.display(),
                    "File {} not found. Starting with empty inventory.",
                    path.display()
                );
                return Ok(LoadOutcome::NotFound);
            }
            // Non-UTF-8 content.
            Err(err) if err.kind() == io::ErrorKind::InvalidData => {
                return Ok(self.reset_malformed(path, err.to_string()));
            }
            Err(err) => {
                let err = PersistenceError::io(path, err);
                tracing::error!(error = %err, "error loading inventory");
                return Err(err);
            }
        };

        match serde_json::from_str::<BTreeMap<ItemName, Quantity>>(&raw) {
            Ok(items) => {
                let count = items.len();
                self.items = items;
                tracing::info!(path = %path.display(), items = count, "Data loaded from {}", path.display());
                Ok(LoadOutcome::Loaded { items: count })
            }
            Err(err) => Ok(self.reset_malformed(path, err.to_string())),
        }
    }

    fn reset_malformed(&mut self, path: &Path, reason: String) -> LoadOutcome {
        self.items.clear();
        tracing::error!(
            path = %path.display(),
            reason = %reason,
            "Error reading {}. Starting with empty inventory.",
            path.display()
        );
        LoadOutcome::Malformed { reason }
    }

    /// Write the whole store to `path`, replacing any previous content.
    ///
    /// The snapshot goes to a uniquely named temporary file in the destination's
    /// directory and is renamed into place once synced. A symlinked destination
    /// is resolved first so the link's target receives the new content.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
        let path = path.as_ref();
        match self.write_snapshot(path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), items = self.len(), "Data saved to {}", path.display());
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = %err, "Error saving data");
                Err(err)
            }
        }
    }

    fn write_snapshot(&self, path: &Path) -> Result<(), PersistenceError> {
        let mut body = serde_json::to_string_pretty(&self.items)?;
        body.push('\n');

        let target = resolve_destination(path).map_err(|e| PersistenceError::io(path, e))?;
        write_and_persist(&target, body.as_bytes()).map_err(|e| PersistenceError::io(path, e))
    }
}

/// Follow symlinks on an existing destination; a missing one is used as given.
fn resolve_destination(path: &Path) -> io::Result<PathBuf> {
    match fs::canonicalize(path) {
        Ok(resolved) => Ok(resolved),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(path.to_path_buf()),
        Err(err) => Err(err),
    }
}

// The temp file is deleted on drop if anything fails before `persist`.
fn write_and_persist(target: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;
    temp.persist(target).map_err(|err| err.error)?;
    Ok(())
}
