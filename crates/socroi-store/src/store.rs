//! State storage: trait plus file-backed and in-memory implementations.
//!
//! The store holds exactly one snapshot: the last inputs a user entered.
//! Callers should go through `load_or_default`, which never fails.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{SnapshotId, StoredState};

/// Errors that can occur during state storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Integrity check failed for snapshot {0}: stored hash does not match content")]
    IntegrityViolation(SnapshotId),

    #[error("State has no content hash (not sealed)")]
    NotSealed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Load/save port for the calculator's persisted state.
pub trait StateStore {
    /// Retrieve the stored snapshot, verifying integrity.
    /// Returns `Ok(None)` when nothing has been saved.
    fn load(&self) -> Result<Option<StoredState>, StoreError>;

    /// Replace the stored snapshot. Returns an error if the state is not sealed.
    fn save(&self, state: &StoredState) -> Result<(), StoreError>;

    /// Remove the stored snapshot, if any.
    fn clear(&self) -> Result<(), StoreError>;
}

/// Load the stored snapshot, falling back to defaults when it is missing,
/// unreadable, or fails its integrity check.
pub fn load_or_default(store: &dyn StateStore) -> StoredState {
    match store.load() {
        Ok(Some(state)) => state,
        Ok(None) => {
            tracing::debug!("No stored state, using defaults");
            StoredState::default()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Discarding stored state, using defaults");
            StoredState::default()
        }
    }
}

/// File-system backed state store.
///
/// Keeps a single pretty-printed JSON document. Writes go to a sibling
/// temporary file first and are renamed into place.
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
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
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl StateStore for FileStateStore {
    fn load(&self) -> Result<Option<StoredState>, StoreError> {
        if !self.path.is_file() {
            return Ok(None);
        }

        let json = fs::read_to_string(&self.path)?;
        let state: StoredState = serde_json::from_str(&json)?;

        if !state.verify_integrity() {
            return Err(StoreError::IntegrityViolation(state.id));
        }

        tracing::debug!(
            snapshot_id = %state.id,
            path = %self.path.display(),
            "State loaded"
        );

        Ok(Some(state))
    }

    fn save(&self, state: &StoredState) -> Result<(), StoreError> {
        if state.content_hash.is_none() {
            return Err(StoreError::NotSealed);
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(state)?;
        let tmp = self.temp_path();
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        tracing::debug!(
            snapshot_id = %state.id,
            path = %self.path.display(),
            "State saved"
        );

        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory state store for tests and embedding.
#[derive(Default)]
pub struct MemoryStateStore {
    state: RefCell<Option<StoredState>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStateStore {
    fn load(&self) -> Result<Option<StoredState>, StoreError> {
        match self.state.borrow().as_ref() {
            Some(state) if !state.verify_integrity() => {
                Err(StoreError::IntegrityViolation(state.id))
            }
            other => Ok(other.cloned()),
        }
    }

    fn save(&self, state: &StoredState) -> Result<(), StoreError> {
        if state.content_hash.is_none() {
            return Err(StoreError::NotSealed);
        }
        *self.state.borrow_mut() = Some(state.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.state.borrow_mut().take();
        Ok(())
    }
}
