//! socroi-store: Tamper-evident persistence of calculator inputs.
//!
//! Only the base (non-derived) inputs and the view-mode flag are stored.
//! Derived fields are regenerated by the engine on restore. Each stored
//! snapshot is content-hashed with BLAKE3 so a hand-edited or corrupted
//! file is detected and replaced by defaults instead of reaching the engine.

pub mod hash;
pub mod store;

pub use store::{load_or_default, FileStateStore, MemoryStateStore, StateStore, StoreError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use socroi_core::BaseInputs;
use uuid::Uuid;

// ── Core Types ───────────────────────────────────────────────────

/// Unique identifier for a saved snapshot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SnapshotId(pub Uuid);

impl SnapshotId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SnapshotId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How much detail the front end renders.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Headline results only.
    #[default]
    Simple,
    /// Results plus derived inputs and the value breakdown.
    Advanced,
}

impl std::str::FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "simple" => Ok(Self::Simple),
            "advanced" => Ok(Self::Advanced),
            _ => Err(format!("Invalid view mode: {s}. Choose: simple, advanced")),
        }
    }
}

/// A single user's last-entered inputs plus UI state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredState {
    pub id: SnapshotId,
    pub saved_at: DateTime<Utc>,
    #[serde(default)]
    pub view_mode: ViewMode,
    pub inputs: BaseInputs,
    /// BLAKE3 content hash (hex), set by `seal`.
    pub content_hash: Option<String>,
}

impl StoredState {
    /// Start a new, unsealed snapshot.
    pub fn new(inputs: BaseInputs, view_mode: ViewMode) -> Self {
        Self {
            id: SnapshotId::new(),
            saved_at: Utc::now(),
            view_mode,
            inputs,
            content_hash: None,
        }
    }

    /// Compute and return the BLAKE3 hash of the snapshot's content.
    pub fn compute_hash(&self) -> String {
        hash::compute_state_hash(self)
    }

    /// Set the content hash. Only sealed snapshots can be saved.
    pub fn seal(mut self) -> Self {
        self.content_hash = Some(self.compute_hash());
        self
    }

    /// Verify that the stored content_hash matches a freshly computed hash.
    pub fn verify_integrity(&self) -> bool {
        match &self.content_hash {
            Some(stored) => stored == &self.compute_hash(),
            None => false,
        }
    }
}

impl Default for StoredState {
    fn default() -> Self {
        Self::new(BaseInputs::default(), ViewMode::default())
    }
}
