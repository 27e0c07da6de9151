//! BLAKE3 content hashing for tamper evidence.
//!
//! Computes a deterministic hash of all stored-state fields (excluding the
//! content_hash itself) so that a hand-edited or truncated file is detectable.

use serde::Serialize;
use socroi_core::BaseInputs;

use crate::{SnapshotId, StoredState, ViewMode};

/// Hashable representation of a StoredState (excludes content_hash).
#[derive(Serialize)]
struct HashableState<'a> {
    id: &'a SnapshotId,
    saved_at: &'a chrono::DateTime<chrono::Utc>,
    view_mode: &'a ViewMode,
    inputs: &'a BaseInputs,
}

/// Compute the BLAKE3 hash of a stored state's content.
///
/// Serializes all fields except `content_hash` to canonical JSON,
/// then hashes the bytes with BLAKE3. Returns the hex-encoded hash.
pub fn compute_state_hash(state: &StoredState) -> String {
    let hashable = HashableState {
        id: &state.id,
        saved_at: &state.saved_at,
        view_mode: &state.view_mode,
        inputs: &state.inputs,
    };

    let json = serde_json::to_vec(&hashable).expect("State serialization should not fail");
    blake3::hash(&json).to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_stable_and_sensitive_to_inputs() {
        let state = StoredState::new(BaseInputs::default(), ViewMode::Simple);
        assert_eq!(compute_state_hash(&state), compute_state_hash(&state.clone()));

        let mut changed = state.clone();
        changed.inputs.employee_count += 1.0;
        assert_ne!(compute_state_hash(&state), compute_state_hash(&changed));
    }

    #[test]
    fn hash_ignores_content_hash_field() {
        let state = StoredState::new(BaseInputs::default(), ViewMode::Advanced);
        let before = compute_state_hash(&state);
        let sealed = state.seal();
        assert_eq!(sealed.content_hash.as_deref(), Some(before.as_str()));
    }
}
