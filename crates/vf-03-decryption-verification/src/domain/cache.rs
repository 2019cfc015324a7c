//! # Local Decryption Cache
//!
//! Plaintexts obtained by local decryption, held until the ledger's
//! confirmed value supersedes them. Never authoritative.
//!
//! Cleared per record when verification completes or the detail view
//! closes, and wholesale on disconnect.

use parking_lot::RwLock;
use shared_types::RecordId;
use std::collections::HashMap;

/// Per-session cache of locally decrypted values.
#[derive(Debug, Default)]
pub struct LocalDecryptionCache {
    entries: RwLock<HashMap<RecordId, u64>>,
}

impl LocalDecryptionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self, id: &RecordId, plaintext: u64) {
        self.entries.write().insert(id.clone(), plaintext);
    }

    pub fn get(&self, id: &RecordId) -> Option<u64> {
        self.entries.read().get(id).copied()
    }

    /// Drop the entry for `id`, returning it.
    pub fn clear(&self, id: &RecordId) -> Option<u64> {
        self.entries.write().remove(id)
    }

    pub fn clear_all(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
