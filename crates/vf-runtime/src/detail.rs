//! # Detail View
//!
//! An open record detail. Owns the scope that operations started from the
//! view run under; dropping the view closes that scope and clears the
//! record's local decryption.

use shared_types::{OperationScope, Record, RecordId, ScopeHandle};
use std::sync::Arc;
use tracing::debug;
use vf_03_decryption_verification::LocalDecryptionCache;

pub struct DetailView {
    record_id: RecordId,
    scope: OperationScope,
    _handle: ScopeHandle,
    cache: Arc<LocalDecryptionCache>,
}

impl DetailView {
    pub(crate) fn open(record_id: RecordId, cache: Arc<LocalDecryptionCache>) -> Self {
        let (handle, scope) = OperationScope::new();
        debug!(record_id = %record_id, "Detail view opened");
        Self {
            record_id,
            scope,
            _handle: handle,
            cache,
        }
    }

    pub fn record_id(&self) -> &RecordId {
        &self.record_id
    }

    /// Scope of operations started from this view.
    pub fn scope(&self) -> &OperationScope {
        &self.scope
    }

    /// Locally decrypted value not yet superseded by the ledger.
    pub fn local_plaintext(&self) -> Option<u64> {
        self.cache.get(&self.record_id)
    }

    /// Ledger-confirmed plaintext if any, else the local decryption.
    pub fn displayed_value(&self, record: &Record) -> Option<u64> {
        record
            .verified_plaintext()
            .or_else(|| self.local_plaintext())
    }

    pub fn close(self) {}
}

impl Drop for DetailView {
    fn drop(&mut self) {
        self.cache.clear(&self.record_id);
        debug!(record_id = %self.record_id, "Detail view closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_clears_entry_and_scope() {
        let cache = Arc::new(LocalDecryptionCache::new());
        let id = RecordId::new("form-1");
        let other = RecordId::new("form-2");
        cache.store(&other, 9);

        let view = DetailView::open(id.clone(), cache.clone());
        cache.store(&id, 42);
        assert_eq!(view.local_plaintext(), Some(42));
        let scope = view.scope().clone();

        view.close();
        assert!(scope.is_closed());
        assert_eq!(cache.get(&id), None);
        assert_eq!(cache.get(&other), Some(9));
    }
}
