//! # Record Cache
//!
//! Client-local copy of the ledger's record set, replaced wholesale on
//! every refresh. Verification state only moves forward: an older read that
//! still shows a record unverified never hides a verification the client
//! has already seen.

use parking_lot::RwLock;
use shared_types::{Record, RecordId, Verification};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct RecordCache {
    records: RwLock<Vec<Record>>,
}

impl RecordCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the set, keeping known verifications.
    pub fn replace_all(&self, fresh: Vec<Record>) {
        let mut records = self.records.write();
        let known: HashMap<&RecordId, _> = records
            .iter()
            .map(|r| (&r.id, r.verification))
            .collect();

        let merged = fresh
            .into_iter()
            .map(|mut record| {
                if let Some(previous) = known.get(&record.id) {
                    record.verification = previous.advance(record.verification);
                }
                record
            })
            .collect();
        drop(known);
        *records = merged;
    }

    /// Fold a single newer observation of one record.
    pub fn upsert(&self, record: Record) {
        let mut records = self.records.write();
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => {
                let verification = existing.verification.advance(record.verification);
                *existing = record;
                existing.verification = verification;
            }
            None => records.push(record),
        }
    }

    /// Record a confirmed plaintext for a cached record.
    pub fn mark_verified(&self, id: &RecordId, plaintext: u64) -> bool {
        let mut records = self.records.write();
        match records.iter_mut().find(|r| r.id == *id) {
            Some(record) => {
                record.verification = record
                    .verification
                    .advance(Verification::Verified { plaintext });
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &RecordId) -> Option<Record> {
        self.records.read().iter().find(|r| r.id == *id).cloned()
    }

    pub fn snapshot(&self) -> Vec<Record> {
        self.records.read().clone()
    }

    pub fn clear(&self) {
        self.records.write().clear();
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}
