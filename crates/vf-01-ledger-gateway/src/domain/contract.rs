//! # Records Contract
//!
//! State and rules of the confidential records contract.
//!
//! ## Rules
//!
//! - `create`: the id is unused, the name is non-empty, and the input proof
//!   binds the handle to (this contract, sender).
//! - `verify`: the record exists and is unverified, the clear values are one
//!   ABI word, and the decryption proof covers exactly this record's handle
//!   and those clear values. Success flips the record to verified for good.

use crate::error::RevertReason;
use crate::ports::NewRecord;
use shared_crypto::{decode_clear_values, ProofAuthority};
use shared_types::{
    AbiEncodedValues, ContractAddress, DecryptionProof, Identity, LedgerEntry, RecordId,
    Timestamp,
};
use std::collections::HashMap;

/// Contract storage plus the proof key it checks against.
#[derive(Debug)]
pub struct RecordsContract {
    address: ContractAddress,
    authority: ProofAuthority,
    entries: HashMap<RecordId, LedgerEntry>,
    order: Vec<RecordId>,
}

impl RecordsContract {
    pub fn new(address: ContractAddress, authority: ProofAuthority) -> Self {
        Self {
            address,
            authority,
            entries: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn address(&self) -> ContractAddress {
        self.address
    }

    /// Execute `create_record` sent by `sender` at block time `now`.
    pub fn create(
        &mut self,
        sender: &Identity,
        record: NewRecord,
        now: Timestamp,
    ) -> Result<(), RevertReason> {
        if self.entries.contains_key(&record.id) {
            return Err(RevertReason::DuplicateRecord);
        }
        if record.title.trim().is_empty() {
            return Err(RevertReason::EmptyField("name"));
        }
        if record.description.trim().is_empty() {
            return Err(RevertReason::EmptyField("description"));
        }
        self.authority
            .verify_input_proof(&record.input.proof, &record.input.handle, &self.address, sender)
            .map_err(|_| RevertReason::InvalidInputProof)?;

        let entry = LedgerEntry {
            name: record.title,
            description: record.description,
            public_value: record.public_value,
            created_at: now,
            creator: *sender,
            is_verified: false,
            decrypted_value: 0,
            ciphertext_handle: record.input.handle,
        };
        self.order.push(record.id.clone());
        self.entries.insert(record.id, entry);
        Ok(())
    }

    /// Execute `submit_verification` for `id`, returning the stored plaintext.
    pub fn verify(
        &mut self,
        id: &RecordId,
        clear_values: &AbiEncodedValues,
        proof: &DecryptionProof,
    ) -> Result<u64, RevertReason> {
        let entry = self.entries.get_mut(id).ok_or(RevertReason::UnknownRecord)?;
        if entry.is_verified {
            return Err(RevertReason::AlreadyVerified);
        }

        let values = decode_clear_values(clear_values)
            .map_err(|e| RevertReason::MalformedClearValues(e.to_string()))?;
        let [value] = values.as_slice() else {
            return Err(RevertReason::MalformedClearValues(format!(
                "expected 1 value, got {}",
                values.len()
            )));
        };

        self.authority
            .verify_decryption_proof(proof, &[entry.ciphertext_handle], clear_values)
            .map_err(|_| RevertReason::InvalidDecryptionProof)?;

        entry.is_verified = true;
        entry.decrypted_value = *value;
        Ok(*value)
    }

    pub fn entry(&self, id: &RecordId) -> Option<&LedgerEntry> {
        self.entries.get(id)
    }

    /// Ids in creation order.
    pub fn ids(&self) -> &[RecordId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
