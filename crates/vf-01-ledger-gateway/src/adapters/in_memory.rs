//! In-memory ledger
//!
//! Executes contract calls at submission time and hands out receipts that
//! become available after a configurable confirmation delay.

use crate::domain::RecordsContract;
use crate::error::{LedgerError, LedgerResult};
use crate::ports::NewRecord;
use parking_lot::RwLock;
use shared_crypto::{keccak256, ProofAuthority};
use shared_types::{
    AbiEncodedValues, CiphertextHandle, ContractAddress, DecryptionProof, Identity, LedgerEntry,
    RecordId, Timestamp, TxHash, TxReceipt,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, info, warn};

/// In-memory ledger configuration
#[derive(Clone, Debug)]
pub struct InMemoryLedgerConfig {
    /// Time between submission and inclusion
    pub confirmation_delay: Duration,
}

impl Default for InMemoryLedgerConfig {
    fn default() -> Self {
        Self {
            confirmation_delay: Duration::from_millis(20),
        }
    }
}

struct LedgerState {
    contract: RecordsContract,
    receipts: HashMap<TxHash, TxReceipt>,
    block_number: u64,
    tx_nonce: u64,
    clock: Option<Timestamp>,
    // Fault injection
    unreadable: HashSet<RecordId>,
    plaintext_overrides: HashMap<RecordId, u64>,
}

impl LedgerState {
    fn now(&self) -> Timestamp {
        self.clock.unwrap_or_else(Timestamp::now)
    }

    fn next_receipt(&mut self, sender: &Identity) -> TxReceipt {
        self.tx_nonce += 1;
        self.block_number += 1;
        let tx_hash = TxHash(keccak256(&[
            b"veilform.tx",
            sender.as_bytes(),
            &self.tx_nonce.to_be_bytes(),
        ]));
        let receipt = TxReceipt {
            tx_hash,
            block_number: self.block_number,
            block_timestamp: self.now(),
        };
        self.receipts.insert(tx_hash, receipt.clone());
        receipt
    }
}

/// Simulated chain hosting one records contract.
pub struct InMemoryLedger {
    state: RwLock<LedgerState>,
    config: InMemoryLedgerConfig,
    available: AtomicBool,
    verification_submissions: AtomicU64,
}

impl InMemoryLedger {
    /// Ledger hosting a contract at `address` that trusts `authority`.
    pub fn new(address: ContractAddress, authority: ProofAuthority) -> Self {
        Self::with_config(address, authority, InMemoryLedgerConfig::default())
    }

    pub fn with_config(
        address: ContractAddress,
        authority: ProofAuthority,
        config: InMemoryLedgerConfig,
    ) -> Self {
        Self {
            state: RwLock::new(LedgerState {
                contract: RecordsContract::new(address, authority),
                receipts: HashMap::new(),
                block_number: 0,
                tx_nonce: 0,
                clock: None,
                unreadable: HashSet::new(),
                plaintext_overrides: HashMap::new(),
            }),
            config,
            available: AtomicBool::new(true),
            verification_submissions: AtomicU64::new(0),
        }
    }

    pub fn contract_address(&self) -> ContractAddress {
        self.state.read().contract.address()
    }

    // =========================================================================
    // TEST CONTROLS
    // =========================================================================

    /// Take the endpoint up or down.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Pin the block clock.
    pub fn set_time(&self, now: Timestamp) {
        self.state.write().clock = Some(now);
    }

    /// Make reads of `id` fail with `LedgerError::Unreadable`.
    pub fn mark_unreadable(&self, id: &RecordId) {
        self.state.write().unreadable.insert(id.clone());
    }

    /// Report `plaintext` for `id` once it is verified, whatever was proven.
    pub fn override_plaintext(&self, id: &RecordId, plaintext: u64) {
        self.state.write().plaintext_overrides.insert(id.clone(), plaintext);
    }

    // =========================================================================
    // INSPECTION
    // =========================================================================

    pub fn record_count(&self) -> usize {
        self.state.read().contract.len()
    }

    /// Number of confirmed transactions.
    pub fn transaction_count(&self) -> usize {
        self.state.read().receipts.len()
    }

    /// Number of `submit_verification` calls that reached the contract,
    /// reverted or not.
    pub fn verification_submissions(&self) -> u64 {
        self.verification_submissions.load(Ordering::SeqCst)
    }

    // =========================================================================
    // CONTRACT ACCESS (used by the views)
    // =========================================================================

    fn ensure_available(&self) -> LedgerResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(LedgerError::Unavailable("ledger endpoint unreachable".into()))
        }
    }

    pub(crate) fn read_ids(&self) -> LedgerResult<Vec<RecordId>> {
        self.ensure_available()?;
        Ok(self.state.read().contract.ids().to_vec())
    }

    pub(crate) fn read_entry(&self, id: &RecordId) -> LedgerResult<LedgerEntry> {
        self.ensure_available()?;
        let state = self.state.read();
        if state.unreadable.contains(id) {
            return Err(LedgerError::Unreadable {
                id: id.clone(),
                reason: "entry failed to decode".into(),
            });
        }
        let mut entry = state
            .contract
            .entry(id)
            .cloned()
            .ok_or_else(|| LedgerError::RecordNotFound(id.clone()))?;
        if entry.is_verified {
            if let Some(plaintext) = state.plaintext_overrides.get(id) {
                entry.decrypted_value = *plaintext;
            }
        }
        Ok(entry)
    }

    pub(crate) fn read_handle(&self, id: &RecordId) -> LedgerResult<CiphertextHandle> {
        self.read_entry(id).map(|entry| entry.ciphertext_handle)
    }

    pub(crate) fn is_deployed(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    pub(crate) fn execute_create(&self, sender: &Identity, record: NewRecord) -> LedgerResult<TxHash> {
        self.ensure_available()?;
        let id = record.id.clone();
        let mut state = self.state.write();
        let now = state.now();

        if let Err(reason) = state.contract.create(sender, record, now) {
            warn!(record_id = %id, sender = %sender.abbreviated(), %reason, "create_record reverted");
            return Err(LedgerError::Reverted(reason));
        }

        let receipt = state.next_receipt(sender);
        info!(record_id = %id, tx = %receipt.tx_hash, block = receipt.block_number, "Record created");
        Ok(receipt.tx_hash)
    }

    pub(crate) fn execute_verification(
        &self,
        sender: &Identity,
        id: &RecordId,
        clear_values: &AbiEncodedValues,
        proof: &DecryptionProof,
    ) -> LedgerResult<TxHash> {
        self.ensure_available()?;
        self.verification_submissions.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.write();

        match state.contract.verify(id, clear_values, proof) {
            Ok(plaintext) => {
                let receipt = state.next_receipt(sender);
                info!(record_id = %id, plaintext, tx = %receipt.tx_hash, "Record verified");
                Ok(receipt.tx_hash)
            }
            Err(reason) => {
                debug!(record_id = %id, %reason, "submit_verification reverted");
                Err(LedgerError::Reverted(reason))
            }
        }
    }

    pub(crate) async fn confirm(&self, tx: &TxHash) -> LedgerResult<TxReceipt> {
        tokio::time::sleep(self.config.confirmation_delay).await;
        self.ensure_available()?;
        self.state
            .read()
            .receipts
            .get(tx)
            .cloned()
            .ok_or(LedgerError::UnknownTransaction(*tx))
    }
}

impl std::fmt::Debug for InMemoryLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("InMemoryLedger")
            .field("contract", &state.contract.address())
            .field("records", &state.contract.len())
            .field("block_number", &state.block_number)
            .finish_non_exhaustive()
    }
}
