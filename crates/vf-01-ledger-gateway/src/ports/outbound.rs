//! Driven Ports (SPI - the ledger as seen by orchestrators)

use crate::error::LedgerResult;
use async_trait::async_trait;
use shared_types::{
    AbiEncodedValues, CiphertextHandle, ContractAddress, DecryptionProof, EncryptedInput,
    Identity, LedgerEntry, RecordId, TxHash, TxReceipt,
};
use std::sync::Arc;

/// Arguments of the contract's `create_record` entry point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewRecord {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub input: EncryptedInput,
    pub public_value: u64,
}

/// Read-only view of the records contract.
///
/// Reads never require a signer and never mutate state.
#[async_trait]
pub trait LedgerReader: Send + Sync {
    /// Address of the deployed contract.
    fn contract_address(&self) -> ContractAddress;

    /// All record ids, in creation order.
    async fn list_record_ids(&self) -> LedgerResult<Vec<RecordId>>;

    /// Raw stored entry for `id`.
    async fn get_record(&self, id: &RecordId) -> LedgerResult<LedgerEntry>;

    /// Ciphertext handle of `id`.
    async fn get_ciphertext_handle(&self, id: &RecordId) -> LedgerResult<CiphertextHandle>;

    /// Whether the contract is deployed and reachable.
    async fn health_check(&self) -> bool;
}

/// Signing view of the records contract.
///
/// Every write returns as soon as the transaction is submitted;
/// [`wait_for_confirmation`](LedgerSigner::wait_for_confirmation) blocks
/// until it is included.
#[async_trait]
pub trait LedgerSigner: LedgerReader {
    /// Principal whose key signs transactions.
    fn signer_identity(&self) -> Identity;

    /// Create a record holding an encrypted value.
    async fn create_record(&self, record: NewRecord) -> LedgerResult<TxHash>;

    /// Submit a decryption result for `id`.
    ///
    /// Reverts with `RevertReason::AlreadyVerified` if another submission
    /// won the race.
    async fn submit_verification(
        &self,
        id: &RecordId,
        clear_values: &AbiEncodedValues,
        proof: &DecryptionProof,
    ) -> LedgerResult<TxHash>;

    /// Wait until `tx` is included.
    async fn wait_for_confirmation(&self, tx: &TxHash) -> LedgerResult<TxReceipt>;
}

#[async_trait]
impl<T: LedgerReader + ?Sized> LedgerReader for Arc<T> {
    fn contract_address(&self) -> ContractAddress {
        (**self).contract_address()
    }

    async fn list_record_ids(&self) -> LedgerResult<Vec<RecordId>> {
        (**self).list_record_ids().await
    }

    async fn get_record(&self, id: &RecordId) -> LedgerResult<LedgerEntry> {
        (**self).get_record(id).await
    }

    async fn get_ciphertext_handle(&self, id: &RecordId) -> LedgerResult<CiphertextHandle> {
        (**self).get_ciphertext_handle(id).await
    }

    async fn health_check(&self) -> bool {
        (**self).health_check().await
    }
}

#[async_trait]
impl<T: LedgerSigner + ?Sized> LedgerSigner for Arc<T> {
    fn signer_identity(&self) -> Identity {
        (**self).signer_identity()
    }

    async fn create_record(&self, record: NewRecord) -> LedgerResult<TxHash> {
        (**self).create_record(record).await
    }

    async fn submit_verification(
        &self,
        id: &RecordId,
        clear_values: &AbiEncodedValues,
        proof: &DecryptionProof,
    ) -> LedgerResult<TxHash> {
        (**self).submit_verification(id, clear_values, proof).await
    }

    async fn wait_for_confirmation(&self, tx: &TxHash) -> LedgerResult<TxReceipt> {
        (**self).wait_for_confirmation(tx).await
    }
}
