//! Read-only and signing views over an [`InMemoryLedger`].

use super::InMemoryLedger;
use crate::error::{LedgerError, LedgerResult};
use crate::ports::{LedgerReader, LedgerSigner, NewRecord};
use async_trait::async_trait;
use shared_types::{
    AbiEncodedValues, CiphertextHandle, ContractAddress, DecryptionProof, Identity, LedgerEntry,
    RecordId, TxHash, TxReceipt,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, instrument};

/// Unauthenticated view: reads only.
#[derive(Clone, Debug)]
pub struct ReadOnlyLedger {
    ledger: Arc<InMemoryLedger>,
}

impl ReadOnlyLedger {
    pub fn new(ledger: Arc<InMemoryLedger>) -> Self {
        Self { ledger }
    }
}

#[async_trait]
impl LedgerReader for ReadOnlyLedger {
    fn contract_address(&self) -> ContractAddress {
        self.ledger.contract_address()
    }

    async fn list_record_ids(&self) -> LedgerResult<Vec<RecordId>> {
        self.ledger.read_ids()
    }

    async fn get_record(&self, id: &RecordId) -> LedgerResult<LedgerEntry> {
        self.ledger.read_entry(id)
    }

    async fn get_ciphertext_handle(&self, id: &RecordId) -> LedgerResult<CiphertextHandle> {
        self.ledger.read_handle(id)
    }

    async fn health_check(&self) -> bool {
        self.ledger.is_deployed()
    }
}

/// Wallet-backed view: reads plus signed writes as `identity`.
///
/// Every write asks for approval first; with approvals switched off the
/// write fails with `LedgerError::UserRejected` and never reaches the ledger.
#[derive(Clone, Debug)]
pub struct SigningLedger {
    reader: ReadOnlyLedger,
    identity: Identity,
    approve: Arc<AtomicBool>,
}

impl SigningLedger {
    pub fn new(ledger: Arc<InMemoryLedger>, identity: Identity) -> Self {
        Self {
            reader: ReadOnlyLedger::new(ledger),
            identity,
            approve: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Whether the next signature requests are approved. Shared by clones.
    pub fn set_approval(&self, approve: bool) {
        self.approve.store(approve, Ordering::SeqCst);
    }

    fn request_signature(&self, action: &str) -> LedgerResult<()> {
        if self.approve.load(Ordering::SeqCst) {
            Ok(())
        } else {
            info!(signer = %self.identity.abbreviated(), action, "Signature request rejected");
            Err(LedgerError::UserRejected)
        }
    }
}

#[async_trait]
impl LedgerReader for SigningLedger {
    fn contract_address(&self) -> ContractAddress {
        self.reader.contract_address()
    }

    async fn list_record_ids(&self) -> LedgerResult<Vec<RecordId>> {
        self.reader.list_record_ids().await
    }

    async fn get_record(&self, id: &RecordId) -> LedgerResult<LedgerEntry> {
        self.reader.get_record(id).await
    }

    async fn get_ciphertext_handle(&self, id: &RecordId) -> LedgerResult<CiphertextHandle> {
        self.reader.get_ciphertext_handle(id).await
    }

    async fn health_check(&self) -> bool {
        self.reader.health_check().await
    }
}

#[async_trait]
impl LedgerSigner for SigningLedger {
    fn signer_identity(&self) -> Identity {
        self.identity
    }

    #[instrument(skip(self, record), fields(record_id = %record.id))]
    async fn create_record(&self, record: NewRecord) -> LedgerResult<TxHash> {
        self.request_signature("create_record")?;
        self.reader.ledger.execute_create(&self.identity, record)
    }

    #[instrument(skip(self, clear_values, proof), fields(record_id = %id))]
    async fn submit_verification(
        &self,
        id: &RecordId,
        clear_values: &AbiEncodedValues,
        proof: &DecryptionProof,
    ) -> LedgerResult<TxHash> {
        self.request_signature("submit_verification")?;
        self.reader
            .ledger
            .execute_verification(&self.identity, id, clear_values, proof)
    }

    async fn wait_for_confirmation(&self, tx: &TxHash) -> LedgerResult<TxReceipt> {
        self.reader.ledger.confirm(tx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RevertReason;
    use shared_crypto::{FheCoprocessor, ProofAuthority};
    use shared_types::{Address, Record};

    const CONTRACT: Address = Address::new([0xC0; 20]);
    const ALICE: Address = Address::new([0xA1; 20]);
    const BOB: Address = Address::new([0xB0; 20]);

    fn setup() -> (Arc<InMemoryLedger>, FheCoprocessor) {
        let authority = ProofAuthority::generate();
        (
            Arc::new(InMemoryLedger::new(CONTRACT, authority.clone())),
            FheCoprocessor::new(authority),
        )
    }

    fn new_record(fhe: &FheCoprocessor, id: &str, owner: &Address) -> NewRecord {
        NewRecord {
            id: RecordId::new(id),
            title: "Salary".into(),
            description: "Monthly".into(),
            input: fhe.encrypt(42, &CONTRACT, owner).unwrap(),
            public_value: 7,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_then_read_through_reader() {
        let (ledger, fhe) = setup();
        let signer = SigningLedger::new(ledger.clone(), ALICE);
        let reader = ReadOnlyLedger::new(ledger);

        let tx = signer.create_record(new_record(&fhe, "form-1", &ALICE)).await.unwrap();
        signer.wait_for_confirmation(&tx).await.unwrap();

        let id = RecordId::new("form-1");
        assert_eq!(reader.list_record_ids().await.unwrap(), vec![id.clone()]);
        let record = Record::from_entry(id.clone(), reader.get_record(&id).await.unwrap());
        assert!(!record.is_verified());
        assert_eq!(record.public_value, 7);
        assert_eq!(record.creator, ALICE);
        assert_eq!(
            reader.get_ciphertext_handle(&id).await.unwrap(),
            record.ciphertext_handle
        );
    }

    #[tokio::test]
    async fn test_rejected_approval_never_reaches_ledger() {
        let (ledger, fhe) = setup();
        let signer = SigningLedger::new(ledger.clone(), ALICE);
        signer.set_approval(false);

        let result = signer.create_record(new_record(&fhe, "form-1", &ALICE)).await;
        assert_eq!(result, Err(LedgerError::UserRejected));
        assert_eq!(ledger.record_count(), 0);
    }

    #[tokio::test]
    async fn test_signer_identity_binds_input_proof() {
        let (ledger, fhe) = setup();
        let bob = SigningLedger::new(ledger, BOB);

        let result = bob.create_record(new_record(&fhe, "form-1", &ALICE)).await;
        assert_eq!(result, Err(LedgerError::Reverted(RevertReason::InvalidInputProof)));
    }

    #[tokio::test]
    async fn test_missing_record() {
        let (ledger, _) = setup();
        let reader = ReadOnlyLedger::new(ledger);
        let id = RecordId::new("form-missing");
        assert_eq!(
            reader.get_record(&id).await,
            Err(LedgerError::RecordNotFound(id))
        );
    }

    #[tokio::test]
    async fn test_health_check_follows_availability() {
        let (ledger, _) = setup();
        let reader = ReadOnlyLedger::new(ledger.clone());
        assert!(reader.health_check().await);
        ledger.set_available(false);
        assert!(!reader.health_check().await);
    }

    #[tokio::test]
    async fn test_works_through_dyn_arc() {
        let (ledger, _) = setup();
        let signer: Arc<dyn LedgerSigner> = Arc::new(SigningLedger::new(ledger, ALICE));
        assert_eq!(signer.signer_identity(), ALICE);
        assert_eq!(signer.contract_address(), CONTRACT);
        assert!(signer.list_record_ids().await.unwrap().is_empty());
    }
}
