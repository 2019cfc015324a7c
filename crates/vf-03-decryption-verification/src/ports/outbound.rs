//! Driven Ports (SPI - Outbound Dependencies)

use crate::error::VerificationResult;
use async_trait::async_trait;
use shared_types::{
    AbiEncodedValues, CiphertextHandle, ContractAddress, DecryptionProof, Identity, RecordId,
    TxHash, TxReceipt,
};
use std::collections::HashMap;
use vf_01_ledger_gateway::{LedgerResult, LedgerSigner};

/// Local decryption plus the proof the ledger needs to accept it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecryptionOutcome {
    /// Clear value per requested handle
    pub clear_values: HashMap<CiphertextHandle, u64>,
    /// Clear values in request order, ABI encoded
    pub abi_encoded: AbiEncodedValues,
    pub proof: DecryptionProof,
}

/// Off-chain decryption. Never touches the ledger.
///
/// May suspend for a long time (key material access, user consent).
#[async_trait]
pub trait DecryptionService: Send + Sync {
    async fn decrypt_and_prove(
        &self,
        handles: &[CiphertextHandle],
        contract: &ContractAddress,
    ) -> VerificationResult<DecryptionOutcome>;
}

/// Relays a decryption result to the ledger.
///
/// Split in two so the confirmation wait can be bounded without dropping a
/// submission half way.
#[async_trait]
pub trait VerificationSubmitter: Send + Sync {
    /// Identity that signs the submission.
    fn submitter_identity(&self) -> Identity;

    /// Submit a signed `submit_verification` transaction.
    async fn submit(
        &self,
        id: &RecordId,
        clear_values: &AbiEncodedValues,
        proof: &DecryptionProof,
    ) -> LedgerResult<TxHash>;

    /// Wait for inclusion of a submitted transaction.
    async fn confirm(&self, tx: &TxHash) -> LedgerResult<TxReceipt>;
}

#[async_trait]
impl<S: LedgerSigner + ?Sized> VerificationSubmitter for S {
    fn submitter_identity(&self) -> Identity {
        self.signer_identity()
    }

    async fn submit(
        &self,
        id: &RecordId,
        clear_values: &AbiEncodedValues,
        proof: &DecryptionProof,
    ) -> LedgerResult<TxHash> {
        self.submit_verification(id, clear_values, proof).await
    }

    async fn confirm(&self, tx: &TxHash) -> LedgerResult<TxReceipt> {
        self.wait_for_confirmation(tx).await
    }
}
