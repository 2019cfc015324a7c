//! Decryption Service backed by the in-process co-processor.

use crate::error::{VerificationError, VerificationResult};
use crate::ports::{DecryptionOutcome, DecryptionService};
use async_trait::async_trait;
use shared_crypto::FheCoprocessor;
use shared_types::{CiphertextHandle, ContractAddress};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Adapter over [`FheCoprocessor::public_decrypt`].
pub struct CoprocessorDecryptionService {
    fhe: Arc<FheCoprocessor>,
    latency: Duration,
    invocations: AtomicU64,
}

impl CoprocessorDecryptionService {
    pub fn new(fhe: Arc<FheCoprocessor>) -> Self {
        Self {
            fhe,
            latency: Duration::ZERO,
            invocations: AtomicU64::new(0),
        }
    }

    /// Simulated key-access and consent latency before each decryption.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Number of `decrypt_and_prove` calls so far.
    pub fn invocations(&self) -> u64 {
        self.invocations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DecryptionService for CoprocessorDecryptionService {
    async fn decrypt_and_prove(
        &self,
        handles: &[CiphertextHandle],
        contract: &ContractAddress,
    ) -> VerificationResult<DecryptionOutcome> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let decryption = self
            .fhe
            .public_decrypt(handles)
            .map_err(|e| VerificationError::DecryptionFailed(e.to_string()))?;
        debug!(contract = %contract, handles = handles.len(), "Handles decrypted");

        Ok(DecryptionOutcome {
            clear_values: handles
                .iter()
                .copied()
                .zip(decryption.clear_values)
                .collect(),
            abi_encoded: decryption.abi_encoded,
            proof: decryption.proof,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_crypto::ProofAuthority;
    use shared_types::Address;

    const CONTRACT: Address = Address::new([0xC0; 20]);
    const ALICE: Address = Address::new([0xA1; 20]);

    #[tokio::test]
    async fn test_maps_values_by_handle() {
        let fhe = Arc::new(FheCoprocessor::new(ProofAuthority::generate()));
        let a = fhe.encrypt(42, &CONTRACT, &ALICE).unwrap().handle;
        let b = fhe.encrypt(7, &CONTRACT, &ALICE).unwrap().handle;
        let service = CoprocessorDecryptionService::new(fhe);

        let outcome = service.decrypt_and_prove(&[a, b], &CONTRACT).await.unwrap();
        assert_eq!(outcome.clear_values[&a], 42);
        assert_eq!(outcome.clear_values[&b], 7);
        assert_eq!(service.invocations(), 1);
    }

    #[tokio::test]
    async fn test_unknown_handle_is_decryption_failure() {
        let fhe = Arc::new(FheCoprocessor::new(ProofAuthority::generate()));
        let service = CoprocessorDecryptionService::new(fhe);

        let result = service
            .decrypt_and_prove(&[CiphertextHandle([1u8; 32])], &CONTRACT)
            .await;
        assert!(matches!(result, Err(VerificationError::DecryptionFailed(_))));
    }
}
