//! Encryption Service backed by the in-process co-processor.

use crate::error::{EncryptionError, EncryptionResult};
use crate::ports::EncryptionService;
use async_trait::async_trait;
use shared_crypto::FheCoprocessor;
use shared_types::{ContractAddress, EncryptedInput, Identity};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Adapter over [`FheCoprocessor`].
pub struct CoprocessorEncryptionService {
    fhe: Arc<FheCoprocessor>,
    initialized: AtomicBool,
}

impl CoprocessorEncryptionService {
    pub fn new(fhe: Arc<FheCoprocessor>) -> Self {
        Self {
            fhe,
            initialized: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl EncryptionService for CoprocessorEncryptionService {
    async fn initialize(&self) -> EncryptionResult<()> {
        if !self.initialized.swap(true, Ordering::SeqCst) {
            info!("Encryption runtime initialized");
        }
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    async fn encrypt(
        &self,
        contract: &ContractAddress,
        recipient: &Identity,
        plaintext: u64,
    ) -> EncryptionResult<EncryptedInput> {
        if !self.is_initialized() {
            return Err(EncryptionError::EncryptionFailed(
                "encryption runtime not initialized".into(),
            ));
        }
        let input = self
            .fhe
            .encrypt(plaintext, contract, recipient)
            .map_err(|e| EncryptionError::EncryptionFailed(e.to_string()))?;
        debug!(handle = %input.handle, "Value encrypted");
        Ok(input)
    }
}
