//! # Simulated Deployment
//!
//! One in-process ledger plus one co-processor sharing a proof authority.
//! Hands out read-only and signing views, and the encryption and decryption
//! services a client needs.

use crate::container::ClientConfig;
use shared_crypto::{FheCoprocessor, ProofAuthority};
use shared_types::Identity;
use std::sync::Arc;
use tracing::info;
use vf_01_ledger_gateway::{InMemoryLedger, InMemoryLedgerConfig, ReadOnlyLedger, SigningLedger};
use vf_02_encryption::CoprocessorEncryptionService;
use vf_03_decryption_verification::CoprocessorDecryptionService;

pub struct SimulatedDeployment {
    ledger: Arc<InMemoryLedger>,
    fhe: Arc<FheCoprocessor>,
}

impl SimulatedDeployment {
    /// Deploy the records contract at `config.ledger.contract_address`.
    pub fn new(config: &ClientConfig) -> Self {
        let authority = ProofAuthority::generate();
        let ledger = Arc::new(InMemoryLedger::with_config(
            config.ledger.contract_address,
            authority.clone(),
            InMemoryLedgerConfig {
                confirmation_delay: config.ledger.confirmation_delay,
            },
        ));
        let fhe = Arc::new(FheCoprocessor::new(authority));
        info!(contract = %config.ledger.contract_address, "Simulated deployment ready");
        Self { ledger, fhe }
    }

    /// The ledger, for test controls and inspection.
    pub fn ledger(&self) -> &Arc<InMemoryLedger> {
        &self.ledger
    }

    pub fn coprocessor(&self) -> &Arc<FheCoprocessor> {
        &self.fhe
    }

    pub fn reader(&self) -> Arc<ReadOnlyLedger> {
        Arc::new(ReadOnlyLedger::new(self.ledger.clone()))
    }

    /// A wallet signing as `identity`.
    pub fn wallet(&self, identity: Identity) -> Arc<SigningLedger> {
        Arc::new(SigningLedger::new(self.ledger.clone(), identity))
    }

    pub fn encryption_service(&self) -> Arc<CoprocessorEncryptionService> {
        Arc::new(CoprocessorEncryptionService::new(self.fhe.clone()))
    }

    pub fn decryption_service(&self) -> Arc<CoprocessorDecryptionService> {
        Arc::new(CoprocessorDecryptionService::new(self.fhe.clone()))
    }
}
