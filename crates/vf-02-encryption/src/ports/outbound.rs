//! Driven Ports (SPI - Outbound Dependencies)

use crate::error::EncryptionResult;
use async_trait::async_trait;
use shared_types::{ContractAddress, EncryptedInput, Identity};

/// Produces ciphertexts bound to a contract and recipient.
#[async_trait]
pub trait EncryptionService: Send + Sync {
    /// Bring up the encryption runtime. Called once per session after
    /// connect; repeated calls are no-ops.
    async fn initialize(&self) -> EncryptionResult<()>;

    /// Whether `initialize` has completed.
    fn is_initialized(&self) -> bool;

    /// Encrypt `plaintext` so that only `contract`, acting on behalf of
    /// `recipient`, accepts it.
    async fn encrypt(
        &self,
        contract: &ContractAddress,
        recipient: &Identity,
        plaintext: u64,
    ) -> EncryptionResult<EncryptedInput>;
}
