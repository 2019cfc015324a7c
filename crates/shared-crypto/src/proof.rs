//! # Proof Authority
//!
//! Issues and checks the two proofs the ledger relies on:
//!
//! - **Input proof**: a ciphertext handle was produced for `(contract, owner)`.
//!   Checked by `create_record`.
//! - **Decryption proof**: a list of clear values is the decryption of a list
//!   of handles. Checked by `submit_verification`.
//!
//! Both are HMAC-SHA256 tags under a key shared by the key-management side and
//! the ledger. Domain separation tags keep one proof kind from being replayed
//! as the other.

use crate::symmetric::SecretKey;
use crate::CryptoError;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use shared_types::{AbiEncodedValues, Address, CiphertextHandle, DecryptionProof, InputProof};

type HmacSha256 = Hmac<Sha256>;

const INPUT_DOMAIN: &[u8] = b"veilform.input-proof.v1";
const DECRYPTION_DOMAIN: &[u8] = b"veilform.decryption-proof.v1";

/// Holder of the proof key.
#[derive(Clone)]
pub struct ProofAuthority {
    key: SecretKey,
}

impl std::fmt::Debug for ProofAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProofAuthority").finish_non_exhaustive()
    }
}

impl ProofAuthority {
    /// Authority over an existing key.
    pub fn new(key: SecretKey) -> Self {
        Self { key }
    }

    /// Authority with a fresh random key.
    pub fn generate() -> Self {
        Self::new(SecretKey::generate())
    }

    /// Issue an input proof.
    pub fn issue_input_proof(
        &self,
        handle: &CiphertextHandle,
        contract: &Address,
        owner: &Address,
    ) -> InputProof {
        let mut mac = self.mac();
        Self::feed_input(&mut mac, handle, contract, owner);
        InputProof(mac.finalize().into_bytes().to_vec())
    }

    /// Check an input proof in constant time.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::InvalidProof` if the tag does not match.
    pub fn verify_input_proof(
        &self,
        proof: &InputProof,
        handle: &CiphertextHandle,
        contract: &Address,
        owner: &Address,
    ) -> Result<(), CryptoError> {
        let mut mac = self.mac();
        Self::feed_input(&mut mac, handle, contract, owner);
        mac.verify_slice(&proof.0).map_err(|_| CryptoError::InvalidProof)
    }

    /// Issue a decryption proof over `handles` and their encoded clear values.
    pub fn issue_decryption_proof(
        &self,
        handles: &[CiphertextHandle],
        clear_values: &AbiEncodedValues,
    ) -> DecryptionProof {
        let mut mac = self.mac();
        Self::feed_decryption(&mut mac, handles, clear_values);
        DecryptionProof(mac.finalize().into_bytes().to_vec())
    }

    /// Check a decryption proof in constant time.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::InvalidProof` if the tag does not match.
    pub fn verify_decryption_proof(
        &self,
        proof: &DecryptionProof,
        handles: &[CiphertextHandle],
        clear_values: &AbiEncodedValues,
    ) -> Result<(), CryptoError> {
        let mut mac = self.mac();
        Self::feed_decryption(&mut mac, handles, clear_values);
        mac.verify_slice(&proof.0).map_err(|_| CryptoError::InvalidProof)
    }

    fn mac(&self) -> HmacSha256 {
        // HMAC accepts keys of any length; 32 bytes cannot fail.
        <HmacSha256 as Mac>::new_from_slice(self.key.as_bytes())
            .unwrap_or_else(|_| unreachable!("HMAC-SHA256 accepts 32-byte keys"))
    }

    fn feed_input(
        mac: &mut HmacSha256,
        handle: &CiphertextHandle,
        contract: &Address,
        owner: &Address,
    ) {
        mac.update(INPUT_DOMAIN);
        mac.update(handle.as_bytes());
        mac.update(contract.as_bytes());
        mac.update(owner.as_bytes());
    }

    fn feed_decryption(
        mac: &mut HmacSha256,
        handles: &[CiphertextHandle],
        clear_values: &AbiEncodedValues,
    ) {
        mac.update(DECRYPTION_DOMAIN);
        mac.update(&(handles.len() as u64).to_be_bytes());
        for handle in handles {
            mac.update(handle.as_bytes());
        }
        mac.update(clear_values.as_bytes());
    }
}
