//! # Simulated FHE Co-processor
//!
//! Stands in for the external encryption network. Values are sealed under a
//! co-processor key and stored by handle; the ledger only ever sees handles.
//!
//! ## Handle Derivation
//!
//! `handle = keccak256(ciphertext || contract || owner)`
//!
//! Sealing uses a fresh nonce, so encrypting the same value twice yields two
//! distinct handles.
//!
//! ## Public Decryption
//!
//! [`FheCoprocessor::public_decrypt`] opens a list of handles and returns the
//! clear values, their ABI encoding, and a decryption proof issued by the
//! shared [`ProofAuthority`].

use crate::abi::encode_clear_values;
use crate::hashing::keccak256;
use crate::proof::ProofAuthority;
use crate::symmetric::{open, seal, SecretKey};
use crate::CryptoError;
use parking_lot::RwLock;
use shared_types::{AbiEncodedValues, Address, CiphertextHandle, DecryptionProof, EncryptedInput};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Result of a public decryption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicDecryption {
    /// Clear values, in handle order.
    pub clear_values: Vec<u64>,
    /// ABI encoding of `clear_values`.
    pub abi_encoded: AbiEncodedValues,
    /// Proof over the handles and `abi_encoded`.
    pub proof: DecryptionProof,
}

/// In-process co-processor.
pub struct FheCoprocessor {
    key: SecretKey,
    authority: ProofAuthority,
    ciphertexts: RwLock<HashMap<CiphertextHandle, Vec<u8>>>,
}

impl std::fmt::Debug for FheCoprocessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FheCoprocessor")
            .field("ciphertexts", &self.ciphertexts.read().len())
            .finish_non_exhaustive()
    }
}

impl FheCoprocessor {
    /// Co-processor issuing proofs through `authority`.
    pub fn new(authority: ProofAuthority) -> Self {
        Self {
            key: SecretKey::generate(),
            authority,
            ciphertexts: RwLock::new(HashMap::new()),
        }
    }

    /// The proof authority shared with the ledger.
    pub fn authority(&self) -> &ProofAuthority {
        &self.authority
    }

    /// Encrypt `value` for `(contract, owner)` and register the ciphertext.
    #[instrument(skip(self, value), fields(contract = %contract, owner = %owner))]
    pub fn encrypt(
        &self,
        value: u64,
        contract: &Address,
        owner: &Address,
    ) -> Result<EncryptedInput, CryptoError> {
        let ciphertext = seal(&self.key, &value.to_be_bytes())?;
        let handle = CiphertextHandle(keccak256(&[
            &ciphertext,
            contract.as_bytes(),
            owner.as_bytes(),
        ]));
        let proof = self.authority.issue_input_proof(&handle, contract, owner);

        self.ciphertexts.write().insert(handle, ciphertext.clone());
        debug!(handle = %handle, "Ciphertext registered");

        Ok(EncryptedInput {
            handle,
            ciphertext,
            proof,
        })
    }

    /// Decrypt a single handle.
    ///
    /// # Errors
    ///
    /// - `CryptoError::UnknownHandle` if nothing is stored under `handle`
    /// - `CryptoError::MalformedCiphertext` if the payload is not a `u64`
    pub fn decrypt(&self, handle: &CiphertextHandle) -> Result<u64, CryptoError> {
        let ciphertext = self
            .ciphertexts
            .read()
            .get(handle)
            .cloned()
            .ok_or(CryptoError::UnknownHandle(*handle))?;

        let plaintext = open(&self.key, &ciphertext)?;
        let bytes: [u8; 8] = plaintext
            .as_slice()
            .try_into()
            .map_err(|_| CryptoError::MalformedCiphertext {
                len: plaintext.len(),
            })?;
        Ok(u64::from_be_bytes(bytes))
    }

    /// Decrypt `handles` and issue a proof over the result.
    #[instrument(skip(self), fields(handles = handles.len()))]
    pub fn public_decrypt(
        &self,
        handles: &[CiphertextHandle],
    ) -> Result<PublicDecryption, CryptoError> {
        let clear_values = handles
            .iter()
            .map(|handle| self.decrypt(handle))
            .collect::<Result<Vec<_>, _>>()?;
        let abi_encoded = encode_clear_values(&clear_values);
        let proof = self.authority.issue_decryption_proof(handles, &abi_encoded);

        Ok(PublicDecryption {
            clear_values,
            abi_encoded,
            proof,
        })
    }

    /// Number of registered ciphertexts.
    pub fn len(&self) -> usize {
        self.ciphertexts.read().len()
    }

    /// Whether no ciphertext is registered.
    pub fn is_empty(&self) -> bool {
        self.ciphertexts.read().is_empty()
    }
}
