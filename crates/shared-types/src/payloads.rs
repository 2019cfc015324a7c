//! # Ledger Payloads
//!
//! Values carried into and out of ledger calls: encrypted inputs, decryption
//! proofs and transaction receipts.

use crate::entities::{CiphertextHandle, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusion proof binding a ciphertext to (contract, owner).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputProof(pub Vec<u8>);

/// Output of the encryption service, ready for `create_record`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedInput {
    /// Handle under which the co-processor stored the ciphertext.
    pub handle: CiphertextHandle,
    /// Ciphertext bytes.
    pub ciphertext: Vec<u8>,
    /// Proof that the ciphertext was produced for this contract and owner.
    pub proof: InputProof,
}

/// ABI-encoded clear values, one 32-byte big-endian word per handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiEncodedValues(pub Vec<u8>);

impl AbiEncodedValues {
    /// Raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Proof that a set of clear values is the decryption of a set of handles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecryptionProof(pub Vec<u8>);

/// Hash identifying a submitted transaction.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TxHash(pub [u8; 32]);

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxHash(0x{}..)", hex::encode(&self.0[..4]))
    }
}

/// Receipt of a confirmed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    /// Transaction hash.
    pub tx_hash: TxHash,
    /// Block in which the transaction was included.
    pub block_number: u64,
    /// Timestamp of that block.
    pub block_timestamp: Timestamp,
}
