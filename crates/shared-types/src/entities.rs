//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Identity**: `Address` (principals and contracts), `RecordId`
//! - **Confidential data**: `CiphertextHandle`
//! - **Records**: `Record`, `Verification`, `LedgerEntry`

use crate::errors::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// A 20-byte Ethereum-style address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Address(pub [u8; 20]);

/// Identity of a signing principal (wallet account).
pub type Identity = Address;

/// Address of the deployed records contract.
pub type ContractAddress = Address;

impl Address {
    /// The zero address.
    pub const ZERO: Self = Self([0u8; 20]);

    /// Create from raw bytes.
    #[must_use]
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Parse a `0x`-prefixed (or bare) 40 character hex string.
    pub fn from_hex(s: &str) -> Result<Self, ParseError> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        if digits.len() != 40 {
            return Err(ParseError::InvalidLength {
                expected: 40,
                actual: digits.len(),
            });
        }
        let mut out = [0u8; 20];
        hex::decode_to_slice(digits, &mut out)
            .map_err(|e| ParseError::InvalidHex(e.to_string()))?;
        Ok(Self(out))
    }

    /// Shortened display form, `0x1234...abcd`.
    #[must_use]
    pub fn abbreviated(&self) -> String {
        let full = self.to_string();
        format!("{}...{}", &full[..6], &full[38..])
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl FromStr for Address {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// Opaque unique record identifier, assigned by the submitting client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(String);

impl RecordId {
    /// Wrap an existing identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh identifier of the form `form-<uuid>`.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("form-{}", Uuid::new_v4().simple()))
    }

    /// Borrow the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// CLUSTER B: CONFIDENTIAL DATA
// =============================================================================

/// Opaque ledger-side reference to an encrypted integer.
///
/// This is not the ciphertext itself; the ciphertext lives with the
/// encryption co-processor and is addressed by this handle.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct CiphertextHandle(pub [u8; 32]);

impl CiphertextHandle {
    /// Raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for CiphertextHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for CiphertextHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CiphertextHandle(0x{}..)", hex::encode(&self.0[..4]))
    }
}

/// Unix timestamp in seconds, on the ledger's clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// Current wall-clock time.
    ///
    /// Returns 0 if the system clock is before the Unix epoch.
    #[must_use]
    pub fn now() -> Self {
        Self(
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        )
    }

    /// Seconds since the epoch.
    #[must_use]
    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// Seconds elapsed from `earlier` to `self`, zero if `earlier` is later.
    #[must_use]
    pub fn seconds_since(&self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

// =============================================================================
// CLUSTER C: RECORDS
// =============================================================================

/// On-chain verification state of a record's confidential value.
///
/// INVARIANT: the plaintext exists if and only if the record is verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verification {
    /// Not yet decrypted on-chain.
    #[default]
    Unverified,
    /// Decryption confirmed by the ledger; the plaintext is public.
    Verified {
        /// Ledger-confirmed plaintext.
        plaintext: u64,
    },
}

impl Verification {
    /// Whether the ledger has confirmed a plaintext.
    #[must_use]
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified { .. })
    }

    /// The confirmed plaintext, if verified.
    #[must_use]
    pub fn plaintext(&self) -> Option<u64> {
        match self {
            Self::Verified { plaintext } => Some(*plaintext),
            Self::Unverified => None,
        }
    }

    /// Monotonic merge of a previously known state with a newly observed one.
    ///
    /// Once verified, a record stays verified: an `Unverified` observation
    /// never overrides a known `Verified` state.
    #[must_use]
    pub fn advance(self, observed: Verification) -> Verification {
        match (self, observed) {
            (Self::Verified { plaintext }, Self::Unverified) => Self::Verified { plaintext },
            (_, observed) => observed,
        }
    }
}

/// Raw record entry as stored by the ledger contract.
///
/// Mirrors the contract's storage layout: `decrypted_value` is zero until
/// `is_verified` flips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Record title.
    pub name: String,
    /// Record description.
    pub description: String,
    /// Non-confidential value supplied at creation.
    pub public_value: u64,
    /// Block timestamp of the creating transaction.
    pub created_at: Timestamp,
    /// Submitting principal.
    pub creator: Identity,
    /// Whether decryption has been verified on-chain.
    pub is_verified: bool,
    /// Verified plaintext, zero while unverified.
    pub decrypted_value: u64,
    /// Handle of the encrypted value.
    pub ciphertext_handle: CiphertextHandle,
}

/// A confidential submission as seen by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Unique identifier, immutable.
    pub id: RecordId,
    /// Title, immutable.
    pub title: String,
    /// Description, immutable.
    pub description: String,
    /// Handle of the encrypted value, immutable.
    pub ciphertext_handle: CiphertextHandle,
    /// Non-confidential integer attached at creation, immutable.
    pub public_value: u64,
    /// Submitting principal, immutable.
    pub creator: Identity,
    /// Creation timestamp, immutable.
    pub created_at: Timestamp,
    /// Verification state; moves forward only.
    pub verification: Verification,
}

impl Record {
    /// Map a raw ledger entry into a record.
    ///
    /// An unverified entry maps to `Unverified` whatever its stored
    /// `decrypted_value` is.
    #[must_use]
    pub fn from_entry(id: RecordId, entry: LedgerEntry) -> Self {
        let verification = if entry.is_verified {
            Verification::Verified {
                plaintext: entry.decrypted_value,
            }
        } else {
            Verification::Unverified
        };

        Self {
            id,
            title: entry.name,
            description: entry.description,
            ciphertext_handle: entry.ciphertext_handle,
            public_value: entry.public_value,
            creator: entry.creator,
            created_at: entry.created_at,
            verification,
        }
    }

    /// Whether the ledger has verified this record.
    #[must_use]
    pub fn is_verified(&self) -> bool {
        self.verification.is_verified()
    }

    /// Ledger-confirmed plaintext, present only when verified.
    #[must_use]
    pub fn verified_plaintext(&self) -> Option<u64> {
        self.verification.plaintext()
    }
}
