//! # vf-01-ledger-gateway
//!
//! Access to the confidential records contract.
//!
//! ## Views
//!
//! | View | Trait | Holder |
//! |------|-------|--------|
//! | read-only | [`LedgerReader`] | anyone, before and after connect |
//! | signing | [`LedgerSigner`] | a connected session |
//!
//! ## Contract calls
//!
//! ```text
//! create_record(id, name, handle, proof, public_value, description)
//!     └── reverts: DuplicateRecord | EmptyField | InvalidInputProof
//!
//! submit_verification(id, abi(clear values), decryption proof)
//!     └── reverts: UnknownRecord | AlreadyVerified | MalformedClearValues
//!                  | InvalidDecryptionProof
//! ```
//!
//! `AlreadyVerified` is a structured [`RevertReason`], so callers can treat
//! a lost verification race as success without inspecting messages.
//!
//! ## Example
//!
//! ```rust,ignore
//! let ledger = Arc::new(InMemoryLedger::new(contract, authority));
//! let reader = ReadOnlyLedger::new(ledger.clone());
//! let signer = SigningLedger::new(ledger, identity);
//!
//! let tx = signer.create_record(new_record).await?;
//! signer.wait_for_confirmation(&tx).await?;
//! let ids = reader.list_record_ids().await?;
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;

pub use adapters::{InMemoryLedger, InMemoryLedgerConfig, ReadOnlyLedger, SigningLedger};
pub use domain::RecordsContract;
pub use error::{LedgerError, LedgerResult, RevertReason};
pub use ports::{LedgerReader, LedgerSigner, NewRecord};
