//! # Adapters Layer (Hexagonal Architecture)
//!
//! In-process ledger simulation and the two views orchestrators consume.

mod in_memory;
mod views;

pub use in_memory::{InMemoryLedger, InMemoryLedgerConfig};
pub use views::{ReadOnlyLedger, SigningLedger};
