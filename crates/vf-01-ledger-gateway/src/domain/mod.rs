//! Domain layer for the Ledger Gateway
//!
//! The contract rules, free of transport and timing concerns.

pub mod contract;

pub use contract::RecordsContract;
