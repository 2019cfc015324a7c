//! # Adapters Layer (Hexagonal Architecture)

mod coprocessor;

pub use coprocessor::CoprocessorEncryptionService;
