//! # Veilform Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Criterion benchmarks
//! └── src/integration/  # Cross-crate flows through the client runtime
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p vf-tests
//! cargo test -p vf-tests integration::verification
//! cargo bench -p vf-tests
//! ```

#![allow(dead_code)]

pub mod integration;
