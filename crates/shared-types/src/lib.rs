//! # Shared Types Crate
//!
//! Domain entities and value types shared by every Veilform crate.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: the record model lives here and nowhere else.
//! - **Invariants by construction**: a record's plaintext only exists inside
//!   [`Verification::Verified`], so "plaintext defined iff verified" cannot be
//!   broken by a caller.
//! - **Explicit session**: identity and contract address travel in a
//!   [`Session`] value passed into every orchestrator call; there is no
//!   ambient connection state.

pub mod entities;
pub mod errors;
pub mod operations;
pub mod payloads;
pub mod progress;
pub mod scope;
pub mod session;

pub use entities::*;
pub use errors::*;
pub use operations::*;
pub use payloads::*;
pub use progress::{Milestone, ProgressSink, Unobserved};
pub use scope::{OperationScope, ScopeHandle};
pub use session::Session;
