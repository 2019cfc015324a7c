//! Cross-crate integration flows.

pub mod fixtures;

mod end_to_end;
mod failures;
mod lifecycle;
mod verification;
