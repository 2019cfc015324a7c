//! # Verification Metrics
//!
//! Prometheus counters for the decryption-verification protocol.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! vf-03-decryption-verification = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `verification_completed_total{path}` - Successful verifications by path
//! - `verification_failures_total{kind}` - Failed verifications by error kind
//! - `verification_mismatches_total` - Integrity violations
//! - `verification_local_decryptions_total` - Calls into the decryption service

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Successful verifications, labeled by path
    pub static ref VERIFICATIONS_COMPLETED: IntCounterVec = register_int_counter_vec!(
        "verification_completed_total",
        "Total number of successful verifications",
        &["path"]
    )
    .expect("Failed to create VERIFICATIONS_COMPLETED metric");

    /// Failed verifications, labeled by error kind
    pub static ref VERIFICATION_FAILURES: IntCounterVec = register_int_counter_vec!(
        "verification_failures_total",
        "Total number of failed verifications",
        &["kind"]
    )
    .expect("Failed to create VERIFICATION_FAILURES metric");

    /// Integrity violations
    pub static ref VERIFICATION_MISMATCHES: IntCounter = register_int_counter!(
        "verification_mismatches_total",
        "Total number of local/confirmed plaintext mismatches"
    )
    .expect("Failed to create VERIFICATION_MISMATCHES metric");

    /// Local decryptions performed
    pub static ref LOCAL_DECRYPTIONS: IntCounter = register_int_counter!(
        "verification_local_decryptions_total",
        "Total number of local decryptions"
    )
    .expect("Failed to create LOCAL_DECRYPTIONS metric");
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

/// Record a successful verification
#[cfg(feature = "metrics")]
pub fn record_verification(path: &str) {
    VERIFICATIONS_COMPLETED.with_label_values(&[path]).inc();
}

/// Record a failed verification
#[cfg(feature = "metrics")]
pub fn record_failure(kind: &str) {
    VERIFICATION_FAILURES.with_label_values(&[kind]).inc();
}

/// Record an integrity violation
#[cfg(feature = "metrics")]
pub fn record_mismatch() {
    VERIFICATION_MISMATCHES.inc();
}

/// Record a local decryption
#[cfg(feature = "metrics")]
pub fn record_local_decryption() {
    LOCAL_DECRYPTIONS.inc();
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_verification(_path: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_failure(_kind: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_mismatch() {}

#[cfg(not(feature = "metrics"))]
pub fn record_local_decryption() {}
