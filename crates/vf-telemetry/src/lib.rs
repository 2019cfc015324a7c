//! # Veilform Telemetry
//!
//! Structured logging for every Veilform crate, built on `tracing`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vf_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let _guard = init_telemetry(TelemetryConfig::from_env())?;
//! // spans and events from all crates are now emitted
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `VF_SERVICE_NAME` | `veilform` | Service name on every line |
//! | `VF_LOG_LEVEL` / `RUST_LOG` | `info` | `EnvFilter` directive |
//! | `VF_CONSOLE_OUTPUT` | `true` | Write to stdout |
//! | `VF_JSON_LOGS` | `false` | JSON instead of plain text |

#![warn(missing_docs)]

mod config;
mod logging;

pub use config::TelemetryConfig;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The log filter directive did not parse
    #[error("Invalid log filter: {0}")]
    Filter(String),

    /// A global subscriber is already installed
    #[error("Subscriber already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Install the global subscriber.
///
/// Returns a guard to hold for the lifetime of the application. Calling this
/// twice returns `TelemetryError::AlreadyInitialized`.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    logging::init_logging(&config)?;

    tracing::info!(
        service = %config.service_name,
        level = %config.log_level,
        json = config.json_logs,
        "Telemetry initialized"
    );

    Ok(TelemetryGuard {
        service_name: config.service_name,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    service_name: String,
}

impl TelemetryGuard {
    /// Service name the subscriber was installed for.
    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "Shutting down telemetry");
    }
}
