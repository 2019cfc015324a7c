//! # Client Configuration
//!
//! Unified configuration for the orchestrators, the lifecycle machine and
//! the list view. Every section has defaults; `from_env` overrides them.
//!
//! ## Environment Variables
//!
//! | Variable | Default |
//! |----------|---------|
//! | `VF_CONTRACT_ADDRESS` | `0x0000…0000` |
//! | `VF_CONFIRMATION_TIMEOUT_MS` | `60000` |
//! | `VF_CONFIRMATION_DELAY_MS` | `20` (simulated ledger only) |
//! | `VF_SUCCESS_DISPLAY_MS` | `2000` |
//! | `VF_ERROR_DISPLAY_MS` | `3000` |
//! | `VF_PAGE_SIZE` | `5` |
//!
//! Logging variables are read as by [`TelemetryConfig::from_env`].

use shared_types::{Address, ContractAddress};
use std::env;
use std::time::Duration;
use thiserror::Error;
use vf_04_lifecycle::LifecycleConfig;
use vf_05_aggregate_view::ViewConfig;
use vf_telemetry::TelemetryConfig;

/// Complete client configuration.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    pub ledger: LedgerConfig,
    pub lifecycle: LifecycleConfig,
    pub view: ViewConfig,
    pub telemetry: TelemetryConfig,
}

/// Ledger access configuration.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Records contract every session talks to.
    pub contract_address: ContractAddress,
    /// Upper bound on waiting for a transaction to be included.
    pub confirmation_timeout: Duration,
    /// Inclusion latency of the simulated ledger.
    pub confirmation_delay: Duration,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            contract_address: Address::default(),
            confirmation_timeout: Duration::from_secs(60),
            confirmation_delay: Duration::from_millis(20),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

impl ClientConfig {
    /// Defaults overridden by environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.telemetry = TelemetryConfig::from_lookup(&lookup);

        if let Some(value) = lookup("VF_CONTRACT_ADDRESS") {
            config.ledger.contract_address =
                value.parse().map_err(|e: shared_types::ParseError| ConfigError::InvalidValue {
                    key: "VF_CONTRACT_ADDRESS",
                    value: value.clone(),
                    reason: e.to_string(),
                })?;
        }
        if let Some(ms) = parse_u64(&lookup, "VF_CONFIRMATION_TIMEOUT_MS")? {
            config.ledger.confirmation_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_u64(&lookup, "VF_CONFIRMATION_DELAY_MS")? {
            config.ledger.confirmation_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_u64(&lookup, "VF_SUCCESS_DISPLAY_MS")? {
            config.lifecycle.success_display = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_u64(&lookup, "VF_ERROR_DISPLAY_MS")? {
            config.lifecycle.error_display = Duration::from_millis(ms);
        }
        if let Some(size) = parse_u64(&lookup, "VF_PAGE_SIZE")? {
            config.view.page_size =
                usize::try_from(size).map_err(|e| ConfigError::InvalidValue {
                    key: "VF_PAGE_SIZE",
                    value: size.to_string(),
                    reason: e.to_string(),
                })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject values no component can work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ledger.confirmation_timeout.is_zero() {
            return Err(ConfigError::Zero("confirmation timeout"));
        }
        if self.lifecycle.success_display.is_zero() {
            return Err(ConfigError::Zero("success display window"));
        }
        if self.lifecycle.error_display.is_zero() {
            return Err(ConfigError::Zero("error display window"));
        }
        if self.view.page_size == 0 {
            return Err(ConfigError::Zero("page size"));
        }
        Ok(())
    }
}

fn parse_u64(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<u64>, ConfigError> {
    lookup(key)
        .map(|value| {
            value
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidValue {
                    key,
                    value: value.clone(),
                    reason: e.to_string(),
                })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.lifecycle.success_display, Duration::from_secs(2));
        assert_eq!(config.lifecycle.error_display, Duration::from_secs(3));
        assert_eq!(config.view.page_size, 5);
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("VF_CONTRACT_ADDRESS", "0xc0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0"),
            ("VF_CONFIRMATION_TIMEOUT_MS", "1500"),
            ("VF_SUCCESS_DISPLAY_MS", "100"),
            ("VF_ERROR_DISPLAY_MS", "200"),
            ("VF_PAGE_SIZE", "10"),
            ("VF_LOG_LEVEL", "debug"),
        ]))
        .unwrap();

        assert_eq!(config.ledger.contract_address, Address::new([0xC0; 20]));
        assert_eq!(config.ledger.confirmation_timeout, Duration::from_millis(1500));
        assert_eq!(config.lifecycle.success_display, Duration::from_millis(100));
        assert_eq!(config.lifecycle.error_display, Duration::from_millis(200));
        assert_eq!(config.view.page_size, 10);
        assert_eq!(config.telemetry.log_level, "debug");
    }

    #[test]
    fn test_bad_number_rejected() {
        let err = ClientConfig::from_lookup(lookup(&[("VF_PAGE_SIZE", "five")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "VF_PAGE_SIZE", .. }));
    }

    #[test]
    fn test_large_page_size_never_truncated() {
        let result = ClientConfig::from_lookup(lookup(&[("VF_PAGE_SIZE", "4294967296")]));
        #[cfg(target_pointer_width = "64")]
        assert_eq!(result.unwrap().view.page_size, 4_294_967_296);
        #[cfg(not(target_pointer_width = "64"))]
        assert!(matches!(result, Err(ConfigError::InvalidValue { key: "VF_PAGE_SIZE", .. })));
    }

    #[test]
    fn test_bad_address_rejected() {
        let err = ClientConfig::from_lookup(lookup(&[("VF_CONTRACT_ADDRESS", "0x1234")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "VF_CONTRACT_ADDRESS", .. }));
    }

    #[test]
    fn test_zero_values_rejected() {
        assert_eq!(
            ClientConfig::from_lookup(lookup(&[("VF_PAGE_SIZE", "0")])).unwrap_err(),
            ConfigError::Zero("page size")
        );
        assert_eq!(
            ClientConfig::from_lookup(lookup(&[("VF_CONFIRMATION_TIMEOUT_MS", "0")])).unwrap_err(),
            ConfigError::Zero("confirmation timeout")
        );
    }
}
