//! Shared setup for integration flows.

use anyhow::Result;
use shared_types::{Address, Identity};
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use vf_03_decryption_verification::CoprocessorDecryptionService;
use vf_runtime::{ClientConfig, LedgerConfig, RecordDraft, SimulatedDeployment, VeilformClient};
use vf_telemetry::{init_telemetry, TelemetryConfig, TelemetryGuard};

pub const CONTRACT: Address = Address::new([0xC0; 20]);
pub const ALICE: Identity = Address::new([0xA1; 20]);
pub const BOB: Identity = Address::new([0xB0; 20]);

/// Guard for the subscriber shared by every test in the binary. `None` if
/// another subscriber was installed first.
static TELEMETRY: OnceLock<Option<TelemetryGuard>> = OnceLock::new();

/// Install logging once per test binary; `VF_LOG_LEVEL=debug` to see it.
pub fn init_logging() {
    TELEMETRY.get_or_init(|| {
        let mut config = TelemetryConfig::for_component("tests");
        config.console_output = std::env::var("VF_LOG_LEVEL").is_ok();
        init_telemetry(config).ok()
    });
}

pub fn config() -> ClientConfig {
    ClientConfig {
        ledger: LedgerConfig {
            contract_address: CONTRACT,
            ..Default::default()
        },
        ..Default::default()
    }
}

/// A deployment and one client over it.
pub struct World {
    pub deployment: SimulatedDeployment,
    pub client: VeilformClient,
}

impl World {
    pub fn new() -> Result<Self> {
        Self::with_config(config())
    }

    /// A deployment built from `config`, e.g. with a slower ledger.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        init_logging();
        let deployment = SimulatedDeployment::new(&config);
        let client = VeilformClient::simulated(config, &deployment)?;
        Ok(Self { deployment, client })
    }

    /// Another client over the same deployment.
    pub fn second_client(&self) -> Result<VeilformClient> {
        Ok(VeilformClient::simulated(config(), &self.deployment)?)
    }

    /// A client over the same deployment with its own decryption service.
    pub fn client_with(
        &self,
        config: ClientConfig,
        decryption: Arc<CoprocessorDecryptionService>,
    ) -> Result<VeilformClient> {
        Ok(VeilformClient::new(
            config,
            self.deployment.reader(),
            self.deployment.encryption_service(),
            decryption,
        )?)
    }

    /// Decryption service over the deployment's co-processor.
    pub fn decryption(&self, latency: Duration) -> Arc<CoprocessorDecryptionService> {
        Arc::new(
            CoprocessorDecryptionService::new(self.deployment.coprocessor().clone())
                .with_latency(latency),
        )
    }

    pub async fn connected(identity: Identity) -> Result<Self> {
        let world = Self::new()?;
        world
            .client
            .connect(world.deployment.wallet(identity))
            .await?;
        Ok(world)
    }
}

pub fn draft(title: &str, value: u64, public_value: u64) -> RecordDraft {
    RecordDraft {
        title: title.into(),
        description: format!("{title} description"),
        value,
        public_value: Some(public_value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_guard_held_across_calls() {
        init_logging();
        init_logging();

        let guard = TELEMETRY.get().and_then(Option::as_ref);
        assert_eq!(guard.map(TelemetryGuard::service_name), Some("veilform-tests"));
    }
}
