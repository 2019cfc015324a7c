//! # Veilform Demo
//!
//! Runs one record through its whole life against the simulated deployment:
//! connect, create with a confidential value, decrypt and verify on-chain,
//! then print the list projections.
//!
//! Configuration comes from the environment (see `ClientConfig::from_env`).
//! A background task follows the client's event feed until the client is
//! dropped.

use anyhow::{Context, Result};
use shared_bus::{EventFilter, EventTopic};
use shared_types::{Address, OperationScope};
use tokio_stream::StreamExt;
use tracing::{debug, info, warn};
use vf_05_aggregate_view::ViewQuery;
use vf_runtime::{ClientConfig, RecordDraft, SimulatedDeployment, VeilformClient};
use vf_telemetry::init_telemetry;

const DEMO_IDENTITY: Address = Address::new([0xA1; 20]);

#[tokio::main]
async fn main() -> Result<()> {
    let config = ClientConfig::from_env().context("loading configuration")?;
    let _telemetry =
        init_telemetry(config.telemetry.clone()).context("initializing telemetry")?;

    let deployment = SimulatedDeployment::new(&config);
    let client = VeilformClient::simulated(config, &deployment)?;

    let mut feed = client.event_stream(EventFilter::all());
    let follower = tokio::spawn(async move {
        let mut seen = 0usize;
        while let Some(event) = feed.next().await {
            seen += 1;
            match event.topic() {
                EventTopic::Lifecycle => debug!(?event, "Operation event"),
                EventTopic::Integrity => warn!(?event, "Integrity event"),
                _ => info!(?event, "Record event"),
            }
        }
        seen
    });

    let session = client.connect(deployment.wallet(DEMO_IDENTITY)).await?;
    info!(identity = %session.identity(), contract = %session.contract(), "Connected");

    if !client.check_availability().await? {
        anyhow::bail!("records contract is not available");
    }

    let record = client
        .create(RecordDraft {
            title: "Quarterly salary".into(),
            description: "Confidential payroll figure".into(),
            value: 42,
            public_value: Some(7),
        })
        .await?;
    info!(record_id = %record.id, public_value = record.public_value, "Record created");

    let detail = client.open_detail(&record.id)?;
    let outcome = client.verify_detail(&detail).await?;
    info!(
        record_id = %outcome.record_id,
        plaintext = outcome.plaintext,
        path = outcome.path.label(),
        "Record verified"
    );
    detail.close();

    let again = client.verify(&record.id, &OperationScope::detached()).await?;
    info!(path = again.path.label(), "Second verification");

    let summary = client.summary();
    info!(
        total = summary.total,
        verified = summary.verified_count,
        average = summary.average_public_value,
        recent = summary.recent_count,
        "Summary"
    );
    let page = client.page(&ViewQuery::default());
    info!(page = page.number, of = page.total_pages, items = page.items.len(), "First page");

    client.disconnect();
    drop(client);
    let seen = follower.await.context("event feed task")?;
    info!(events = seen, "Event feed closed");
    Ok(())
}
