//! # Veilform Client Runtime
//!
//! Wires the orchestrators into a client a presentation layer can drive.
//!
//! ## Modules
//!
//! - `container/` - configuration
//! - `client` - session, actions and projections
//! - `detail` - record detail views and their scopes
//! - `records` - client-local record cache
//! - `reporting` - operation events into the lifecycle machine and bus
//! - `wiring/` - simulated ledger and co-processor deployment
//!
//! ## Example
//!
//! ```rust,ignore
//! let config = ClientConfig::from_env()?;
//! let deployment = SimulatedDeployment::new(&config);
//! let client = VeilformClient::simulated(config, &deployment)?;
//!
//! client.connect(deployment.wallet(identity)).await?;
//! let record = client.create(RecordDraft { value: 42, public_value: Some(7), .. }).await?;
//! let detail = client.open_detail(&record.id)?;
//! let outcome = client.verify_detail(&detail).await?;
//! assert_eq!(outcome.plaintext, 42);
//! ```

pub mod client;
pub mod container;
pub mod detail;
pub mod error;
pub mod records;
pub mod reporting;
pub mod wiring;

pub use client::{RecordDraft, VeilformClient, PUBLIC_VALUE_RANGE};
pub use container::{ClientConfig, ConfigError, LedgerConfig};
pub use detail::DetailView;
pub use error::{ClientError, ClientResult};
pub use records::RecordCache;
pub use reporting::{OperationReport, OperationReporter};
pub use wiring::SimulatedDeployment;
