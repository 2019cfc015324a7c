//! # Veilform Client
//!
//! The client core a presentation layer drives. It owns the session, the
//! record cache and the lifecycle machine, and runs every user action
//! through the matching orchestrator.
//!
//! ## Action Flow
//!
//! ```text
//! action ──→ OperationReport::begin ──→ orchestrator ──→ ledger
//!                                             │ (tx sent: progress)
//!                                             │
//!                        ┌────────────────────┴───────────────┐
//!                        ↓                                    ↓
//!                  Ok: reload records                  Err: fail report
//!                      succeed report                  (+ IntegrityViolation)
//! ```

use crate::container::ClientConfig;
use crate::detail::DetailView;
use crate::error::{ClientError, ClientResult};
use crate::records::RecordCache;
use crate::reporting::OperationReporter;
use crate::wiring::SimulatedDeployment;
use parking_lot::RwLock;
use rand::Rng;
use shared_bus::{
    ClientEvent, EventFilter, EventPublisher, EventStream, InMemoryEventBus, Subscription,
};
use shared_types::{
    OperationKind, OperationScope, Record, RecordId, Session, Timestamp,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use vf_01_ledger_gateway::{LedgerReader, LedgerSigner};
use vf_02_encryption::{
    EncryptionConfig, EncryptionError, EncryptionOrchestrator, EncryptionService, Submission,
};
use vf_03_decryption_verification::{
    DecryptionService, LocalDecryptionCache, VerificationConfig, VerificationError,
    VerificationOrchestrator, VerificationOutcome, VerificationPath,
};
use vf_04_lifecycle::{BusyFlags, LifecycleMachine, StatusView};
use vf_05_aggregate_view::{AggregateView, Page, Summary, ViewQuery};

/// Range of the public value drawn when a draft carries none.
pub const PUBLIC_VALUE_RANGE: std::ops::RangeInclusive<u64> = 1..=100;

/// User input for a new record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordDraft {
    pub title: String,
    pub description: String,
    /// Confidential value, only ever sent encrypted.
    pub value: u64,
    /// Non-confidential value; drawn from [`PUBLIC_VALUE_RANGE`] when `None`.
    pub public_value: Option<u64>,
}

type SessionEncryptor = EncryptionOrchestrator<dyn EncryptionService, dyn LedgerSigner>;
type SessionVerifier =
    VerificationOrchestrator<dyn DecryptionService, dyn LedgerSigner, dyn LedgerSigner>;

/// Everything bound to one connected wallet.
struct ConnectedSession {
    session: Session,
    encryptor: SessionEncryptor,
    verifier: SessionVerifier,
    cache: Arc<LocalDecryptionCache>,
}

pub struct VeilformClient {
    config: ClientConfig,
    reader: Arc<dyn LedgerReader>,
    encryption: Arc<dyn EncryptionService>,
    decryption: Arc<dyn DecryptionService>,
    lifecycle: Arc<LifecycleMachine>,
    bus: Arc<InMemoryEventBus>,
    reporter: OperationReporter,
    records: RecordCache,
    view: AggregateView,
    session: RwLock<Option<Arc<ConnectedSession>>>,
}

impl VeilformClient {
    pub fn new(
        config: ClientConfig,
        reader: Arc<dyn LedgerReader>,
        encryption: Arc<dyn EncryptionService>,
        decryption: Arc<dyn DecryptionService>,
    ) -> ClientResult<Self> {
        config.validate()?;
        let view = AggregateView::new(&config.view)?;
        let lifecycle = Arc::new(LifecycleMachine::new(config.lifecycle.clone()));
        let bus = Arc::new(InMemoryEventBus::new());
        let reporter = OperationReporter::new(lifecycle.clone(), bus.clone());

        Ok(Self {
            config,
            reader,
            encryption,
            decryption,
            lifecycle,
            bus,
            reporter,
            records: RecordCache::new(),
            view,
            session: RwLock::new(None),
        })
    }

    /// Client over a simulated deployment's services.
    pub fn simulated(config: ClientConfig, deployment: &SimulatedDeployment) -> ClientResult<Self> {
        Self::new(
            config,
            deployment.reader(),
            deployment.encryption_service(),
            deployment.decryption_service(),
        )
    }

    // =========================================================================
    // SESSION
    // =========================================================================

    /// Open a session for `wallet`, initialise encryption and load records.
    #[instrument(skip(self, wallet), fields(identity = %wallet.signer_identity().abbreviated()))]
    pub async fn connect(&self, wallet: Arc<dyn LedgerSigner>) -> ClientResult<Session> {
        let configured = self.config.ledger.contract_address;
        let bound = wallet.contract_address();
        if bound != configured {
            return Err(ClientError::ContractMismatch {
                wallet: bound,
                configured,
            });
        }

        let report = self
            .reporter
            .begin(
                OperationKind::Initialize,
                "Initializing FHE encryption...",
                OperationScope::detached(),
            )
            .await?;
        if let Err(e) = self.encryption.initialize().await {
            warn!(error = %e, "Encryption initialization failed");
            report.fail("FHEVM initialization failed").await;
            return Err(e.into());
        }
        report.succeed("FHE encryption ready").await;

        let session = Session::new(wallet.signer_identity(), configured);
        let cache = Arc::new(LocalDecryptionCache::new());
        let connected = Arc::new(ConnectedSession {
            session: session.clone(),
            encryptor: EncryptionOrchestrator::new(
                EncryptionConfig {
                    confirmation_timeout: self.config.ledger.confirmation_timeout,
                },
                self.encryption.clone(),
                wallet.clone(),
            ),
            verifier: VerificationOrchestrator::new(
                VerificationConfig {
                    confirmation_timeout: self.config.ledger.confirmation_timeout,
                },
                self.decryption.clone(),
                wallet.clone(),
                wallet,
                cache.clone(),
            ),
            cache,
        });

        if let Some(previous) = self.session.write().replace(connected) {
            previous.cache.clear_all();
        }
        info!(session = %session.id(), "Session connected");

        if let Err(e) = self.refresh().await {
            warn!(error = %e, "Initial record load failed");
        }
        Ok(session)
    }

    /// Tear down the session. Local decryptions and cached records go with it.
    pub fn disconnect(&self) -> bool {
        let Some(previous) = self.session.write().take() else {
            return false;
        };
        previous.cache.clear_all();
        self.records.clear();
        info!(session = %previous.session.id(), "Session disconnected");
        true
    }

    pub fn session(&self) -> Option<Session> {
        self.session.read().as_ref().map(|c| c.session.clone())
    }

    pub fn is_connected(&self) -> bool {
        self.session.read().is_some()
    }

    fn connected(&self) -> Option<Arc<ConnectedSession>> {
        self.session.read().clone()
    }

    async fn require_session(&self, kind: OperationKind) -> ClientResult<Arc<ConnectedSession>> {
        match self.connected() {
            Some(connected) => Ok(connected),
            None => {
                self.reporter
                    .reject(kind, ClientError::NotConnected.to_string())
                    .await;
                Err(ClientError::NotConnected)
            }
        }
    }

    // =========================================================================
    // ACTIONS
    // =========================================================================

    /// Re-read the whole record set. A no-op while a refresh is in flight.
    pub async fn refresh(&self) -> ClientResult<usize> {
        if !self.is_connected() {
            return Err(ClientError::NotConnected);
        }
        if self.lifecycle.is_busy(OperationKind::Refresh) {
            debug!("Refresh already in flight");
            return Ok(self.records.len());
        }

        let report = self
            .reporter
            .begin(OperationKind::Refresh, "Loading records...", OperationScope::detached())
            .await?;
        match self.reload().await {
            Ok(count) => {
                report.succeed(format!("Loaded {count} records")).await;
                Ok(count)
            }
            Err(e) => {
                warn!(error = %e, "Record load failed");
                report.fail("Failed to load data").await;
                Err(e)
            }
        }
    }

    /// Encrypt `draft.value` and create a record for it.
    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub async fn create(&self, draft: RecordDraft) -> ClientResult<Record> {
        let connected = self.require_session(OperationKind::Create).await?;
        let public_value = draft
            .public_value
            .unwrap_or_else(|| rand::thread_rng().gen_range(PUBLIC_VALUE_RANGE));

        let report = self
            .reporter
            .begin(
                OperationKind::Create,
                "Creating secure form with FHE...",
                OperationScope::detached(),
            )
            .await?;
        let submission = Submission {
            title: draft.title,
            description: draft.description,
            value: draft.value,
            public_value,
        };

        let result = connected
            .encryptor
            .submit_observed(
                &connected.session,
                submission,
                &report.relay(|_| "Waiting for transaction confirmation..."),
            )
            .await;
        match result {
            Ok(created) => {
                self.bus
                    .publish(ClientEvent::RecordCreated {
                        id: created.record.id.clone(),
                        tx: created.receipt.tx_hash,
                    })
                    .await;
                self.records.upsert(created.record.clone());
                self.reload_quietly().await;
                report.succeed("Secure form created successfully!").await;
                Ok(created.record)
            }
            Err(e) => {
                let message = match e {
                    EncryptionError::UserRejected => "Transaction rejected by user".to_string(),
                    ref other => format!("Submission failed: {other}"),
                };
                report.fail(message).await;
                Err(e.into())
            }
        }
    }

    /// Obtain the ledger-confirmed plaintext of `id`.
    ///
    /// Closing `scope` before submission cancels the call; afterwards it only
    /// stops status updates.
    #[instrument(skip(self, scope), fields(record_id = %id))]
    pub async fn verify(
        &self,
        id: &RecordId,
        scope: &OperationScope,
    ) -> ClientResult<VerificationOutcome> {
        let connected = self.require_session(OperationKind::DecryptVerify).await?;
        let report = self
            .reporter
            .begin(
                OperationKind::DecryptVerify,
                "Decrypting with FHE...",
                scope.clone(),
            )
            .await?;

        let result = connected
            .verifier
            .verify_observed(
                &connected.session,
                id,
                scope,
                &report.relay(|_| "Verifying decryption on-chain..."),
            )
            .await;
        match result {
            Ok(outcome) => {
                self.bus
                    .publish(ClientEvent::RecordVerified {
                        id: id.clone(),
                        plaintext: outcome.plaintext,
                    })
                    .await;
                let message = match outcome.path {
                    VerificationPath::AlreadyVerified => {
                        self.records.mark_verified(id, outcome.plaintext);
                        "Data already verified on-chain"
                    }
                    VerificationPath::Submitted { .. } => {
                        self.reload_quietly().await;
                        "Data decrypted and verified successfully!"
                    }
                    VerificationPath::RaceAbsorbed => {
                        self.reload_quietly().await;
                        "Data is already verified on-chain"
                    }
                };
                report.succeed(message).await;
                Ok(outcome)
            }
            Err(e) => {
                if let VerificationError::VerificationMismatch {
                    id,
                    local,
                    confirmed,
                } = &e
                {
                    self.bus
                        .publish(ClientEvent::IntegrityViolation {
                            id: id.clone(),
                            local: *local,
                            confirmed: *confirmed,
                        })
                        .await;
                }
                report.fail(format!("Decryption failed: {e}")).await;
                Err(e.into())
            }
        }
    }

    /// Verify the record shown by `view`, under the view's scope.
    pub async fn verify_detail(&self, view: &DetailView) -> ClientResult<VerificationOutcome> {
        self.verify(view.record_id(), view.scope()).await
    }

    /// Probe whether the records contract answers.
    pub async fn check_availability(&self) -> ClientResult<bool> {
        let report = self
            .reporter
            .begin(
                OperationKind::AvailabilityCheck,
                "Checking contract availability...",
                OperationScope::detached(),
            )
            .await?;

        let available = self.reader.health_check().await;
        if available {
            report.succeed("Contract is available and ready!").await;
        } else {
            report.fail("Contract check failed").await;
        }
        Ok(available)
    }

    /// Open the detail of a cached record.
    pub fn open_detail(&self, id: &RecordId) -> ClientResult<DetailView> {
        let connected = self.connected().ok_or(ClientError::NotConnected)?;
        if self.records.get(id).is_none() {
            return Err(ClientError::RecordNotFound(id.clone()));
        }
        Ok(DetailView::open(id.clone(), connected.cache.clone()))
    }

    // =========================================================================
    // PROJECTIONS
    // =========================================================================

    pub fn records(&self) -> Vec<Record> {
        self.records.snapshot()
    }

    pub fn record(&self, id: &RecordId) -> Option<Record> {
        self.records.get(id)
    }

    pub fn summary(&self) -> Summary {
        self.summary_at(Timestamp::now())
    }

    pub fn summary_at(&self, now: Timestamp) -> Summary {
        self.view.summary(&self.records.snapshot(), now)
    }

    pub fn page(&self, query: &ViewQuery) -> Page<Record> {
        self.view.page(&self.records.snapshot(), query)
    }

    /// Status line to show now, if any.
    pub fn status(&self) -> Option<StatusView> {
        self.lifecycle.current()
    }

    pub fn busy_flags(&self) -> BusyFlags {
        self.lifecycle.busy_flags()
    }

    pub fn lifecycle(&self) -> &Arc<LifecycleMachine> {
        &self.lifecycle
    }

    pub fn bus(&self) -> &Arc<InMemoryEventBus> {
        &self.bus
    }

    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        self.bus.subscribe(filter)
    }

    /// Events matching `filter` as a `Stream`. The stream ends once the
    /// client is dropped.
    pub fn event_stream(&self, filter: EventFilter) -> EventStream {
        self.bus.event_stream(filter)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Local decryption of `id` held by the current session.
    pub fn local_plaintext(&self, id: &RecordId) -> Option<u64> {
        self.connected().and_then(|c| c.cache.get(id))
    }

    // =========================================================================
    // INTERNAL
    // =========================================================================

    async fn reload(&self) -> ClientResult<usize> {
        let ids = self.reader.list_record_ids().await?;
        let mut records = Vec::with_capacity(ids.len());
        let mut skipped = 0;

        for id in ids {
            match self.reader.get_record(&id).await {
                Ok(entry) => records.push(Record::from_entry(id, entry)),
                Err(e) => {
                    warn!(record_id = %id, error = %e, "Skipping record that failed to load");
                    skipped += 1;
                }
            }
        }

        let count = records.len();
        self.records.replace_all(records);
        debug!(count, skipped, "Records reloaded");
        self.bus
            .publish(ClientEvent::RecordsRefreshed { count, skipped })
            .await;
        Ok(count)
    }

    async fn reload_quietly(&self) {
        if let Err(e) = self.reload().await {
            warn!(error = %e, "Record reload after update failed");
        }
    }
}
