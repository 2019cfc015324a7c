//! Decryption-Verification Orchestrator - Core protocol
//!
//! ```text
//! 1. read record ──verified──→ return (AlreadyVerified)
//!        │
//! 2. read ciphertext handle
//!        │
//! 3. decrypt_and_prove ──scope closed──→ Cancelled
//!        │  (plaintext → local cache)
//! 4. submit ────────────AlreadyVerified──┐
//!        │                               │
//! 5. confirm ───────────AlreadyVerified──┤
//!        │                               ▼
//! 6. re-read, compare ←──────────── re-read, compare (RaceAbsorbed)
//!        │
//! 7. clear local cache
//! ```
//!
//! Steps run strictly in order. The scope is only consulted up to step 3:
//! once a transaction is signed it is followed to the end.

use crate::domain::{LocalDecryptionCache, VerificationOutcome, VerificationPath};
use crate::error::{VerificationError, VerificationResult};
use crate::metrics;
use crate::ports::{DecryptionService, VerificationSubmitter};
use shared_types::{
    Milestone, OperationScope, ProgressSink, Record, RecordId, Session, TxReceipt, Unobserved,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use vf_01_ledger_gateway::{LedgerError, LedgerReader};

/// Decryption-Verification configuration
#[derive(Clone, Debug)]
pub struct VerificationConfig {
    /// Upper bound on waiting for `submit_verification` inclusion
    pub confirmation_timeout: Duration,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            confirmation_timeout: Duration::from_secs(60),
        }
    }
}

/// What submission produced.
enum Submission {
    Confirmed(TxReceipt),
    LostRace,
}

/// Drives self-relayed decryption for one session.
pub struct VerificationOrchestrator<D, R, S>
where
    D: DecryptionService + ?Sized,
    R: LedgerReader + ?Sized,
    S: VerificationSubmitter + ?Sized,
{
    config: VerificationConfig,
    decryption: Arc<D>,
    reader: Arc<R>,
    submitter: Arc<S>,
    cache: Arc<LocalDecryptionCache>,
}

impl<D, R, S> VerificationOrchestrator<D, R, S>
where
    D: DecryptionService + ?Sized,
    R: LedgerReader + ?Sized,
    S: VerificationSubmitter + ?Sized,
{
    pub fn new(
        config: VerificationConfig,
        decryption: Arc<D>,
        reader: Arc<R>,
        submitter: Arc<S>,
        cache: Arc<LocalDecryptionCache>,
    ) -> Self {
        Self {
            config,
            decryption,
            reader,
            submitter,
            cache,
        }
    }

    /// The session's local decryption cache.
    pub fn cache(&self) -> &Arc<LocalDecryptionCache> {
        &self.cache
    }

    /// Obtain the ledger-confirmed plaintext of `id`, decrypting and
    /// submitting a proof if the record is not verified yet.
    pub async fn verify(
        &self,
        session: &Session,
        id: &RecordId,
        scope: &OperationScope,
    ) -> VerificationResult<VerificationOutcome> {
        self.verify_observed(session, id, scope, &Unobserved).await
    }

    /// [`verify`](Self::verify), reporting [`Milestone::AwaitingConfirmation`]
    /// to `progress` once the verification transaction is sent.
    #[instrument(skip(self, session, scope, progress), fields(record_id = %id))]
    pub async fn verify_observed(
        &self,
        session: &Session,
        id: &RecordId,
        scope: &OperationScope,
        progress: &dyn ProgressSink,
    ) -> VerificationResult<VerificationOutcome> {
        let result = self.run(session, id, scope, progress).await;
        match &result {
            Ok(outcome) => {
                metrics::record_verification(outcome.path.label());
                info!(plaintext = outcome.plaintext, path = outcome.path.label(), "Record verified");
            }
            Err(err) => {
                metrics::record_failure(err.kind());
                if !err.is_fatal() {
                    warn!(error = %err, kind = err.kind(), "Verification failed");
                }
            }
        }
        result
    }

    async fn run(
        &self,
        session: &Session,
        id: &RecordId,
        scope: &OperationScope,
        progress: &dyn ProgressSink,
    ) -> VerificationResult<VerificationOutcome> {
        let submitter = self.submitter.submitter_identity();
        if session.identity() != submitter {
            return Err(VerificationError::SessionMismatch {
                session: session.identity(),
                submitter,
            });
        }
        if scope.is_closed() {
            return Err(VerificationError::Cancelled);
        }

        // 1. Short-circuit
        let record = self.read_record(id).await?;
        if let Some(plaintext) = record.verified_plaintext() {
            debug!("Already verified, skipping decryption");
            self.cache.clear(id);
            return Ok(VerificationOutcome {
                record_id: id.clone(),
                plaintext,
                path: VerificationPath::AlreadyVerified,
            });
        }

        // 2. Ciphertext resolution
        let handle = self.reader.get_ciphertext_handle(id).await?;
        let contract = session.contract();

        // 3. Local decryption + proof
        metrics::record_local_decryption();
        let handles = [handle];
        let decryption = tokio::select! {
            biased;
            _ = scope.closed() => {
                info!("Scope closed during decryption");
                return Err(VerificationError::Cancelled);
            }
            result = self.decryption.decrypt_and_prove(&handles, &contract) => result?,
        };
        if scope.is_closed() {
            info!("Scope closed before submission");
            return Err(VerificationError::Cancelled);
        }
        let local = *decryption.clear_values.get(&handle).ok_or_else(|| {
            VerificationError::DecryptionFailed(format!("no clear value for handle {handle}"))
        })?;
        self.cache.store(id, local);
        debug!(handle = %handle, "Decrypted locally");

        // 4-5. Submission and confirmation
        let path = match self
            .submit_and_confirm(id, &decryption.abi_encoded, &decryption.proof, progress)
            .await?
        {
            Submission::Confirmed(receipt) => VerificationPath::Submitted { receipt },
            Submission::LostRace => {
                info!("Another submission verified the record first");
                VerificationPath::RaceAbsorbed
            }
        };

        // 6. Reconciliation
        let confirmed = self.read_record(id).await?.verified_plaintext();
        if confirmed != Some(local) {
            return Err(self.integrity_violation(id, local, confirmed));
        }

        // 7. Superseded by ledger state
        self.cache.clear(id);

        Ok(VerificationOutcome {
            record_id: id.clone(),
            plaintext: local,
            path,
        })
    }

    async fn read_record(&self, id: &RecordId) -> VerificationResult<Record> {
        let entry = self.reader.get_record(id).await?;
        Ok(Record::from_entry(id.clone(), entry))
    }

    async fn submit_and_confirm(
        &self,
        id: &RecordId,
        clear_values: &shared_types::AbiEncodedValues,
        proof: &shared_types::DecryptionProof,
        progress: &dyn ProgressSink,
    ) -> VerificationResult<Submission> {
        let tx = match self.submitter.submit(id, clear_values, proof).await {
            Ok(tx) => tx,
            Err(e) if e.is_already_verified() => return Ok(Submission::LostRace),
            Err(e) => return Err(e.into()),
        };
        debug!(tx = %tx, "Verification submitted");
        progress.reached(Milestone::AwaitingConfirmation(tx)).await;

        let timeout = self.config.confirmation_timeout;
        match tokio::time::timeout(timeout, self.submitter.confirm(&tx)).await {
            Ok(Ok(receipt)) => Ok(Submission::Confirmed(receipt)),
            Ok(Err(e)) if e.is_already_verified() => Ok(Submission::LostRace),
            Ok(Err(e)) => Err(e.into()),
            Err(_) => Err(VerificationError::Ledger(LedgerError::ConfirmationTimeout {
                tx,
                waited_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            })),
        }
    }

    fn integrity_violation(
        &self,
        id: &RecordId,
        local: u64,
        confirmed: Option<u64>,
    ) -> VerificationError {
        metrics::record_mismatch();
        error!(
            record_id = %id,
            local,
            confirmed = ?confirmed,
            "INTEGRITY VIOLATION: ledger plaintext differs from local decryption"
        );
        VerificationError::VerificationMismatch {
            id: id.clone(),
            local,
            confirmed,
        }
    }
}
