//! Encryption Orchestrator - Core business logic
//!
//! ```text
//! validate ──→ encrypt(contract, caller, value) ──→ create_record ──→ confirm ──→ re-read
//! ```
//!
//! Nothing is written before encryption succeeds, and the record is only
//! returned once the ledger has confirmed it.

use crate::error::{EncryptionError, EncryptionResult};
use crate::ports::{CreatedRecord, EncryptionService, Submission};
use shared_types::{Milestone, ProgressSink, Record, RecordId, Session, Unobserved};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use vf_01_ledger_gateway::{LedgerError, LedgerSigner, NewRecord};

/// Encryption Orchestrator configuration
#[derive(Clone, Debug)]
pub struct EncryptionConfig {
    /// Upper bound on waiting for `create_record` inclusion
    pub confirmation_timeout: Duration,
}

impl Default for EncryptionConfig {
    fn default() -> Self {
        Self {
            confirmation_timeout: Duration::from_secs(60),
        }
    }
}

/// Creates records holding an encrypted value, on behalf of one signer.
pub struct EncryptionOrchestrator<E, L>
where
    E: EncryptionService + ?Sized,
    L: LedgerSigner + ?Sized,
{
    config: EncryptionConfig,
    encryption: Arc<E>,
    ledger: Arc<L>,
}

impl<E, L> EncryptionOrchestrator<E, L>
where
    E: EncryptionService + ?Sized,
    L: LedgerSigner + ?Sized,
{
    pub fn new(config: EncryptionConfig, encryption: Arc<E>, ledger: Arc<L>) -> Self {
        Self {
            config,
            encryption,
            ledger,
        }
    }

    /// Encrypt `submission.value` and create a record for it.
    ///
    /// # Errors
    ///
    /// - `InvalidSubmission` for a blank title or description
    /// - `SessionMismatch` if `session` is not the signer's
    /// - `EncryptionFailed`, `UserRejected`, `LedgerRejected`, `Ledger`
    pub async fn submit(
        &self,
        session: &Session,
        submission: Submission,
    ) -> EncryptionResult<CreatedRecord> {
        self.submit_observed(session, submission, &Unobserved).await
    }

    /// [`submit`](Self::submit), reporting [`Milestone::AwaitingConfirmation`]
    /// to `progress` once the create transaction is sent.
    #[instrument(skip(self, session, submission, progress), fields(creator = %session.identity().abbreviated()))]
    pub async fn submit_observed(
        &self,
        session: &Session,
        submission: Submission,
        progress: &dyn ProgressSink,
    ) -> EncryptionResult<CreatedRecord> {
        let title = submission.title.trim();
        let description = submission.description.trim();
        if title.is_empty() {
            return Err(EncryptionError::InvalidSubmission("title is required"));
        }
        if description.is_empty() {
            return Err(EncryptionError::InvalidSubmission("description is required"));
        }

        let signer = self.ledger.signer_identity();
        if session.identity() != signer {
            return Err(EncryptionError::SessionMismatch {
                session: session.identity(),
                signer,
            });
        }

        let input = self
            .encryption
            .encrypt(&session.contract(), &session.identity(), submission.value)
            .await?;
        debug!(handle = %input.handle, "Ciphertext ready");

        let id = RecordId::generate();
        let tx = self
            .ledger
            .create_record(NewRecord {
                id: id.clone(),
                title: title.to_string(),
                description: description.to_string(),
                input,
                public_value: submission.public_value,
            })
            .await
            .map_err(|e| {
                warn!(record_id = %id, error = %e, "create_record failed");
                EncryptionError::from(e)
            })?;
        progress.reached(Milestone::AwaitingConfirmation(tx)).await;

        let receipt = tokio::time::timeout(
            self.config.confirmation_timeout,
            self.ledger.wait_for_confirmation(&tx),
        )
        .await
        .map_err(|_| {
            EncryptionError::Ledger(LedgerError::ConfirmationTimeout {
                tx,
                waited_ms: u64::try_from(self.config.confirmation_timeout.as_millis())
                    .unwrap_or(u64::MAX),
            })
        })??;

        let entry = self.ledger.get_record(&id).await?;
        let record = Record::from_entry(id, entry);
        info!(record_id = %record.id, block = receipt.block_number, "Record submitted");

        Ok(CreatedRecord { record, receipt })
    }
}
