//! # Failure Flows
//!
//! Rejected signatures, invalid input, unreachable ledgers and undecodable
//! entries, and what the client shows for each.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;
    use anyhow::{Context, Result};
    use shared_bus::{ClientEvent, EventFilter, EventTopic};
    use shared_types::{OperationScope, OperationStatus};
    use vf_01_ledger_gateway::LedgerError;
    use vf_02_encryption::EncryptionError;
    use vf_runtime::{ClientError, RecordDraft};

    #[tokio::test(start_paused = true)]
    async fn test_rejected_create_leaves_no_record() -> Result<()> {
        let world = World::new()?;
        let wallet = world.deployment.wallet(ALICE);
        world.client.connect(wallet.clone()).await?;
        wallet.set_approval(false);

        let err = world
            .client
            .create(draft("Salary", 42, 7))
            .await
            .unwrap_err();

        assert!(err.is_user_rejection());
        let status = world.client.status().context("status shown")?;
        assert_eq!(status.status, OperationStatus::Error);
        assert_eq!(status.message, "Transaction rejected by user");
        assert_eq!(world.deployment.ledger().record_count(), 0);
        assert!(world.client.records().is_empty());
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_title_rejected_before_encryption() -> Result<()> {
        let world = World::connected(ALICE).await?;
        let blank = RecordDraft {
            title: "   ".into(),
            ..draft("Salary", 42, 7)
        };

        let err = world.client.create(blank).await.unwrap_err();

        assert!(matches!(
            err,
            ClientError::Encryption(EncryptionError::InvalidSubmission(_))
        ));
        assert!(world.deployment.coprocessor().is_empty());
        let status = world.client.status().context("status shown")?;
        assert!(status.message.starts_with("Submission failed:"));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_verification_can_be_retried() -> Result<()> {
        let world = World::new()?;
        let wallet = world.deployment.wallet(ALICE);
        world.client.connect(wallet.clone()).await?;
        let record = world.client.create(draft("Salary", 42, 7)).await?;
        let scope = OperationScope::detached();

        wallet.set_approval(false);
        let err = world.client.verify(&record.id, &scope).await.unwrap_err();
        assert!(err.is_user_rejection());
        // The local decryption survives for display.
        assert_eq!(world.client.local_plaintext(&record.id), Some(42));
        assert!(!world.client.record(&record.id).context("listed")?.is_verified());

        wallet.set_approval(true);
        let outcome = world.client.verify(&record.id, &scope).await?;
        assert_eq!(outcome.plaintext, 42);
        assert_eq!(world.client.local_plaintext(&record.id), None);
        assert_eq!(world.deployment.ledger().verification_submissions(), 1);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_unavailable_ledger() -> Result<()> {
        let world = World::connected(ALICE).await?;
        world.deployment.ledger().set_available(false);

        let err = world.client.refresh().await.unwrap_err();
        assert!(matches!(err, ClientError::Ledger(LedgerError::Unavailable(_))));
        let status = world.client.status().context("status shown")?;
        assert_eq!(status.message, "Failed to load data");

        assert!(!world.client.check_availability().await?);
        let status = world.client.status().context("status shown")?;
        assert_eq!(status.status, OperationStatus::Error);
        assert_eq!(status.message, "Contract check failed");
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_unreadable_entry_is_skipped() -> Result<()> {
        let world = World::connected(ALICE).await?;
        let broken = world.client.create(draft("Broken", 1, 1)).await?;
        let fine = world.client.create(draft("Fine", 2, 2)).await?;
        world.deployment.ledger().mark_unreadable(&broken.id);
        let mut records = world
            .client
            .subscribe(EventFilter::topics(vec![EventTopic::Records]));

        assert_eq!(world.client.refresh().await?, 1);

        assert_eq!(
            records.try_recv()?,
            Some(ClientEvent::RecordsRefreshed { count: 1, skipped: 1 })
        );
        assert!(world.client.record(&broken.id).is_none());
        assert!(world.client.record(&fine.id).is_some());
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_actions_after_disconnect_need_a_session() -> Result<()> {
        let world = World::connected(ALICE).await?;
        let record = world.client.create(draft("Salary", 42, 7)).await?;
        assert!(world.client.disconnect());

        let err = world
            .client
            .verify(&record.id, &OperationScope::detached())
            .await
            .unwrap_err();
        assert_eq!(err, ClientError::NotConnected);
        assert_eq!(world.client.refresh().await, Err(ClientError::NotConnected));
        assert!(world.client.records().is_empty());
        assert_eq!(world.deployment.ledger().verification_submissions(), 0);
        Ok(())
    }
}
