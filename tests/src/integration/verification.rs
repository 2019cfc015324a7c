//! # Verification Protocol Flows
//!
//! Races between clients, integrity violations, monotonic verification and
//! cancellation through detail views.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;
    use anyhow::{Context, Result};
    use shared_bus::{ClientEvent, EventFilter, EventTopic};
    use shared_types::{OperationKind, OperationScope, OperationStatus};
    use std::time::Duration;
    use vf_03_decryption_verification::{VerificationError, VerificationPath};
    use vf_runtime::ClientError;

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_verifies_converge() -> Result<()> {
        let world = World::connected(ALICE).await?;
        let record = world.client.create(draft("Salary", 42, 7)).await?;

        let latency = Duration::from_millis(100);
        let alice = world.client_with(config(), world.decryption(latency))?;
        let bob = world.client_with(config(), world.decryption(latency))?;
        alice.connect(world.deployment.wallet(ALICE)).await?;
        bob.connect(world.deployment.wallet(BOB)).await?;

        let scope = OperationScope::detached();
        let (a, b) = tokio::join!(
            alice.verify(&record.id, &scope),
            bob.verify(&record.id, &scope),
        );
        let (a, b) = (a?, b?);

        assert_eq!(a.plaintext, 42);
        assert_eq!(b.plaintext, 42);
        let paths = [a.path.label(), b.path.label()];
        assert!(paths.contains(&"submitted"), "paths: {paths:?}");
        assert!(paths.contains(&"race_absorbed"), "paths: {paths:?}");
        assert_eq!(world.deployment.ledger().verification_submissions(), 2);

        for client in [&alice, &bob] {
            let seen = client.record(&record.id).context("listed")?;
            assert_eq!(seen.verified_plaintext(), Some(42));
            assert_eq!(client.local_plaintext(&record.id), None);
        }
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_diverging_ledger_value_is_integrity_violation() -> Result<()> {
        let world = World::connected(ALICE).await?;
        let record = world.client.create(draft("Salary", 42, 7)).await?;
        world.deployment.ledger().override_plaintext(&record.id, 41);
        let mut integrity = world
            .client
            .subscribe(EventFilter::topics(vec![EventTopic::Integrity]));

        let err = world
            .client
            .verify(&record.id, &OperationScope::detached())
            .await
            .unwrap_err();

        assert!(err.is_integrity_violation());
        assert_eq!(
            err,
            ClientError::Verification(VerificationError::VerificationMismatch {
                id: record.id.clone(),
                local: 42,
                confirmed: Some(41),
            })
        );
        assert_eq!(
            integrity.try_recv()?,
            Some(ClientEvent::IntegrityViolation {
                id: record.id.clone(),
                local: 42,
                confirmed: Some(41),
            })
        );
        let status = world.client.status().context("status shown")?;
        assert_eq!(status.status, OperationStatus::Error);
        assert!(status.message.starts_with("Decryption failed:"));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_verified_never_reverts() -> Result<()> {
        let world = World::connected(ALICE).await?;
        let record = world.client.create(draft("Salary", 42, 7)).await?;
        world
            .client
            .verify(&record.id, &OperationScope::detached())
            .await?;

        for _ in 0..3 {
            world.client.refresh().await?;
            let seen = world.client.record(&record.id).context("listed")?;
            assert_eq!(seen.verified_plaintext(), Some(42));
        }

        // Served from the ledger; nothing new is submitted.
        let again = world
            .client
            .verify(&record.id, &OperationScope::detached())
            .await?;
        assert_eq!(again.path, VerificationPath::AlreadyVerified);
        assert_eq!(world.deployment.ledger().verification_submissions(), 1);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_closing_view_during_decryption_cancels() -> Result<()> {
        let world = World::connected(ALICE).await?;
        let record = world.client.create(draft("Salary", 42, 7)).await?;
        let client = world.client_with(config(), world.decryption(Duration::from_secs(5)))?;
        client.connect(world.deployment.wallet(ALICE)).await?;

        let detail = client.open_detail(&record.id)?;
        let scope = detail.scope().clone();
        let close = async {
            tokio::time::sleep(Duration::from_secs(1)).await;
            detail.close();
        };
        let (result, ()) = tokio::join!(client.verify(&record.id, &scope), close);

        assert_eq!(
            result.unwrap_err(),
            ClientError::Verification(VerificationError::Cancelled)
        );
        assert_eq!(world.deployment.ledger().verification_submissions(), 0);
        assert!(!client.record(&record.id).context("listed")?.is_verified());
        assert_eq!(client.local_plaintext(&record.id), None);
        assert!(!client.busy_flags().decrypting);
        assert!(client
            .status()
            .map_or(true, |s| s.kind != OperationKind::DecryptVerify));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_closing_view_after_submission_completes_silently() -> Result<()> {
        let mut slow = config();
        slow.ledger.confirmation_delay = Duration::from_secs(5);
        let world = World::with_config(slow)?;
        world.client.connect(world.deployment.wallet(ALICE)).await?;
        let record = world.client.create(draft("Salary", 42, 7)).await?;

        let detail = world.client.open_detail(&record.id)?;
        let scope = detail.scope().clone();
        let close = async {
            tokio::time::sleep(Duration::from_secs(1)).await;
            detail.close();
        };
        let (result, ()) = tokio::join!(world.client.verify(&record.id, &scope), close);

        // Submitted before the view closed, so the call runs to completion.
        let outcome = result?;
        assert_eq!(outcome.plaintext, 42);
        assert!(matches!(outcome.path, VerificationPath::Submitted { .. }));
        assert_eq!(world.deployment.ledger().verification_submissions(), 1);
        let seen = world.client.record(&record.id).context("listed")?;
        assert_eq!(seen.verified_plaintext(), Some(42));

        // No status line for an operation whose view is gone.
        assert!(!world.client.busy_flags().decrypting);
        assert!(world
            .client
            .status()
            .map_or(true, |s| s.kind != OperationKind::DecryptVerify));
        Ok(())
    }
}
