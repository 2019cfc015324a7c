//! # Operation Lifecycle Flows
//!
//! Status lines, busy flags and display windows as seen by a presentation
//! layer driving the client.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;
    use anyhow::{Context, Result};
    use shared_bus::{ClientEvent, EventFilter, EventTopic};
    use shared_types::{OperationEvent, OperationKind, OperationScope, OperationStatus};
    use std::time::Duration;
    use tokio::time::advance;
    use vf_runtime::ClientError;

    fn drain(sub: &mut shared_bus::Subscription) -> Result<Vec<OperationEvent>> {
        let mut events = Vec::new();
        while let Some(event) = sub.try_recv()? {
            if let ClientEvent::Operation(op) = event {
                events.push(op);
            }
        }
        Ok(events)
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_reports_pending_then_success() -> Result<()> {
        let world = World::connected(ALICE).await?;
        let mut lifecycle = world
            .client
            .subscribe(EventFilter::topics(vec![EventTopic::Lifecycle]));

        world.client.create(draft("Salary", 42, 7)).await?;

        let events = drain(&mut lifecycle)?;
        assert_eq!(events.len(), 3);
        assert!(matches!(
            &events[0],
            OperationEvent::Started { kind: OperationKind::Create, message, .. }
                if message == "Creating secure form with FHE..."
        ));
        assert!(matches!(
            &events[1],
            OperationEvent::Progress { message, .. }
                if message == "Waiting for transaction confirmation..."
        ));
        assert_eq!(events[2].status(), OperationStatus::Success);
        assert_eq!(events[2].message(), "Secure form created successfully!");
        assert!(events
            .iter()
            .all(|e| e.operation_id() == events[0].operation_id()));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_board_shows_confirmation_wait() -> Result<()> {
        let mut slow = config();
        slow.ledger.confirmation_delay = Duration::from_secs(5);
        let world = World::with_config(slow)?;
        world.client.connect(world.deployment.wallet(ALICE)).await?;

        let sample = async {
            tokio::time::sleep(Duration::from_secs(1)).await;
            world.client.status()
        };
        let (created, during_create) =
            tokio::join!(world.client.create(draft("Salary", 42, 7)), sample);
        let record = created?;
        let during_create = during_create.context("status shown while confirming")?;
        assert_eq!(during_create.kind, OperationKind::Create);
        assert_eq!(during_create.status, OperationStatus::Pending);
        assert_eq!(during_create.message, "Waiting for transaction confirmation...");

        let scope = OperationScope::detached();
        let sample = async {
            tokio::time::sleep(Duration::from_secs(1)).await;
            world.client.status()
        };
        let (verified, during_verify) =
            tokio::join!(world.client.verify(&record.id, &scope), sample);
        verified?;
        let during_verify = during_verify.context("status shown while confirming")?;
        assert_eq!(during_verify.kind, OperationKind::DecryptVerify);
        assert_eq!(during_verify.status, OperationStatus::Pending);
        assert_eq!(during_verify.message, "Verifying decryption on-chain...");
        assert!(!world.client.busy_flags().any());
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_expires_after_two_seconds() -> Result<()> {
        let world = World::connected(ALICE).await?;
        world.client.create(draft("Salary", 42, 7)).await?;

        let status = world.client.status().context("status shown")?;
        assert_eq!(status.status, OperationStatus::Success);
        assert_eq!(status.kind, OperationKind::Create);

        advance(Duration::from_millis(1_999)).await;
        assert!(world.client.status().is_some());
        advance(Duration::from_millis(1)).await;
        assert_eq!(world.client.status(), None);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_expires_after_three_seconds() -> Result<()> {
        let world = World::new()?;

        let err = world.client.create(draft("Salary", 42, 7)).await.unwrap_err();
        assert_eq!(err, ClientError::NotConnected);

        let status = world.client.status().context("status shown")?;
        assert_eq!(status.status, OperationStatus::Error);
        assert_eq!(status.message, "Please connect wallet first");

        advance(Duration::from_millis(2_500)).await;
        assert!(world.client.status().is_some());
        advance(Duration::from_millis(500)).await;
        assert_eq!(world.client.status(), None);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_latest_write_wins() -> Result<()> {
        let world = World::connected(ALICE).await?;
        world.client.create(draft("Salary", 42, 7)).await?;
        world.client.check_availability().await?;

        let status = world.client.status().context("status shown")?;
        assert_eq!(status.kind, OperationKind::AvailabilityCheck);
        assert_eq!(status.message, "Contract is available and ready!");
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_busy_flag_raised_while_decrypting() -> Result<()> {
        let world = World::connected(ALICE).await?;
        let record = world.client.create(draft("Salary", 42, 7)).await?;
        let client = world.client_with(config(), world.decryption(Duration::from_secs(1)))?;
        client.connect(world.deployment.wallet(ALICE)).await?;
        assert!(!client.busy_flags().any());

        let scope = OperationScope::detached();
        let sample = async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            let flags = client.busy_flags();
            let status = client.status();
            (flags, status)
        };
        let (result, (flags, status)) = tokio::join!(client.verify(&record.id, &scope), sample);
        result?;

        assert!(flags.decrypting);
        assert!(!flags.creating);
        let status = status.context("pending status shown")?;
        assert_eq!(status.status, OperationStatus::Pending);
        assert_eq!(status.message, "Decrypting with FHE...");
        assert!(!client.busy_flags().any());
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_operation_gets_its_own_tracker() -> Result<()> {
        let world = World::connected(ALICE).await?;
        let a = world.client.create(draft("First", 1, 1)).await?;
        let b = world.client.create(draft("Second", 2, 2)).await?;
        let mut lifecycle = world
            .client
            .subscribe(EventFilter::topics(vec![EventTopic::Lifecycle]));

        let scope = OperationScope::detached();
        let (ra, rb) = tokio::join!(
            world.client.verify(&a.id, &scope),
            world.client.verify(&b.id, &scope),
        );
        ra?;
        rb?;

        let events = drain(&mut lifecycle)?;
        let started: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, OperationEvent::Started { .. }))
            .map(OperationEvent::operation_id)
            .collect();
        assert_eq!(started.len(), 2);
        assert_ne!(started[0], started[1]);
        for id in started {
            assert_eq!(
                world.client.lifecycle().status_of(&id),
                OperationStatus::Success
            );
        }
        Ok(())
    }
}
