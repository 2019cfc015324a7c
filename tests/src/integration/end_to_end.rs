//! # End-to-End Flows
//!
//! Connect, create, list, verify and re-verify through the client runtime
//! against the simulated deployment.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;
    use anyhow::{Context, Result};
    use shared_bus::{ClientEvent, EventFilter, EventTopic};
    use shared_types::{OperationScope, Timestamp};
    use std::time::Duration;
    use vf_03_decryption_verification::VerificationPath;
    use vf_05_aggregate_view::ViewQuery;

    #[tokio::test(start_paused = true)]
    async fn test_value_42_public_7_round_trip() -> Result<()> {
        let world = World::new()?;
        let decryption = world.decryption(Duration::ZERO);
        let client = world.client_with(config(), decryption.clone())?;
        client.connect(world.deployment.wallet(ALICE)).await?;

        // Create: unverified, public value is the supplied one.
        let record = client.create(draft("Salary", 42, 7)).await?;
        assert!(!record.is_verified());
        assert_eq!(record.public_value, 7);
        assert_eq!(record.creator, ALICE);

        let listed = client.record(&record.id).context("record listed")?;
        assert_eq!(listed.verified_plaintext(), None);
        assert_eq!(listed.public_value, 7);

        // First verify: local decryption, submission, confirmation.
        let detail = client.open_detail(&record.id)?;
        let first = client.verify_detail(&detail).await?;
        assert_eq!(first.plaintext, 42);
        assert!(matches!(first.path, VerificationPath::Submitted { .. }));
        assert_eq!(detail.local_plaintext(), None);
        detail.close();

        let listed = client.record(&record.id).context("record listed")?;
        assert_eq!(listed.verified_plaintext(), Some(42));

        // Second verify: served from the ledger.
        let second = client
            .verify(&record.id, &OperationScope::detached())
            .await?;
        assert_eq!(second.plaintext, 42);
        assert_eq!(second.path, VerificationPath::AlreadyVerified);
        assert_eq!(decryption.invocations(), 1);
        assert_eq!(world.deployment.ledger().verification_submissions(), 1);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_events_published_along_the_way() -> Result<()> {
        let world = World::connected(ALICE).await?;
        let mut records = world
            .client
            .subscribe(EventFilter::topics(vec![EventTopic::Records]));
        let mut verified = world
            .client
            .subscribe(EventFilter::topics(vec![EventTopic::Verification]));

        let record = world.client.create(draft("Vote", 3, 1)).await?;
        world
            .client
            .verify(&record.id, &OperationScope::detached())
            .await?;

        assert!(matches!(
            records.try_recv()?,
            Some(ClientEvent::RecordCreated { ref id, .. }) if *id == record.id
        ));
        assert!(matches!(
            records.try_recv()?,
            Some(ClientEvent::RecordsRefreshed { count: 1, skipped: 0 })
        ));
        assert_eq!(
            verified.try_recv()?,
            Some(ClientEvent::RecordVerified {
                id: record.id,
                plaintext: 3,
            })
        );
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_client_sees_verification() -> Result<()> {
        let world = World::connected(ALICE).await?;
        let record = world.client.create(draft("Medical", 120, 9)).await?;

        let bob = world.second_client()?;
        bob.connect(world.deployment.wallet(BOB)).await?;
        assert!(!bob.record(&record.id).context("listed")?.is_verified());

        world
            .client
            .verify(&record.id, &OperationScope::detached())
            .await?;
        bob.refresh().await?;

        let seen = bob.record(&record.id).context("listed")?;
        assert_eq!(seen.verified_plaintext(), Some(120));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_projections_over_created_records() -> Result<()> {
        let world = World::connected(ALICE).await?;
        for i in 0..7u64 {
            let title = if i % 2 == 0 { "Salary" } else { "Budget" };
            world.client.create(draft(title, i * 10, i + 1)).await?;
        }
        let first = world.client.records()[0].id.clone();
        world
            .client
            .verify(&first, &OperationScope::detached())
            .await?;

        let summary = world.client.summary_at(Timestamp::now());
        assert_eq!(summary.total, 7);
        assert_eq!(summary.verified_count, 1);
        assert_eq!(summary.average_public_value, 4.0);
        assert_eq!(summary.recent_count, 7);

        let page = world.client.page(&ViewQuery::default().page(2));
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 2);

        let salaries = world.client.page(&ViewQuery::search("SALARY"));
        assert_eq!(salaries.total_items, 4);
        assert_eq!(salaries.total_pages, 1);
        Ok(())
    }
}
