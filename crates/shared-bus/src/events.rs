//! # Client Events
//!
//! Everything the core tells its presentation layer: operation status
//! transitions, record set refreshes, creations, verifications, and
//! integrity violations.

use serde::{Deserialize, Serialize};
use shared_types::{OperationEvent, RecordId, TxHash};

/// All events that can be published to the event bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientEvent {
    // =========================================================================
    // LIFECYCLE
    // =========================================================================
    /// A status transition of one operation instance.
    Operation(OperationEvent),

    // =========================================================================
    // RECORDS
    // =========================================================================
    /// The record set was re-read from the ledger.
    RecordsRefreshed {
        /// Number of records loaded.
        count: usize,
        /// Number of entries skipped because they failed to load.
        skipped: usize,
    },

    /// A new record was confirmed on the ledger.
    RecordCreated {
        /// The new record.
        id: RecordId,
        /// Creating transaction.
        tx: TxHash,
    },

    // =========================================================================
    // VERIFICATION
    // =========================================================================
    /// A record's plaintext is confirmed on-chain.
    RecordVerified {
        /// The verified record.
        id: RecordId,
        /// Ledger-confirmed plaintext.
        plaintext: u64,
    },

    /// Local decryption and the ledger disagree.
    ///
    /// Never expected in a correct deployment.
    IntegrityViolation {
        /// Affected record.
        id: RecordId,
        /// Plaintext obtained locally.
        local: u64,
        /// Plaintext the ledger confirmed, `None` if it reports the record
        /// unverified.
        confirmed: Option<u64>,
    },
}

impl ClientEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::Operation(_) => EventTopic::Lifecycle,
            Self::RecordsRefreshed { .. } | Self::RecordCreated { .. } => EventTopic::Records,
            Self::RecordVerified { .. } => EventTopic::Verification,
            Self::IntegrityViolation { .. } => EventTopic::Integrity,
        }
    }

    /// The record this event concerns, if any.
    #[must_use]
    pub fn record_id(&self) -> Option<&RecordId> {
        match self {
            Self::RecordCreated { id, .. }
            | Self::RecordVerified { id, .. }
            | Self::IntegrityViolation { id, .. } => Some(id),
            Self::Operation(_) | Self::RecordsRefreshed { .. } => None,
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Operation status transitions.
    Lifecycle,
    /// Record set changes.
    Records,
    /// Confirmed verifications.
    Verification,
    /// Integrity violations.
    Integrity,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Records to include. Empty means all records; events without a record
    /// never pass a non-empty record filter.
    pub record_ids: Vec<RecordId>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            record_ids: Vec::new(),
        }
    }

    /// Create a filter for events about one record (detail views).
    #[must_use]
    pub fn for_record(id: RecordId) -> Self {
        Self {
            topics: Vec::new(),
            record_ids: vec![id],
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &ClientEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let record_match = self.record_ids.is_empty()
            || event
                .record_id()
                .is_some_and(|id| self.record_ids.contains(id));

        topic_match && record_match
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{OperationId, OperationKind};

    fn verified(id: &str) -> ClientEvent {
        ClientEvent::RecordVerified {
            id: RecordId::new(id),
            plaintext: 42,
        }
    }

    #[test]
    fn test_event_topics() {
        let op = ClientEvent::Operation(OperationEvent::Started {
            id: OperationId::new(),
            kind: OperationKind::Refresh,
            message: "Loading".into(),
        });
        assert_eq!(op.topic(), EventTopic::Lifecycle);
        assert_eq!(verified("form-1").topic(), EventTopic::Verification);
        assert_eq!(
            ClientEvent::RecordsRefreshed { count: 3, skipped: 0 }.topic(),
            EventTopic::Records
        );
    }

    #[test]
    fn test_filter_all_matches_everything() {
        let filter = EventFilter::all();
        assert!(filter.matches(&verified("form-1")));
        assert!(filter.matches(&ClientEvent::RecordsRefreshed { count: 0, skipped: 0 }));
    }

    #[test]
    fn test_filter_by_topic() {
        let filter = EventFilter::topics(vec![EventTopic::Integrity]);
        assert!(!filter.matches(&verified("form-1")));
        assert!(filter.matches(&ClientEvent::IntegrityViolation {
            id: RecordId::new("form-1"),
            local: 1,
            confirmed: Some(2),
        }));
    }

    #[test]
    fn test_filter_by_record() {
        let filter = EventFilter::for_record(RecordId::new("form-1"));
        assert!(filter.matches(&verified("form-1")));
        assert!(!filter.matches(&verified("form-2")));
        assert!(!filter.matches(&ClientEvent::RecordsRefreshed { count: 1, skipped: 0 }));
    }
}
