//! Summary statistics over the full record set.

use serde::{Deserialize, Serialize};
use shared_types::{Record, Timestamp};

/// A record counts as recent while younger than this.
pub const RECENT_WINDOW_SECS: u64 = 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub verified_count: usize,
    /// Mean of `public_value`; 0 for an empty set.
    pub average_public_value: f64,
    /// Records created less than 24 h before `now`.
    pub recent_count: usize,
}

pub fn summarize(records: &[Record], now: Timestamp) -> Summary {
    if records.is_empty() {
        return Summary::default();
    }

    let total = records.len();
    let verified_count = records.iter().filter(|r| r.is_verified()).count();
    let sum: u128 = records.iter().map(|r| u128::from(r.public_value)).sum();
    // Records stamped after `now` (clock skew) have age 0 and count as recent.
    let recent_count = records
        .iter()
        .filter(|r| now.seconds_since(r.created_at) < RECENT_WINDOW_SECS)
        .count();

    Summary {
        total,
        verified_count,
        average_public_value: sum as f64 / total as f64,
        recent_count,
    }
}
