//! Recorded queries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::subject::Subject;
use super::summary::AssetSummary;

/// Default number of entries returned by a history lookup.
pub const HISTORY_LIMIT: usize = 20;

/// A summary as it was returned at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub subject: Subject,
    pub snapshot: AssetSummary,
    pub queried_at: DateTime<Utc>,
}

impl HistoryEntry {
    /// Stamp a snapshot with the current time.
    #[must_use]
    pub fn now(subject: Subject, snapshot: AssetSummary) -> Self {
        Self {
            subject,
            snapshot,
            queried_at: Utc::now(),
        }
    }
}
