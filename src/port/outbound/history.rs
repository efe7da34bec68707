//! Query history persistence port.

use async_trait::async_trait;

use crate::domain::{HistoryEntry, Subject};
use crate::error::PersistenceError;

/// Append-only log of returned summaries.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Append an entry. Entries are never updated or deleted through this port.
    async fn append(&self, entry: &HistoryEntry) -> Result<(), PersistenceError>;

    /// Up to `limit` entries for `subject`, most recent first.
    async fn recent(
        &self,
        subject: &Subject,
        limit: usize,
    ) -> Result<Vec<HistoryEntry>, PersistenceError>;
}
