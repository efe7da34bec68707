//! Query history recording and retrieval.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{AssetSummary, HistoryEntry, Subject, HISTORY_LIMIT};
use crate::error::PersistenceError;
use crate::port::outbound::HistoryStore;

/// Appends returned summaries to the history log and reads them back.
///
/// Independent of the cache and of summary computation.
#[derive(Clone)]
pub struct HistoryRecorder {
    store: Arc<dyn HistoryStore>,
    default_limit: usize,
}

impl HistoryRecorder {
    pub fn new(store: Arc<dyn HistoryStore>) -> Self {
        Self {
            store,
            default_limit: HISTORY_LIMIT,
        }
    }

    /// Use `limit` when [`retrieve`](Self::retrieve) is not given one.
    #[must_use]
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    /// Record `summary` as returned for `subject` now.
    ///
    /// # Errors
    ///
    /// Returns the store's [`PersistenceError`] unchanged.
    pub async fn save(
        &self,
        subject: &Subject,
        summary: &AssetSummary,
    ) -> Result<(), PersistenceError> {
        let entry = HistoryEntry::now(subject.clone(), summary.clone());
        self.store.append(&entry).await?;
        debug!(subject = %subject, queried_at = %entry.queried_at, "History entry saved");
        Ok(())
    }

    /// Most recent entries for `subject`, newest first.
    ///
    /// `limit` defaults to [`HISTORY_LIMIT`] unless configured otherwise.
    ///
    /// # Errors
    ///
    /// Returns the store's [`PersistenceError`] unchanged.
    pub async fn retrieve(
        &self,
        subject: &Subject,
        limit: Option<usize>,
    ) -> Result<Vec<HistoryEntry>, PersistenceError> {
        self.store
            .recent(subject, limit.unwrap_or(self.default_limit))
            .await
    }
}
