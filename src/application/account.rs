//! Account queries: summarize, then record in the background.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::warn;

use super::history::HistoryRecorder;
use super::summary::Summarizer;
use crate::domain::{AssetSummary, HistoryEntry, Subject};
use crate::error::{PersistenceError, Result};

/// Per-call knobs for [`AccountService::query_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// Append the returned summary to the history log.
    pub record: bool,
    /// Abort the summary if it takes longer than this.
    pub deadline: Option<Duration>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            record: true,
            deadline: None,
        }
    }
}

/// Entry point for inbound adapters.
///
/// History saves are spawned and never block or fail a query. Call
/// [`flush`](Self::flush) before shutdown to let pending saves finish.
pub struct AccountService {
    summarizer: Arc<Summarizer>,
    recorder: HistoryRecorder,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl AccountService {
    pub fn new(summarizer: Arc<Summarizer>, recorder: HistoryRecorder) -> Self {
        Self {
            summarizer,
            recorder,
            pending: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn summarizer(&self) -> &Summarizer {
        &self.summarizer
    }

    /// Summarize `subject` and record the result.
    ///
    /// # Errors
    ///
    /// Returns any summary error. Recording failures are only logged.
    pub async fn query(&self, subject: &Subject) -> Result<AssetSummary> {
        self.query_with(subject, QueryOptions::default()).await
    }

    /// Summarize `subject` with explicit options.
    ///
    /// # Errors
    ///
    /// Returns any summary error, including a deadline expiry.
    pub async fn query_with(
        &self,
        subject: &Subject,
        options: QueryOptions,
    ) -> Result<AssetSummary> {
        let summary = match options.deadline {
            Some(deadline) => self.summarizer.summarize_within(subject, deadline).await?,
            None => self.summarizer.summarize(subject).await?,
        };

        if options.record {
            self.spawn_save(subject.clone(), summary.clone());
        }

        Ok(summary)
    }

    /// Recorded summaries for `subject`, newest first.
    ///
    /// # Errors
    ///
    /// Returns the history store's failure.
    pub async fn history(
        &self,
        subject: &Subject,
        limit: Option<usize>,
    ) -> std::result::Result<Vec<HistoryEntry>, PersistenceError> {
        self.recorder.retrieve(subject, limit).await
    }

    /// Wait for every spawned history save to finish.
    pub async fn flush(&self) {
        let pending = std::mem::take(&mut *self.pending.lock());
        for handle in pending {
            if let Err(e) = handle.await {
                warn!(error = %e, "History save task aborted");
            }
        }
    }

    fn spawn_save(&self, subject: Subject, summary: AssetSummary) {
        let recorder = self.recorder.clone();
        let handle = tokio::spawn(async move {
            if let Err(e) = recorder.save(&subject, &summary).await {
                warn!(subject = %subject, error = %e, "Failed to record query history");
            }
        });

        let mut pending = self.pending.lock();
        pending.retain(|h| !h.is_finished());
        pending.push(handle);
    }
}
