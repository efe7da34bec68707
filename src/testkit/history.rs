//! In-memory history store.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{HistoryEntry, Subject};
use crate::error::PersistenceError;
use crate::port::outbound::HistoryStore;

/// History store backed by a vector, with a failure switch and write delay.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    entries: Mutex<Vec<HistoryEntry>>,
    failing: AtomicBool,
    delay: Duration,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every append by `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Make every operation fail (or succeed again).
    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Everything appended so far, in insertion order.
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.lock().clone()
    }

    fn check(&self) -> Result<(), PersistenceError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(PersistenceError::Query("scripted failure".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn append(&self, entry: &HistoryEntry) -> Result<(), PersistenceError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.check()?;
        self.entries.lock().push(entry.clone());
        Ok(())
    }

    async fn recent(
        &self,
        subject: &Subject,
        limit: usize,
    ) -> Result<Vec<HistoryEntry>, PersistenceError> {
        self.check()?;
        let mut matching: Vec<HistoryEntry> = self
            .entries
            .lock()
            .iter()
            .rev()
            .filter(|e| &e.subject == subject)
            .cloned()
            .collect();
        // Stable: equal timestamps stay newest-inserted first.
        matching.sort_by(|a, b| b.queried_at.cmp(&a.queried_at));
        matching.truncate(limit);
        Ok(matching)
    }
}
