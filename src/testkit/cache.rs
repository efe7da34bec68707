//! Cache fake that records writes and fails on demand.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::adapter::outbound::memory::MemoryCache;
use crate::error::CacheError;
use crate::port::outbound::CacheStore;

#[derive(Debug, Default)]
struct Inner {
    store: MemoryCache,
    writes: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    last_ttl: Mutex<Option<Duration>>,
}

/// [`MemoryCache`] wrapper counting successful writes. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct RecordingCache {
    inner: Arc<Inner>,
}

impl RecordingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_reads(&self, failing: bool) {
        self.inner.fail_reads.store(failing, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, failing: bool) {
        self.inner.fail_writes.store(failing, Ordering::SeqCst);
    }

    /// Successful `set` calls so far.
    pub fn writes(&self) -> usize {
        self.inner.writes.load(Ordering::SeqCst)
    }

    /// TTL passed to the most recent successful `set`.
    pub fn last_ttl(&self) -> Option<Duration> {
        *self.inner.last_ttl.lock()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.store.is_empty()
    }
}

#[async_trait]
impl CacheStore for RecordingCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        if self.inner.fail_reads.load(Ordering::SeqCst) {
            return Err(CacheError::Unavailable("scripted read failure".into()));
        }
        self.inner.store.get(key).await
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        if self.inner.fail_writes.load(Ordering::SeqCst) {
            return Err(CacheError::Unavailable("scripted write failure".into()));
        }
        self.inner.store.set(key, value, ttl).await?;
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        *self.inner.last_ttl.lock() = Some(ttl);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, CacheError> {
        self.inner.store.delete(key).await
    }
}
