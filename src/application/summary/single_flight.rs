//! Per-key in-flight de-duplication.
//!
//! Concurrent callers for the same key share one computation: the first
//! caller runs it, later callers await its result. A failed or cancelled
//! computation leaves the slot empty, so the next waiter runs its own.

use std::future::Future;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::OnceCell;

/// Table of in-flight computations keyed by string.
pub struct SingleFlight<T> {
    calls: DashMap<String, Arc<OnceCell<T>>>,
}

/// Participation in one in-flight slot; releases the slot on drop.
struct Flight<'a, T> {
    calls: &'a DashMap<String, Arc<OnceCell<T>>>,
    key: &'a str,
    cell: Arc<OnceCell<T>>,
}

impl<T> Drop for Flight<'_, T> {
    fn drop(&mut self) {
        // Map + this flight are the only holders when nobody else is waiting.
        self.calls.remove_if(self.key, |_, cell| {
            Arc::ptr_eq(cell, &self.cell) && (cell.initialized() || Arc::strong_count(cell) <= 2)
        });
    }
}

impl<T: Clone> SingleFlight<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            calls: DashMap::new(),
        }
    }

    /// Run `compute` for `key` unless an identical computation is already in
    /// flight, in which case wait for and clone its result.
    ///
    /// # Errors
    ///
    /// Returns the error of the computation this caller ran itself. Waiters
    /// never observe another caller's error; they retry instead.
    pub async fn run<F, Fut, E>(&self, key: &str, compute: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let cell = Arc::clone(self.calls.entry(key.to_string()).or_default().value());
        let flight = Flight {
            calls: &self.calls,
            key,
            cell,
        };
        let value = flight.cell.get_or_try_init(compute).await?;
        Ok(value.clone())
    }

    /// Number of keys with a computation currently in flight.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.calls.len()
    }
}

impl<T: Clone> Default for SingleFlight<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn concurrent_callers_share_one_computation() {
        let flights = SingleFlight::<u32>::new();
        let runs = AtomicU32::new(0);
        let counter = &runs;

        let compute = move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok::<_, ()>(7)
        };

        let (a, b, c) = tokio::join!(
            flights.run("k", compute),
            flights.run("k", compute),
            flights.run("k", compute),
        );

        assert_eq!((a, b, c), (Ok(7), Ok(7), Ok(7)));
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(flights.in_flight(), 0);
    }

    #[tokio::test]
    async fn different_keys_run_independently() {
        let flights = SingleFlight::<u32>::new();
        let runs = AtomicU32::new(0);

        let counter = &runs;
        let compute = move |v: u32| {
            move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(5)).await;
                Ok::<_, ()>(v)
            }
        };

        let (a, b) = tokio::join!(flights.run("a", compute(1)), flights.run("b", compute(2)));

        assert_eq!((a, b), (Ok(1), Ok(2)));
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failure_is_not_shared_and_slot_is_released() {
        let flights = SingleFlight::<u32>::new();

        let failed: Result<u32, &str> = flights.run("k", || async { Err("boom") }).await;
        assert_eq!(failed, Err("boom"));
        assert_eq!(flights.in_flight(), 0);

        let ok: Result<u32, &str> = flights.run("k", || async { Ok(3) }).await;
        assert_eq!(ok, Ok(3));
    }

    #[tokio::test]
    async fn cancelled_leader_lets_next_caller_compute() {
        let flights = SingleFlight::<u32>::new();

        let slow = flights.run("k", || async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok::<_, ()>(1)
        });
        assert!(tokio::time::timeout(Duration::from_millis(10), slow)
            .await
            .is_err());

        let fresh = flights.run("k", || async { Ok::<_, ()>(2) }).await;
        assert_eq!(fresh, Ok(2));
        assert_eq!(flights.in_flight(), 0);
    }
}
