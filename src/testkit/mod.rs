//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`upstream`] - Scriptable [`FakeUpstream`](upstream::FakeUpstream)
//!   implementing all four upstream ports, with call counters.
//! - [`cache`] - [`RecordingCache`](cache::RecordingCache): an in-memory
//!   cache that counts writes and can be told to fail.
//! - [`history`] - [`MemoryHistoryStore`](history::MemoryHistoryStore).
//! - [`domain`] - Builders for subjects, holdings, collectibles, summaries.
//! - [`config`] - Canonical test configuration.

pub mod cache;
pub mod config;
pub mod domain;
pub mod history;
pub mod upstream;
