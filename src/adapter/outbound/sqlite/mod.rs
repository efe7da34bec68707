//! SQLite persistence adapters.
//!
//! Provides the SQLite-backed query history store using Diesel ORM.

pub mod database;
mod history;

pub use history::SqliteHistoryStore;
