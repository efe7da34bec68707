//! SQLite query history store.
//!
//! Snapshots are stored as JSON text. Timestamps are fixed-width RFC 3339
//! UTC with microseconds, so ordering the text column orders by time.

use chrono::{DateTime, SecondsFormat, Utc};
use diesel::prelude::*;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::{HistoryRow, NewHistoryRow};
use crate::adapter::outbound::sqlite::database::schema::address_query_history;
use crate::domain::{HistoryEntry, Subject};
use crate::error::PersistenceError;
use crate::port::outbound::HistoryStore;

/// SQLite-backed history store.
pub struct SqliteHistoryStore {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteHistoryStore {
    /// Create a new SQLite history store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn to_row(entry: &HistoryEntry) -> Result<NewHistoryRow, PersistenceError> {
        Ok(NewHistoryRow {
            address: entry.subject.to_string(),
            snapshot: serde_json::to_string(&entry.snapshot)
                .map_err(|e| PersistenceError::Serialization(e.to_string()))?,
            queried_at: format_timestamp(entry.queried_at),
        })
    }

    fn from_row(row: HistoryRow) -> Result<HistoryEntry, PersistenceError> {
        let snapshot = serde_json::from_str(&row.snapshot)
            .map_err(|e| PersistenceError::Serialization(e.to_string()))?;
        let queried_at = DateTime::parse_from_rfc3339(&row.queried_at)
            .map_err(|e| PersistenceError::Serialization(e.to_string()))?
            .with_timezone(&Utc);

        Ok(HistoryEntry {
            subject: Subject::new_unchecked(row.address),
            snapshot,
            queried_at,
        })
    }
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[async_trait::async_trait]
impl HistoryStore for SqliteHistoryStore {
    async fn append(&self, entry: &HistoryEntry) -> Result<(), PersistenceError> {
        let row = Self::to_row(entry)?;
        let mut conn = self
            .pool
            .get()
            .map_err(|e| PersistenceError::Connection(e.to_string()))?;

        diesel::insert_into(address_query_history::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| PersistenceError::Query(e.to_string()))?;

        Ok(())
    }

    async fn recent(
        &self,
        subject: &Subject,
        limit: usize,
    ) -> Result<Vec<HistoryEntry>, PersistenceError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| PersistenceError::Connection(e.to_string()))?;

        let rows: Vec<HistoryRow> = address_query_history::table
            .filter(address_query_history::address.eq(subject.as_str()))
            .order((
                address_query_history::queried_at.desc(),
                address_query_history::id.desc(),
            ))
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .select(HistoryRow::as_select())
            .load(&mut conn)
            .map_err(|e| PersistenceError::Query(e.to_string()))?;

        rows.into_iter().map(Self::from_row).collect()
    }
}
