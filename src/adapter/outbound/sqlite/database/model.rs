//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::address_query_history;

/// Database row for a recorded query (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = address_query_history)]
pub struct NewHistoryRow {
    pub address: String,
    pub snapshot: String,
    pub queried_at: String,
}

/// Database row for a recorded query (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = address_query_history)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HistoryRow {
    pub id: i32,
    pub address: String,
    pub snapshot: String,
    pub queried_at: String,
}
