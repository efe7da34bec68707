//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`] drives the application (the CLI).
//! - [`outbound`] is driven by it: the Alchemy provider, the in-memory cache
//!   and the SQLite history store.

pub mod inbound;
pub mod outbound;
