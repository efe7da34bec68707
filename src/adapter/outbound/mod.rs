//! Outbound adapters implementing the driven ports.

pub mod alchemy;
pub mod memory;
pub mod sqlite;
