//! Alchemy data provider integration.
//!
//! One [`AlchemyClient`] serves all four upstream capabilities: JSON-RPC for
//! native and token balances, the Prices API, and the NFT API.

mod client;
mod dto;
pub mod settings;

pub use client::AlchemyClient;
pub use settings::{AlchemyConfig, AlchemyHttpConfig};
