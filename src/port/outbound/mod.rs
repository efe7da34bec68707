//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe infrastructure dependencies: the four upstream
//! data capabilities, the expiring summary cache and the history log.

pub mod cache;
pub mod history;
pub mod upstream;

pub use cache::CacheStore;
pub use history::HistoryStore;
pub use upstream::{CollectibleSource, NativeBalanceSource, PriceSource, TokenHoldingsSource};
