//! Tunable constants of summary computation.

use std::time::Duration;

use crate::domain::{AllowList, COLLECTIBLE_CAP, NATIVE_DECIMALS, NATIVE_SYMBOL};

/// Cache entry lifetime for a computed summary.
pub const CACHE_TTL: Duration = Duration::from_secs(300);

/// Namespace tag prepended to the subject to form a cache key.
pub const CACHE_KEY_PREFIX: &str = "account_summary:";

/// Policy decisions applied by the [`Summarizer`](super::Summarizer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryPolicy {
    /// Symbols priced and retained among fungible holdings.
    pub allow_list: AllowList,
    /// Symbol whose price values the native balance.
    pub native_symbol: String,
    /// Decimal count of the native smallest unit.
    pub native_decimals: u32,
    /// Maximum collectibles per summary.
    pub collectible_cap: usize,
    /// Lifetime of a cached summary.
    pub cache_ttl: Duration,
    /// Collapse concurrent misses for one subject into a single fetch.
    pub single_flight: bool,
}

impl Default for SummaryPolicy {
    fn default() -> Self {
        Self {
            allow_list: AllowList::default(),
            native_symbol: NATIVE_SYMBOL.to_string(),
            native_decimals: NATIVE_DECIMALS,
            collectible_cap: COLLECTIBLE_CAP,
            cache_ttl: CACHE_TTL,
            single_flight: true,
        }
    }
}
