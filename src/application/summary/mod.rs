//! Summary computation: cache-aside aggregation of upstream asset data.

mod aggregator;
mod policy;
mod single_flight;

pub use aggregator::{build_summary, cache_key, Summarizer, UpstreamSources};
pub use policy::{SummaryPolicy, CACHE_KEY_PREFIX, CACHE_TTL};
pub use single_flight::SingleFlight;
