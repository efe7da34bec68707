//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! through the outbound ports to implement the application's use cases.

pub mod account;
pub mod history;
pub mod summary;

pub use account::{AccountService, QueryOptions};
pub use history::HistoryRecorder;
pub use summary::{Summarizer, SummaryPolicy, UpstreamSources};
