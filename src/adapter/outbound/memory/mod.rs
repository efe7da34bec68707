//! In-process adapters.

mod cache;

pub use cache::MemoryCache;
