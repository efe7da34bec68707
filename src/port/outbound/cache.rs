//! Expiring key-value cache port.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::CacheError;

/// Key-value store with per-entry expiry, holding serialized values.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Value stored under `key`, if present and not expired.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store `value` under `key`, replacing any previous value, for `ttl`.
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError>;

    /// Remove `key`. Returns whether an entry was present.
    async fn delete(&self, key: &str) -> Result<bool, CacheError>;
}
