//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::alchemy::AlchemyClient;
use crate::adapter::outbound::memory::MemoryCache;
use crate::adapter::outbound::sqlite::database::connection::{
    configure_sqlite_connection, create_pool, run_migrations,
};
use crate::adapter::outbound::sqlite::SqliteHistoryStore;
use crate::application::{AccountService, HistoryRecorder, Summarizer, UpstreamSources};
use crate::error::{PersistenceError, Result};
use crate::infrastructure::config::Config;
use crate::port::outbound::{CacheStore, HistoryStore};

/// Build the summary cache from configuration.
#[must_use]
pub fn build_cache(config: &Config) -> Arc<dyn CacheStore> {
    match config.cache.max_entries {
        Some(max) => Arc::new(MemoryCache::with_capacity(max)),
        None => Arc::new(MemoryCache::new()),
    }
}

/// Open the history database, applying pending migrations and WAL mode.
///
/// # Errors
/// Returns an error if the database cannot be opened or migrated.
pub fn build_history_store(config: &Config) -> Result<Arc<dyn HistoryStore>> {
    let pool = create_pool(&config.database)?;
    run_migrations(&pool)?;
    {
        let mut conn = pool
            .get()
            .map_err(|e| PersistenceError::Connection(e.to_string()))?;
        configure_sqlite_connection(&mut conn)?;
    }
    info!(database = %config.database, "History database ready");
    Ok(Arc::new(SqliteHistoryStore::new(pool)))
}

/// Wire an [`AccountService`] from explicit upstream, cache and history parts.
#[must_use]
pub fn assemble(
    config: &Config,
    sources: UpstreamSources,
    cache: Arc<dyn CacheStore>,
    history: Arc<dyn HistoryStore>,
) -> AccountService {
    let summarizer = Summarizer::new(sources, cache, config.summary_policy());
    let recorder = HistoryRecorder::new(history).with_default_limit(config.history.limit);
    AccountService::new(Arc::new(summarizer), recorder)
}

/// Build the production [`AccountService`]: Alchemy upstream, in-memory
/// cache, SQLite history.
///
/// # Errors
/// Returns an error if the history database cannot be prepared.
pub fn build_account_service(config: &Config) -> Result<AccountService> {
    let provider = Arc::new(AlchemyClient::from_config(&config.alchemy));
    let history = build_history_store(config)?;
    Ok(assemble(
        config,
        UpstreamSources::from_provider(provider),
        build_cache(config),
        history,
    ))
}
