//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; the provider API key comes from
//! the `ALCHEMY_API_KEY` environment variable when set.
//!
//! # Example
//!
//! ```no_run
//! use walletlens::infrastructure::config::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use super::logging::LoggingConfig;
use crate::adapter::outbound::alchemy::settings::API_KEY_ENV;
use crate::adapter::outbound::alchemy::AlchemyConfig;
use crate::application::summary::SummaryPolicy;
use crate::domain::{
    AllowList, COLLECTIBLE_CAP, HISTORY_LIMIT, NATIVE_DECIMALS, NATIVE_SYMBOL, TRACKED_SYMBOLS,
};
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Every table is optional; an empty file yields the defaults, which still
/// need an API key from the environment to validate.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Data provider endpoints, key and HTTP behaviour.
    #[serde(default)]
    pub alchemy: AlchemyConfig,

    /// Summary cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Summary computation settings.
    #[serde(default)]
    pub summary: SummaryConfig,

    /// Query history settings.
    #[serde(default)]
    pub history: HistoryConfig,

    /// Path to SQLite database file.
    ///
    /// Defaults to "walletlens.db" in the current directory.
    #[serde(default = "default_database_path")]
    pub database: String,
}

fn default_database_path() -> String {
    "walletlens.db".to_string()
}

/// Summary cache settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Lifetime of a cached summary in seconds.
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,
    /// Optional bound on stored entries.
    #[serde(default)]
    pub max_entries: Option<usize>,
}

const fn default_cache_ttl_secs() -> u64 {
    300
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl_secs(),
            max_entries: None,
        }
    }
}

/// Summary computation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryConfig {
    /// Symbols priced and retained among token holdings.
    #[serde(default = "default_tracked_symbols")]
    pub tracked_symbols: Vec<String>,
    /// Symbol pricing the native balance; must be tracked.
    #[serde(default = "default_native_symbol")]
    pub native_symbol: String,
    /// Maximum NFTs per summary.
    #[serde(default = "default_collectible_cap")]
    pub collectible_cap: usize,
    /// Share one fetch between concurrent misses for the same address.
    #[serde(default = "default_true")]
    pub single_flight: bool,
    /// Default deadline for a summary, in milliseconds.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

fn default_tracked_symbols() -> Vec<String> {
    TRACKED_SYMBOLS.iter().map(|s| (*s).to_string()).collect()
}

fn default_native_symbol() -> String {
    NATIVE_SYMBOL.to_string()
}

const fn default_collectible_cap() -> usize {
    COLLECTIBLE_CAP
}

const fn default_true() -> bool {
    true
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            tracked_symbols: default_tracked_symbols(),
            native_symbol: default_native_symbol(),
            collectible_cap: default_collectible_cap(),
            single_flight: true,
            timeout_ms: None,
        }
    }
}

/// Query history settings.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    /// Record every successful summary query.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Entries returned by a history lookup without an explicit limit.
    #[serde(default = "default_history_limit")]
    pub limit: usize,
}

const fn default_history_limit() -> usize {
    HISTORY_LIMIT
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            limit: default_history_limit(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// `ALCHEMY_API_KEY`, when set and non-empty, replaces any key in the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        Self::parse_toml_with_key(content, std::env::var(API_KEY_ENV).ok())
    }

    /// Parse configuration with an explicit API key override.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml_with_key(content: &str, api_key: Option<String>) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            config.alchemy.api_key = key;
        }

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Initialize tracing from the `[logging]` table.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Summary policy derived from the `[summary]` and `[cache]` tables.
    #[must_use]
    pub fn summary_policy(&self) -> SummaryPolicy {
        SummaryPolicy {
            allow_list: AllowList::new(self.summary.tracked_symbols.iter().cloned()),
            native_symbol: self.summary.native_symbol.clone(),
            native_decimals: NATIVE_DECIMALS,
            collectible_cap: self.summary.collectible_cap,
            cache_ttl: Duration::from_secs(self.cache.ttl_secs),
            single_flight: self.summary.single_flight,
        }
    }

    /// Default summary deadline, if configured.
    #[must_use]
    pub fn summary_deadline(&self) -> Option<Duration> {
        self.summary.timeout_ms.map(Duration::from_millis)
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.alchemy.api_key.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: API_KEY_ENV,
            }
            .into());
        }

        if self.cache.ttl_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "cache.ttl_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.cache.max_entries == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "cache.max_entries",
                reason: "must be greater than 0 when set".to_string(),
            }
            .into());
        }

        if self.summary.collectible_cap == 0 {
            return Err(ConfigError::InvalidValue {
                field: "summary.collectible_cap",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.summary.tracked_symbols.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "summary.tracked_symbols",
                reason: "must not be empty".to_string(),
            }
            .into());
        }

        if !self
            .summary
            .tracked_symbols
            .contains(&self.summary.native_symbol)
        {
            return Err(ConfigError::InvalidValue {
                field: "summary.native_symbol",
                reason: format!(
                    "{} is not in summary.tracked_symbols",
                    self.summary.native_symbol
                ),
            }
            .into());
        }

        if self.summary.timeout_ms == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "summary.timeout_ms",
                reason: "must be greater than 0 when set".to_string(),
            }
            .into());
        }

        if self.history.limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "history.limit",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.database.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "database" }.into());
        }

        if self.alchemy.http.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "alchemy.http.timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn parse(content: &str) -> Result<Config> {
        Config::parse_toml_with_key(content, Some("test-key".into()))
    }

    fn invalid_field(result: Result<Config>) -> &'static str {
        match result {
            Err(Error::Config(ConfigError::InvalidValue { field, .. })) => field,
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config = parse("").unwrap();

        assert_eq!(config.database, "walletlens.db");
        assert_eq!(config.cache.ttl_secs, 300);
        assert_eq!(config.summary.collectible_cap, 12);
        assert_eq!(config.history.limit, 20);
        assert_eq!(config.summary_policy(), SummaryPolicy::default());
        assert_eq!(config.summary_deadline(), None);
    }

    #[test]
    fn key_override_replaces_file_key() {
        let config = Config::parse_toml_with_key(
            "[alchemy]\napi_key = \"from-file\"",
            Some("from-env".into()),
        )
        .unwrap();
        assert_eq!(config.alchemy.api_key, "from-env");

        let config =
            Config::parse_toml_with_key("[alchemy]\napi_key = \"from-file\"", Some(" ".into()))
                .unwrap();
        assert_eq!(config.alchemy.api_key, "from-file");
    }

    #[test]
    fn missing_api_key_is_rejected() {
        let err = Config::parse_toml_with_key("", None).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingField {
                field: "ALCHEMY_API_KEY"
            })
        ));
    }

    #[test]
    fn zero_ttl_is_rejected() {
        assert_eq!(invalid_field(parse("[cache]\nttl_secs = 0")), "cache.ttl_secs");
    }

    #[test]
    fn zero_collectible_cap_is_rejected() {
        assert_eq!(
            invalid_field(parse("[summary]\ncollectible_cap = 0")),
            "summary.collectible_cap"
        );
    }

    #[test]
    fn untracked_native_symbol_is_rejected() {
        assert_eq!(
            invalid_field(parse("[summary]\ntracked_symbols = [\"USDC\"]")),
            "summary.native_symbol"
        );
    }

    #[test]
    fn overrides_flow_into_policy() {
        let config = parse(
            r#"
            database = "/tmp/history.db"

            [cache]
            ttl_secs = 60

            [summary]
            tracked_symbols = ["ETH", "DAI"]
            collectible_cap = 4
            single_flight = false
            timeout_ms = 1500
            "#,
        )
        .unwrap();

        let policy = config.summary_policy();
        assert_eq!(policy.cache_ttl, Duration::from_secs(60));
        assert_eq!(policy.collectible_cap, 4);
        assert!(!policy.single_flight);
        assert!(policy.allow_list.contains("DAI"));
        assert!(!policy.allow_list.contains("USDC"));
        assert_eq!(config.summary_deadline(), Some(Duration::from_millis(1500)));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        assert!(matches!(
            parse("[cache\nttl_secs = 1"),
            Err(Error::Config(ConfigError::Parse(_)))
        ));
    }
}
