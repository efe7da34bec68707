//! Alchemy provider configuration.

use serde::Deserialize;

/// Environment variable holding the Alchemy API key.
pub const API_KEY_ENV: &str = "ALCHEMY_API_KEY";

/// Alchemy endpoints and client behaviour.
///
/// The API key is appended as a path segment to every base URL. It is read
/// from [`API_KEY_ENV`] when not set in the file.
#[derive(Debug, Clone, Deserialize)]
pub struct AlchemyConfig {
    /// API key; prefer the environment over the config file.
    #[serde(default)]
    pub api_key: String,
    /// JSON-RPC base URL (native balance, token balances, token metadata).
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    /// NFT API base URL.
    #[serde(default = "default_nft_url")]
    pub nft_url: String,
    /// Prices API base URL.
    #[serde(default = "default_prices_url")]
    pub prices_url: String,
    /// Page size requested from the NFT API.
    #[serde(default = "default_nft_page_size")]
    pub nft_page_size: usize,
    /// Concurrent token metadata lookups.
    #[serde(default = "default_metadata_concurrency")]
    pub metadata_concurrency: usize,
    #[serde(default)]
    pub http: AlchemyHttpConfig,
}

fn default_rpc_url() -> String {
    "https://eth-mainnet.g.alchemy.com/v2".into()
}

fn default_nft_url() -> String {
    "https://eth-mainnet.g.alchemy.com/nft/v3".into()
}

fn default_prices_url() -> String {
    "https://api.g.alchemy.com/prices/v1".into()
}

const fn default_nft_page_size() -> usize {
    100
}

const fn default_metadata_concurrency() -> usize {
    8
}

impl Default for AlchemyConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            rpc_url: default_rpc_url(),
            nft_url: default_nft_url(),
            prices_url: default_prices_url(),
            nft_page_size: default_nft_page_size(),
            metadata_concurrency: default_metadata_concurrency(),
            http: AlchemyHttpConfig::default(),
        }
    }
}

/// Alchemy HTTP client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AlchemyHttpConfig {
    /// Request timeout in milliseconds.
    #[serde(default = "default_http_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_http_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Maximum number of attempts for transient failures.
    #[serde(default = "default_http_retry_max_attempts")]
    pub retry_max_attempts: u32,
    /// Backoff between retries in milliseconds.
    #[serde(default = "default_http_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

const fn default_http_timeout_ms() -> u64 {
    10_000
}

const fn default_http_connect_timeout_ms() -> u64 {
    3000
}

const fn default_http_retry_max_attempts() -> u32 {
    3
}

const fn default_http_retry_backoff_ms() -> u64 {
    250
}

impl Default for AlchemyHttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_http_timeout_ms(),
            connect_timeout_ms: default_http_connect_timeout_ms(),
            retry_max_attempts: default_http_retry_max_attempts(),
            retry_backoff_ms: default_http_retry_backoff_ms(),
        }
    }
}
