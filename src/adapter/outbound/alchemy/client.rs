//! Alchemy REST and JSON-RPC client.
//!
//! Transient transport failures (connect errors and timeouts) are retried a
//! bounded number of times with a fixed backoff. Everything else maps straight
//! to an [`UpstreamError`] naming the capability that failed.

use std::time::Duration;

use alloy_primitives::U256;
use async_trait::async_trait;
use futures_util::stream::{self, StreamExt, TryStreamExt};
use reqwest::{Client as HttpClient, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::time::sleep;
use tracing::{debug, warn};

use super::dto::{
    parse_quantity, NftsForOwner, PricesResponse, RpcRequest, RpcResponse, TokenBalance,
    TokenBalances, TokenMetadata,
};
use super::settings::AlchemyConfig;
use crate::domain::{OwnedCollectible, PriceTable, Subject, TokenHolding};
use crate::error::{Capability, UpstreamError};
use crate::port::outbound::{
    CollectibleSource, NativeBalanceSource, PriceSource, TokenHoldingsSource,
};

/// HTTP client for the Alchemy APIs.
pub struct AlchemyClient {
    http: HttpClient,
    rpc_url: String,
    nft_url: String,
    prices_url: String,
    nft_page_size: usize,
    metadata_concurrency: usize,
    retry_max_attempts: u32,
    retry_backoff_ms: u64,
}

impl AlchemyClient {
    #[must_use]
    pub fn from_config(config: &AlchemyConfig) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.http.timeout_ms))
            .connect_timeout(Duration::from_millis(config.http.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        let keyed = |base: &str| format!("{}/{}", base.trim_end_matches('/'), config.api_key);

        Self {
            http,
            rpc_url: keyed(&config.rpc_url),
            nft_url: keyed(&config.nft_url),
            prices_url: keyed(&config.prices_url),
            nft_page_size: config.nft_page_size.max(1),
            metadata_concurrency: config.metadata_concurrency.max(1),
            retry_max_attempts: config.http.retry_max_attempts,
            retry_backoff_ms: config.http.retry_backoff_ms,
        }
    }

    async fn send_with_retry<T, F>(
        &self,
        capability: Capability,
        request: F,
    ) -> Result<T, UpstreamError>
    where
        T: DeserializeOwned,
        F: Fn() -> RequestBuilder,
    {
        let mut attempt = 0;
        let max_attempts = self.retry_max_attempts.max(1);

        loop {
            attempt += 1;
            let response = match request().send().await {
                Ok(response) => response,
                Err(err) => {
                    if attempt >= max_attempts || !Self::should_retry(&err) {
                        return Err(UpstreamError::request(capability, err));
                    }
                    self.backoff(capability, attempt, max_attempts, &err).await;
                    continue;
                }
            };

            let status = response.status();
            if !status.is_success() {
                return Err(UpstreamError::Status {
                    capability,
                    status: status.as_u16(),
                });
            }

            match response.json::<T>().await {
                Ok(parsed) => return Ok(parsed),
                Err(err) if err.is_decode() => {
                    return Err(UpstreamError::malformed(capability, err));
                }
                Err(err) => {
                    if attempt >= max_attempts || !Self::should_retry(&err) {
                        return Err(UpstreamError::request(capability, err));
                    }
                    self.backoff(capability, attempt, max_attempts, &err).await;
                }
            }
        }
    }

    fn should_retry(err: &reqwest::Error) -> bool {
        err.is_timeout() || err.is_connect()
    }

    async fn backoff(
        &self,
        capability: Capability,
        attempt: u32,
        max_attempts: u32,
        err: &reqwest::Error,
    ) {
        warn!(
            %capability,
            attempt,
            max_attempts,
            error = %err,
            "HTTP request failed, retrying"
        );
        if self.retry_backoff_ms > 0 {
            sleep(Duration::from_millis(self.retry_backoff_ms)).await;
        }
    }

    async fn rpc<P, T>(&self, capability: Capability, method: &str, params: P) -> Result<T, UpstreamError>
    where
        P: Serialize,
        T: DeserializeOwned,
    {
        let body = RpcRequest::new(method, params);
        let response: RpcResponse<T> = self
            .send_with_retry(capability, || self.http.post(&self.rpc_url).json(&body))
            .await?;

        if let Some(error) = response.error {
            return Err(UpstreamError::request(
                capability,
                format!("{method} returned {}: {}", error.code, error.message),
            ));
        }
        response
            .result
            .ok_or_else(|| UpstreamError::malformed(capability, format!("{method} returned no result")))
    }

    async fn token_metadata(&self, contract: &str) -> Result<TokenMetadata, UpstreamError> {
        self.rpc(
            Capability::TokenHoldings,
            "alchemy_getTokenMetadata",
            [contract],
        )
        .await
    }

    async fn resolve_holding(
        &self,
        contract: String,
        raw_balance: U256,
    ) -> Result<TokenHolding, UpstreamError> {
        let metadata = self.token_metadata(&contract).await?;
        Ok(TokenHolding {
            contract,
            symbol: metadata.symbol,
            name: metadata.name,
            raw_balance,
            decimals: metadata.decimals,
            logo: metadata.logo,
        })
    }
}

/// Non-zero, error-free balances in upstream order.
fn nonzero_balances(balances: Vec<TokenBalance>) -> Result<Vec<(String, U256)>, UpstreamError> {
    let mut kept = Vec::with_capacity(balances.len());
    for balance in balances {
        if balance.error.as_ref().is_some_and(|e| !e.is_null()) {
            debug!(contract = %balance.contract_address, "Skipping errored token balance");
            continue;
        }
        let Some(raw) = balance.token_balance.as_deref() else {
            continue;
        };
        let amount = parse_quantity(raw).ok_or_else(|| {
            UpstreamError::malformed(
                Capability::TokenHoldings,
                format!("bad balance {raw:?} for {}", balance.contract_address),
            )
        })?;
        if !amount.is_zero() {
            kept.push((balance.contract_address, amount));
        }
    }
    Ok(kept)
}

#[async_trait]
impl NativeBalanceSource for AlchemyClient {
    async fn native_balance(&self, subject: &Subject) -> Result<U256, UpstreamError> {
        let raw: String = self
            .rpc(
                Capability::NativeBalance,
                "eth_getBalance",
                (subject.as_str(), "latest"),
            )
            .await?;
        parse_quantity(&raw).ok_or_else(|| {
            UpstreamError::malformed(Capability::NativeBalance, format!("bad quantity {raw:?}"))
        })
    }
}

#[async_trait]
impl TokenHoldingsSource for AlchemyClient {
    async fn token_holdings(&self, subject: &Subject) -> Result<Vec<TokenHolding>, UpstreamError> {
        let balances: TokenBalances = self
            .rpc(
                Capability::TokenHoldings,
                "alchemy_getTokenBalances",
                (subject.as_str(), "erc20"),
            )
            .await?;
        let nonzero = nonzero_balances(balances.token_balances)?;
        debug!(subject = %subject, tokens = nonzero.len(), "Resolving token metadata");

        stream::iter(nonzero)
            .map(|(contract, raw)| self.resolve_holding(contract, raw))
            .buffered(self.metadata_concurrency)
            .try_collect()
            .await
    }
}

#[async_trait]
impl PriceSource for AlchemyClient {
    async fn prices(&self, symbols: &[String]) -> Result<PriceTable, UpstreamError> {
        if symbols.is_empty() {
            return Ok(PriceTable::new());
        }
        let url = format!("{}/tokens/by-symbol", self.prices_url);
        let query: Vec<(&str, &str)> = symbols.iter().map(|s| ("symbols", s.as_str())).collect();

        let response: PricesResponse = self
            .send_with_retry(Capability::Prices, || self.http.get(&url).query(&query))
            .await?;
        Ok(response.into_table())
    }
}

#[async_trait]
impl CollectibleSource for AlchemyClient {
    async fn owned_collectibles(
        &self,
        subject: &Subject,
    ) -> Result<Vec<OwnedCollectible>, UpstreamError> {
        let url = format!("{}/getNFTsForOwner", self.nft_url);
        let page_size = self.nft_page_size.to_string();
        let query = [
            ("owner", subject.as_str()),
            ("withMetadata", "true"),
            ("pageSize", page_size.as_str()),
        ];

        let response: NftsForOwner = self
            .send_with_retry(Capability::Collectibles, || self.http.get(&url).query(&query))
            .await?;
        Ok(response
            .owned_nfts
            .into_iter()
            .map(OwnedCollectible::from)
            .collect())
    }
}
