//! Upstream data ports.
//!
//! Four independent request/response capabilities of the chain data
//! provider. Each call either returns its full result or an
//! [`UpstreamError`]; there is no partial success. Retry policy, if any,
//! belongs to the implementation.

use alloy_primitives::U256;
use async_trait::async_trait;

use crate::domain::{OwnedCollectible, PriceTable, Subject, TokenHolding};
use crate::error::UpstreamError;

/// Native coin balance lookup.
#[async_trait]
pub trait NativeBalanceSource: Send + Sync {
    /// Balance in the smallest native unit (wei).
    async fn native_balance(&self, subject: &Subject) -> Result<U256, UpstreamError>;
}

/// Fungible token holdings lookup.
#[async_trait]
pub trait TokenHoldingsSource: Send + Sync {
    /// Every fungible holding the provider reports, unfiltered.
    async fn token_holdings(&self, subject: &Subject) -> Result<Vec<TokenHolding>, UpstreamError>;
}

/// Fiat price lookup for a symbol set.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Prices for `symbols`. Symbols the provider cannot price are simply absent.
    async fn prices(&self, symbols: &[String]) -> Result<PriceTable, UpstreamError>;
}

/// NFT ownership lookup.
#[async_trait]
pub trait CollectibleSource: Send + Sync {
    /// Owned NFTs in provider order.
    async fn owned_collectibles(
        &self,
        subject: &Subject,
    ) -> Result<Vec<OwnedCollectible>, UpstreamError>;
}
