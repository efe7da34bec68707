//! Scriptable upstream provider.
//!
//! [`FakeUpstream`] implements every upstream port from one shared, mutable
//! script. Clones share state, so a test can hand one clone to the code under
//! test and keep another to script failures and read call counters.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::U256;
use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{OwnedCollectible, PriceTable, Subject, TokenHolding};
use crate::error::{Capability, UpstreamError};
use crate::port::outbound::{
    CollectibleSource, NativeBalanceSource, PriceSource, TokenHoldingsSource,
};

#[derive(Debug, Default)]
struct Script {
    native: U256,
    holdings: Vec<TokenHolding>,
    prices: PriceTable,
    collectibles: Vec<OwnedCollectible>,
    failing: HashSet<Capability>,
    delay: Duration,
    calls: HashMap<Capability, usize>,
    requested_symbols: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct FakeUpstream {
    script: Arc<Mutex<Script>>,
}

impl FakeUpstream {
    /// Empty account: zero native balance, no holdings, prices or NFTs.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_native(self, raw: U256) -> Self {
        self.script.lock().native = raw;
        self
    }

    pub fn with_holdings(self, holdings: Vec<TokenHolding>) -> Self {
        self.script.lock().holdings = holdings;
        self
    }

    pub fn with_prices<I, S>(self, prices: I) -> Self
    where
        I: IntoIterator<Item = (S, rust_decimal::Decimal)>,
        S: Into<String>,
    {
        self.script.lock().prices = prices.into_iter().collect();
        self
    }

    pub fn with_collectibles(self, collectibles: Vec<OwnedCollectible>) -> Self {
        self.script.lock().collectibles = collectibles;
        self
    }

    /// Sleep this long inside every call.
    pub fn with_delay(self, delay: Duration) -> Self {
        self.script.lock().delay = delay;
        self
    }

    pub fn failing(self, capability: Capability) -> Self {
        self.fail(capability);
        self
    }

    pub fn fail(&self, capability: Capability) {
        self.script.lock().failing.insert(capability);
    }

    pub fn heal(&self, capability: Capability) {
        self.script.lock().failing.remove(&capability);
    }

    pub fn set_native(&self, raw: U256) {
        self.script.lock().native = raw;
    }

    pub fn calls(&self, capability: Capability) -> usize {
        self.script
            .lock()
            .calls
            .get(&capability)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.script.lock().calls.values().sum()
    }

    pub fn reset_calls(&self) {
        let mut script = self.script.lock();
        script.calls.clear();
        script.requested_symbols.clear();
    }

    /// Symbol lists passed to `prices`, in call order.
    pub fn requested_symbols(&self) -> Vec<Vec<String>> {
        self.script.lock().requested_symbols.clone()
    }

    async fn enter(&self, capability: Capability) -> Result<(), UpstreamError> {
        let delay = {
            let mut script = self.script.lock();
            *script.calls.entry(capability).or_default() += 1;
            script.delay
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if self.script.lock().failing.contains(&capability) {
            return Err(UpstreamError::request(capability, "scripted failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl NativeBalanceSource for FakeUpstream {
    async fn native_balance(&self, _subject: &Subject) -> Result<U256, UpstreamError> {
        self.enter(Capability::NativeBalance).await?;
        Ok(self.script.lock().native)
    }
}

#[async_trait]
impl TokenHoldingsSource for FakeUpstream {
    async fn token_holdings(&self, _subject: &Subject) -> Result<Vec<TokenHolding>, UpstreamError> {
        self.enter(Capability::TokenHoldings).await?;
        Ok(self.script.lock().holdings.clone())
    }
}

#[async_trait]
impl PriceSource for FakeUpstream {
    async fn prices(&self, symbols: &[String]) -> Result<PriceTable, UpstreamError> {
        self.script.lock().requested_symbols.push(symbols.to_vec());
        self.enter(Capability::Prices).await?;
        Ok(self.script.lock().prices.clone())
    }
}

#[async_trait]
impl CollectibleSource for FakeUpstream {
    async fn owned_collectibles(
        &self,
        _subject: &Subject,
    ) -> Result<Vec<OwnedCollectible>, UpstreamError> {
        self.enter(Capability::Collectibles).await?;
        Ok(self.script.lock().collectibles.clone())
    }
}
