//! Cache-aside asset summary aggregation.
//!
//! A [`Summarizer`] answers "what does this address hold?" by reading the
//! cache first and, on a miss, fetching prices, native balance, token
//! holdings and NFTs concurrently, merging them into an [`AssetSummary`] and
//! writing the result back. The merge is all-or-nothing: any upstream
//! failure aborts the call and nothing is cached.

use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::U256;
use tracing::{debug, info, warn};

use super::policy::{SummaryPolicy, CACHE_KEY_PREFIX};
use super::single_flight::SingleFlight;
use crate::domain::error::DomainError;
use crate::domain::money::scale_units;
use crate::domain::{
    select_collectibles, AssetSummary, FungibleAsset, NativeAsset, OwnedCollectible, PriceTable,
    Subject, TokenHolding,
};
use crate::error::{Result, UpstreamError};
use crate::port::outbound::{
    CacheStore, CollectibleSource, NativeBalanceSource, PriceSource, TokenHoldingsSource,
};

/// Cache key for a subject's summary. Case-sensitive on the subject.
#[must_use]
pub fn cache_key(subject: &Subject) -> String {
    format!("{CACHE_KEY_PREFIX}{subject}")
}

/// The four upstream capabilities a summary is built from.
#[derive(Clone)]
pub struct UpstreamSources {
    pub native: Arc<dyn NativeBalanceSource>,
    pub holdings: Arc<dyn TokenHoldingsSource>,
    pub prices: Arc<dyn PriceSource>,
    pub collectibles: Arc<dyn CollectibleSource>,
}

impl UpstreamSources {
    /// Use one provider for all four capabilities.
    pub fn from_provider<P>(provider: Arc<P>) -> Self
    where
        P: NativeBalanceSource + TokenHoldingsSource + PriceSource + CollectibleSource + 'static,
    {
        Self {
            native: provider.clone(),
            holdings: provider.clone(),
            prices: provider.clone(),
            collectibles: provider,
        }
    }
}

/// Merge raw upstream results into a summary.
///
/// Holdings are filtered to the allow-list here, once, before any value is
/// computed. Missing token decimals mean no scaling; missing prices mean zero.
/// A holding whose amount, value or contribution to the total does not fit a
/// decimal is skipped with a warning, so one spoofed token cannot sink the
/// summary.
///
/// # Errors
///
/// Returns a [`DomainError`] only when the native balance itself cannot be
/// represented.
pub fn build_summary(
    subject: Subject,
    prices: &PriceTable,
    native_raw: U256,
    holdings: Vec<TokenHolding>,
    owned: &[OwnedCollectible],
    policy: &SummaryPolicy,
) -> std::result::Result<AssetSummary, DomainError> {
    let native_balance = scale_units(native_raw, policy.native_decimals)?;
    let native = NativeAsset::new(native_balance, prices.price_of(&policy.native_symbol))?;

    let mut total = native.value();
    let mut fungibles = Vec::new();
    for holding in policy.allow_list.retain(holdings) {
        let contract = holding.contract.clone();
        let priced = price_holding(holding, prices).and_then(|line| {
            let next = total
                .checked_add(line.value())
                .ok_or(DomainError::TotalOverflow)?;
            Ok((line, next))
        });
        match priced {
            Ok((line, next)) => {
                total = next;
                fungibles.push(line);
            }
            Err(e) => warn!(
                subject = %subject,
                contract = %contract,
                error = %e,
                "Skipping unrepresentable token holding"
            ),
        }
    }

    let collectibles = select_collectibles(owned, policy.collectible_cap);

    AssetSummary::new(subject, native, fungibles, collectibles)
}

fn price_holding(
    holding: TokenHolding,
    prices: &PriceTable,
) -> std::result::Result<FungibleAsset, DomainError> {
    let balance = scale_units(holding.raw_balance, holding.decimals.unwrap_or(0))?;
    let price = prices.price_of_opt(holding.symbol.as_deref());
    FungibleAsset::new(
        holding.symbol.unwrap_or_default(),
        holding.name,
        balance,
        price,
        holding.contract,
        holding.logo,
    )
}

/// Read-through summary service.
pub struct Summarizer {
    sources: UpstreamSources,
    cache: Arc<dyn CacheStore>,
    policy: SummaryPolicy,
    flights: Option<SingleFlight<AssetSummary>>,
}

impl Summarizer {
    pub fn new(sources: UpstreamSources, cache: Arc<dyn CacheStore>, policy: SummaryPolicy) -> Self {
        let flights = policy.single_flight.then(SingleFlight::new);
        Self {
            sources,
            cache,
            policy,
            flights,
        }
    }

    #[must_use]
    pub const fn policy(&self) -> &SummaryPolicy {
        &self.policy
    }

    /// Summary for `subject`, from cache when fresh, otherwise freshly built.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Upstream`](crate::error::Error::Upstream) if any of
    /// the four upstream calls fails; nothing is cached in that case. Cache
    /// failures never surface: reads degrade to a miss, writes are logged.
    pub async fn summarize(&self, subject: &Subject) -> Result<AssetSummary> {
        let key = cache_key(subject);

        if let Some(cached) = self.read_cached(&key).await {
            debug!(subject = %subject, "Summary cache hit");
            return Ok(cached);
        }
        debug!(subject = %subject, "Summary cache miss");

        match &self.flights {
            Some(flights) => {
                flights
                    .run(&key, || self.compute_and_store(subject, &key))
                    .await
            }
            None => self.compute_and_store(subject, &key).await,
        }
    }

    /// [`summarize`](Self::summarize) bounded by `deadline`.
    ///
    /// Outstanding upstream calls are dropped on expiry. The cache is only
    /// written after a summary is complete, so an expired call leaves it
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Timeout`] when the deadline passes first.
    pub async fn summarize_within(
        &self,
        subject: &Subject,
        deadline: Duration,
    ) -> Result<AssetSummary> {
        match tokio::time::timeout(deadline, self.summarize(subject)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(subject = %subject, deadline_ms = deadline.as_millis() as u64, "Summary deadline exceeded");
                Err(UpstreamError::Timeout(deadline).into())
            }
        }
    }

    /// Drop the cached summary so the next call refetches.
    ///
    /// Returns whether an entry was removed; cache failures count as "no".
    pub async fn invalidate(&self, subject: &Subject) -> bool {
        match self.cache.delete(&cache_key(subject)).await {
            Ok(removed) => removed,
            Err(e) => {
                warn!(subject = %subject, error = %e, "Failed to invalidate cached summary");
                false
            }
        }
    }

    async fn compute_and_store(&self, subject: &Subject, key: &str) -> Result<AssetSummary> {
        let summary = self.compute(subject).await?;
        self.write_cached(key, &summary).await;
        info!(
            subject = %subject,
            total_value = %summary.total_value(),
            fungibles = summary.fungibles().len(),
            collectibles = summary.collectibles().len(),
            "Summary computed"
        );
        Ok(summary)
    }

    async fn compute(&self, subject: &Subject) -> Result<AssetSummary> {
        let symbols = self.policy.allow_list.symbols();
        let (prices, native_raw, holdings, owned) = tokio::try_join!(
            self.sources.prices.prices(symbols),
            self.sources.native.native_balance(subject),
            self.sources.holdings.token_holdings(subject),
            self.sources.collectibles.owned_collectibles(subject),
        )
        .inspect_err(|e| warn!(subject = %subject, error = %e, "Upstream fetch failed"))?;

        Ok(build_summary(
            subject.clone(),
            &prices,
            native_raw,
            holdings,
            &owned,
            &self.policy,
        )?)
    }

    async fn read_cached(&self, key: &str) -> Option<AssetSummary> {
        let raw = match self.cache.get(key).await {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(key, error = %e, "Cache read failed, treating as miss");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(summary) => Some(summary),
            Err(e) => {
                warn!(key, error = %e, "Discarding undecodable cached summary");
                None
            }
        }
    }

    async fn write_cached(&self, key: &str, summary: &AssetSummary) {
        let raw = match serde_json::to_string(summary) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key, error = %e, "Failed to serialize summary for cache");
                return;
            }
        };
        if let Err(e) = self.cache.set(key, raw, self.policy.cache_ttl).await {
            warn!(key, error = %e, "Cache write failed, returning uncached summary");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::memory::MemoryCache;
    use crate::error::{Capability, Error};
    use crate::testkit::cache::RecordingCache;
    use crate::testkit::domain::{holding, owned_nft, subject};
    use crate::testkit::upstream::FakeUpstream;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn example_upstream() -> FakeUpstream {
        FakeUpstream::new()
            .with_native(U256::from(2_500_000_000_000_000_000u128))
            .with_prices([("ETH", dec!(2000)), ("USDC", dec!(1.00))])
            .with_holdings(vec![holding("USDC", 1_000_000, Some(6))])
    }

    fn summarizer(upstream: &FakeUpstream, cache: Arc<dyn CacheStore>) -> Summarizer {
        Summarizer::new(
            UpstreamSources::from_provider(Arc::new(upstream.clone())),
            cache,
            SummaryPolicy::default(),
        )
    }

    #[test]
    fn cache_key_is_prefixed_subject() {
        let s = Subject::new_unchecked("0xAbC");
        assert_eq!(cache_key(&s), "account_summary:0xAbC");
    }

    #[test]
    fn build_summary_matches_worked_example() {
        let prices: PriceTable = [("ETH", dec!(2000)), ("USDC", dec!(1.00))]
            .into_iter()
            .collect();
        let summary = build_summary(
            subject(),
            &prices,
            U256::from(2_500_000_000_000_000_000u128),
            vec![holding("USDC", 1_000_000, Some(6))],
            &[],
            &SummaryPolicy::default(),
        )
        .unwrap();

        assert_eq!(summary.native().balance(), dec!(2.5));
        assert_eq!(summary.native().value(), dec!(5000));
        assert_eq!(summary.fungibles()[0].balance(), dec!(1.0));
        assert_eq!(summary.fungibles()[0].value(), dec!(1.0));
        assert_eq!(summary.total_value(), dec!(5001.0));
    }

    #[test]
    fn build_summary_filters_unlisted_tokens_before_totalling() {
        let prices: PriceTable = [("SHIB", dec!(0.01)), ("DAI", dec!(1))]
            .into_iter()
            .collect();
        let summary = build_summary(
            subject(),
            &prices,
            U256::ZERO,
            vec![
                holding("SHIB", 1_000, Some(0)),
                holding("DAI", 5, Some(0)),
            ],
            &[],
            &SummaryPolicy::default(),
        )
        .unwrap();

        assert_eq!(summary.fungibles().len(), 1);
        assert_eq!(summary.fungibles()[0].symbol(), "DAI");
        assert_eq!(summary.total_value(), dec!(5));
    }

    #[test]
    fn build_summary_prices_missing_symbols_at_zero() {
        let summary = build_summary(
            subject(),
            &PriceTable::new(),
            U256::from(10u64).pow(U256::from(18u64)),
            vec![holding("WBTC", 100_000_000, Some(8))],
            &[],
            &SummaryPolicy::default(),
        )
        .unwrap();

        assert_eq!(summary.native().price(), Decimal::ZERO);
        assert_eq!(summary.fungibles()[0].balance(), dec!(1));
        assert_eq!(summary.fungibles()[0].value(), Decimal::ZERO);
        assert_eq!(summary.total_value(), Decimal::ZERO);
    }

    #[test]
    fn build_summary_treats_missing_decimals_as_unscaled() {
        let summary = build_summary(
            subject(),
            &[("LINK", dec!(15))].into_iter().collect(),
            U256::ZERO,
            vec![holding("LINK", 3, None)],
            &[],
            &SummaryPolicy::default(),
        )
        .unwrap();
        assert_eq!(summary.fungibles()[0].balance(), dec!(3));
        assert_eq!(summary.total_value(), dec!(45));
    }

    #[test]
    fn build_summary_keeps_spoofed_wide_balance_alongside_real_tokens() {
        let prices: PriceTable = [("USDC", dec!(1)), ("USDT", dec!(1))]
            .into_iter()
            .collect();
        let spoofed = U256::from(10u64).pow(U256::from(30u64));
        let summary = build_summary(
            subject(),
            &prices,
            U256::ZERO,
            vec![
                holding("USDC", 1_000_000, Some(6)),
                TokenHolding {
                    raw_balance: spoofed,
                    decimals: Some(18),
                    ..holding("USDT", 0, None)
                },
            ],
            &[],
            &SummaryPolicy::default(),
        )
        .unwrap();

        assert_eq!(summary.fungibles().len(), 2);
        assert_eq!(summary.fungibles()[1].balance(), dec!(1000000000000));
        assert_eq!(summary.total_value(), dec!(1000000000001));
    }

    #[test]
    fn build_summary_skips_holdings_beyond_decimal_range() {
        let prices: PriceTable = [
            ("USDC", dec!(1)),
            ("DAI", dec!(2)),
            ("LINK", dec!(1)),
            ("WBTC", dec!(1)),
        ]
        .into_iter()
        .collect();
        let huge = U256::from(10u64).pow(U256::from(40u64));
        let near_max = U256::from(70_000_000_000_000_000_000_000_000_000u128);
        let wide = |symbol: &str, raw: U256| TokenHolding {
            raw_balance: raw,
            ..holding(symbol, 0, Some(0))
        };
        let summary = build_summary(
            subject(),
            &prices,
            U256::ZERO,
            vec![
                holding("USDC", 1_000_000, Some(6)),
                wide("USDT", huge),
                wide("DAI", near_max),
                wide("LINK", near_max),
                wide("WBTC", near_max),
            ],
            &[],
            &SummaryPolicy::default(),
        )
        .unwrap();

        // USDT: amount too wide. DAI: value too large. WBTC: total too large.
        let symbols: Vec<_> = summary.fungibles().iter().map(|f| f.symbol()).collect();
        assert_eq!(symbols, vec!["USDC", "LINK"]);
        assert_eq!(
            summary.total_value(),
            Decimal::from_i128_with_scale(70_000_000_000_000_000_000_000_000_001, 0)
        );
    }

    #[test]
    fn build_summary_caps_collectibles() {
        let owned: Vec<_> = (0..20).map(|i| owned_nft(&i.to_string())).collect();
        let summary = build_summary(
            subject(),
            &PriceTable::new(),
            U256::ZERO,
            vec![],
            &owned,
            &SummaryPolicy::default(),
        )
        .unwrap();
        assert_eq!(summary.collectibles().len(), 12);
        assert_eq!(summary.collectibles()[11].token_id, "11");
    }

    #[tokio::test]
    async fn miss_fetches_everything_and_writes_once() {
        let upstream = example_upstream();
        let cache = RecordingCache::new();
        let service = summarizer(&upstream, Arc::new(cache.clone()));

        let summary = service.summarize(&subject()).await.unwrap();

        assert_eq!(summary.total_value(), dec!(5001));
        for capability in [
            Capability::NativeBalance,
            Capability::TokenHoldings,
            Capability::Prices,
            Capability::Collectibles,
        ] {
            assert_eq!(upstream.calls(capability), 1, "{capability}");
        }
        assert_eq!(cache.writes(), 1);
        assert_eq!(cache.last_ttl(), Some(Duration::from_secs(300)));
    }

    #[tokio::test]
    async fn hit_returns_stored_summary_without_upstream_calls() {
        let upstream = example_upstream();
        let cache = RecordingCache::new();
        let service = summarizer(&upstream, Arc::new(cache.clone()));

        let first = service.summarize(&subject()).await.unwrap();
        upstream.reset_calls();

        let second = service.summarize(&subject()).await.unwrap();

        assert_eq!(second, first);
        assert_eq!(upstream.total_calls(), 0);
        assert_eq!(cache.writes(), 1);
    }

    #[tokio::test]
    async fn collectible_failure_aborts_without_caching() {
        let upstream = example_upstream().failing(Capability::Collectibles);
        let cache = RecordingCache::new();
        let service = summarizer(&upstream, Arc::new(cache.clone()));

        let err = service.summarize(&subject()).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Upstream(ref e) if e.capability() == Some(Capability::Collectibles)
        ));
        assert_eq!(cache.writes(), 0);

        upstream.heal(Capability::Collectibles);
        upstream.reset_calls();
        service.summarize(&subject()).await.unwrap();
        assert_eq!(upstream.calls(Capability::Prices), 1);
        assert_eq!(upstream.calls(Capability::Collectibles), 1);
        assert_eq!(cache.writes(), 1);
    }

    #[tokio::test]
    async fn cache_read_failure_degrades_to_miss() {
        let upstream = example_upstream();
        let cache = RecordingCache::new();
        cache.fail_reads(true);
        let service = summarizer(&upstream, Arc::new(cache.clone()));

        let summary = service.summarize(&subject()).await.unwrap();
        assert_eq!(summary.total_value(), dec!(5001));
        assert_eq!(upstream.calls(Capability::NativeBalance), 1);
    }

    #[tokio::test]
    async fn cache_write_failure_still_returns_summary() {
        let upstream = example_upstream();
        let cache = RecordingCache::new();
        cache.fail_writes(true);
        let service = summarizer(&upstream, Arc::new(cache.clone()));

        let summary = service.summarize(&subject()).await.unwrap();
        assert_eq!(summary.total_value(), dec!(5001));
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn undecodable_cache_entry_is_refetched() {
        let upstream = example_upstream();
        let cache = MemoryCache::new();
        cache
            .set(&cache_key(&subject()), "not json".into(), Duration::from_secs(60))
            .await
            .unwrap();
        let service = summarizer(&upstream, Arc::new(cache));

        service.summarize(&subject()).await.unwrap();
        assert_eq!(upstream.calls(Capability::Prices), 1);
    }

    #[tokio::test]
    async fn concurrent_misses_share_one_fetch() {
        let upstream = example_upstream().with_delay(Duration::from_millis(30));
        let cache = RecordingCache::new();
        let service = summarizer(&upstream, Arc::new(cache.clone()));

        let s = subject();
        let (a, b) = tokio::join!(service.summarize(&s), service.summarize(&s));

        assert_eq!(a.unwrap(), b.unwrap());
        assert_eq!(upstream.calls(Capability::NativeBalance), 1);
        assert_eq!(cache.writes(), 1);
    }

    #[tokio::test]
    async fn without_single_flight_concurrent_misses_both_fetch() {
        let upstream = example_upstream().with_delay(Duration::from_millis(30));
        let cache = RecordingCache::new();
        let policy = SummaryPolicy {
            single_flight: false,
            ..SummaryPolicy::default()
        };
        let service = Summarizer::new(
            UpstreamSources::from_provider(Arc::new(upstream.clone())),
            Arc::new(cache.clone()),
            policy,
        );

        let s = subject();
        let (a, b) = tokio::join!(service.summarize(&s), service.summarize(&s));

        assert_eq!(a.unwrap(), b.unwrap());
        assert_eq!(upstream.calls(Capability::NativeBalance), 2);
        assert_eq!(cache.writes(), 2);
    }

    #[tokio::test]
    async fn deadline_expiry_leaves_cache_empty() {
        let upstream = example_upstream().with_delay(Duration::from_secs(30));
        let cache = RecordingCache::new();
        let service = summarizer(&upstream, Arc::new(cache.clone()));

        let err = service
            .summarize_within(&subject(), Duration::from_millis(20))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Upstream(UpstreamError::Timeout(_))));
        assert_eq!(cache.writes(), 0);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let upstream = example_upstream();
        let cache = RecordingCache::new();
        let service = summarizer(&upstream, Arc::new(cache.clone()));

        service.summarize(&subject()).await.unwrap();
        assert!(service.invalidate(&subject()).await);
        upstream.reset_calls();

        service.summarize(&subject()).await.unwrap();
        assert_eq!(upstream.calls(Capability::TokenHoldings), 1);
    }
}
