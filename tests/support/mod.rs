#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use alloy_primitives::U256;
use rust_decimal_macros::dec;
use walletlens::application::{AccountService, HistoryRecorder, Summarizer, SummaryPolicy, UpstreamSources};
use walletlens::port::outbound::{CacheStore, HistoryStore};
use walletlens::testkit::domain::{holding, owned_nft};
use walletlens::testkit::upstream::FakeUpstream;

/// Upstream scripted with the canonical example account: 2.5 ETH at 2000 and
/// 1 USDC at 1.00, plus an unlisted token and three NFTs.
pub fn example_upstream() -> FakeUpstream {
    FakeUpstream::new()
        .with_native(U256::from(2_500_000_000_000_000_000u128))
        .with_prices([("ETH", dec!(2000)), ("USDC", dec!(1.00))])
        .with_holdings(vec![
            holding("USDC", 1_000_000, Some(6)),
            holding("SHIB", 5_000_000, Some(0)),
        ])
        .with_collectibles(vec![owned_nft("1"), owned_nft("2"), owned_nft("3")])
}

pub fn account_service(
    upstream: &FakeUpstream,
    cache: Arc<dyn CacheStore>,
    history: Arc<dyn HistoryStore>,
    policy: SummaryPolicy,
) -> AccountService {
    let summarizer = Summarizer::new(
        UpstreamSources::from_provider(Arc::new(upstream.clone())),
        cache,
        policy,
    );
    AccountService::new(Arc::new(summarizer), HistoryRecorder::new(history))
}

/// Write `contents` to a config file inside `dir`.
pub fn write_config(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("walletlens.toml");
    fs::write(&path, contents).expect("write temp config");
    path
}
