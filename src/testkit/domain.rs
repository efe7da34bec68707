//! Builders for domain primitives used across tests.
//!
//! Concise factory functions so tests focus on assertions rather than
//! construction boilerplate.

use alloy_primitives::U256;
use rust_decimal_macros::dec;

use crate::domain::{
    AssetSummary, CollectibleAsset, FungibleAsset, NativeAsset, OwnedCollectible, Subject,
    TokenHolding,
};

/// A well-formed address used as the default test subject.
pub const SUBJECT: &str = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";

/// The default test subject.
pub fn subject() -> Subject {
    Subject::new_unchecked(SUBJECT)
}

/// A distinct well-formed subject, `n`-th in a sequence.
pub fn nth_subject(n: u8) -> Subject {
    Subject::new_unchecked(format!("0x{:040x}", n))
}

/// Holding of `raw` smallest units of `symbol`.
pub fn holding(symbol: &str, raw: u128, decimals: Option<u32>) -> TokenHolding {
    TokenHolding {
        contract: format!("0x{:0>40}", symbol.to_lowercase()),
        symbol: Some(symbol.to_string()),
        name: Some(format!("{symbol} Token")),
        raw_balance: U256::from(raw),
        decimals,
        logo: None,
    }
}

/// Bare NFT with only contract and token id set.
pub fn owned_nft(token_id: &str) -> OwnedCollectible {
    OwnedCollectible {
        contract: "0xbc4ca0eda7647a8ab7c2061c2e118a18a936f13d".to_string(),
        token_id: token_id.to_string(),
        ..Default::default()
    }
}

/// A summary with one priced token and one collectible, total 5001.
pub fn sample_summary() -> AssetSummary {
    let native = NativeAsset::new(dec!(2.5), dec!(2000)).unwrap();
    let usdc = FungibleAsset::new(
        "USDC",
        Some("USD Coin".to_string()),
        dec!(1),
        dec!(1),
        "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
        None,
    )
    .unwrap();
    let nft = CollectibleAsset::from(&owned_nft("1"));
    AssetSummary::new(subject(), native, vec![usdc], vec![nft]).unwrap()
}
