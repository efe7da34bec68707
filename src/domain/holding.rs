//! Raw fungible holdings and the tracked-symbol allow-list.

use alloy_primitives::U256;

/// Symbol of the chain's native coin, used to price the native balance.
pub const NATIVE_SYMBOL: &str = "ETH";

/// Symbols summarized by default: the native coin plus five major tokens.
pub const TRACKED_SYMBOLS: [&str; 6] = ["ETH", "USDT", "USDC", "DAI", "LINK", "WBTC"];

/// A fungible token balance as reported upstream, before pricing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenHolding {
    pub contract: String,
    pub symbol: Option<String>,
    pub name: Option<String>,
    /// Balance in the token's smallest unit.
    pub raw_balance: U256,
    /// Missing means the balance is already whole units.
    pub decimals: Option<u32>,
    pub logo: Option<String>,
}

/// The fixed set of symbols a summary tracks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
    symbols: Vec<String>,
}

impl AllowList {
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symbols: symbols.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Exact, case-sensitive membership.
    #[must_use]
    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.iter().any(|s| s == symbol)
    }

    /// Keep holdings whose symbol is present and allow-listed, in order.
    #[must_use]
    pub fn retain(&self, holdings: Vec<TokenHolding>) -> Vec<TokenHolding> {
        holdings
            .into_iter()
            .filter(|h| h.symbol.as_deref().is_some_and(|s| self.contains(s)))
            .collect()
    }
}

impl Default for AllowList {
    fn default() -> Self {
        Self::new(TRACKED_SYMBOLS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holding(symbol: Option<&str>) -> TokenHolding {
        TokenHolding {
            contract: "0x0".into(),
            symbol: symbol.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn default_tracks_six_symbols() {
        let list = AllowList::default();
        assert_eq!(list.symbols().len(), 6);
        assert!(list.contains(NATIVE_SYMBOL));
        assert!(list.contains("WBTC"));
    }

    #[test]
    fn retain_drops_unlisted_and_symbol_less_holdings() {
        let list = AllowList::default();
        let kept = list.retain(vec![
            holding(Some("USDC")),
            holding(Some("SHIB")),
            holding(None),
            holding(Some("DAI")),
        ]);
        let symbols: Vec<_> = kept.iter().filter_map(|h| h.symbol.as_deref()).collect();
        assert_eq!(symbols, vec!["USDC", "DAI"]);
    }

    #[test]
    fn membership_is_case_sensitive() {
        assert!(!AllowList::default().contains("usdc"));
    }
}
