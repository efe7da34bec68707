//! Alchemy wire types.

use std::str::FromStr;

use alloy_primitives::U256;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{OwnedCollectible, PriceTable};

/// JSON-RPC 2.0 request envelope.
#[derive(Debug, Serialize)]
pub struct RpcRequest<'a, P> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: P,
}

impl<'a, P> RpcRequest<'a, P> {
    pub fn new(method: &'a str, params: P) -> Self {
        Self {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        }
    }
}

/// JSON-RPC 2.0 response envelope.
#[derive(Debug, Deserialize)]
pub struct RpcResponse<T> {
    pub result: Option<T>,
    pub error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

/// Result of `alchemy_getTokenBalances`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalances {
    #[serde(default)]
    pub token_balances: Vec<TokenBalance>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalance {
    pub contract_address: String,
    pub token_balance: Option<String>,
    pub error: Option<serde_json::Value>,
}

/// Result of `alchemy_getTokenMetadata`.
#[derive(Debug, Default, Deserialize)]
pub struct TokenMetadata {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub decimals: Option<u32>,
    pub logo: Option<String>,
}

/// Prices API `tokens/by-symbol` response.
#[derive(Debug, Deserialize)]
pub struct PricesResponse {
    #[serde(default)]
    pub data: Vec<SymbolPrices>,
}

#[derive(Debug, Deserialize)]
pub struct SymbolPrices {
    pub symbol: String,
    #[serde(default)]
    pub prices: Vec<QuotedPrice>,
}

#[derive(Debug, Deserialize)]
pub struct QuotedPrice {
    pub value: Option<String>,
}

impl PricesResponse {
    /// First quote per symbol; unparseable or missing quotes are skipped.
    pub fn into_table(self) -> PriceTable {
        self.data
            .into_iter()
            .filter_map(|entry| {
                let value = entry.prices.into_iter().next()?.value?;
                let price = Decimal::from_str(&value)
                    .or_else(|_| Decimal::from_scientific(&value))
                    .ok()?;
                Some((entry.symbol, price))
            })
            .collect()
    }
}

/// NFT API `getNFTsForOwner` response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftsForOwner {
    #[serde(default)]
    pub owned_nfts: Vec<OwnedNft>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedNft {
    pub contract: NftContract,
    pub token_id: String,
    pub collection: Option<NftCollection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftContract {
    pub address: String,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub open_sea_metadata: Option<OpenSeaMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenSeaMetadata {
    pub collection_name: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftCollection {
    pub banner_image_url: Option<String>,
}

impl From<OwnedNft> for OwnedCollectible {
    fn from(nft: OwnedNft) -> Self {
        let (collection_name, collection_image) = nft
            .contract
            .open_sea_metadata
            .map(|m| (m.collection_name, m.image_url))
            .unwrap_or_default();
        Self {
            contract: nft.contract.address,
            token_id: nft.token_id,
            collection_name,
            contract_name: nft.contract.name,
            contract_symbol: nft.contract.symbol,
            collection_image,
            banner_image: nft.collection.and_then(|c| c.banner_image_url),
        }
    }
}

/// Parse a `0x`-prefixed hex quantity. `"0x"` alone is zero.
pub fn parse_quantity(raw: &str) -> Option<U256> {
    let digits = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X"))?;
    if digits.is_empty() {
        return Some(U256::ZERO);
    }
    U256::from_str_radix(digits, 16).ok()
}
