//! The per-account asset summary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::asset::{CollectibleAsset, FungibleAsset, NativeAsset};
use super::error::DomainError;
use super::money::Price;
use super::subject::Subject;

/// Everything an account holds that this crate tracks, with a fiat total.
///
/// The unit that is cached and persisted. Serialized field names follow the
/// wire shape consumers already read (`address`, `eth`, `erc20`, `nfts`,
/// `totalValue`). Decimals serialize as strings, so a JSON round trip yields
/// an identical value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSummary {
    #[serde(rename = "address")]
    subject: Subject,
    #[serde(rename = "eth")]
    native: NativeAsset,
    #[serde(rename = "erc20")]
    fungibles: Vec<FungibleAsset>,
    #[serde(rename = "nfts")]
    collectibles: Vec<CollectibleAsset>,
    #[serde(rename = "totalValue")]
    total_value: Price,
}

impl AssetSummary {
    /// Assemble a summary; `total_value` is the native value plus every
    /// fungible value. Collectibles have no price feed and add nothing.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::TotalOverflow`] if the sum leaves the decimal range.
    pub fn new(
        subject: Subject,
        native: NativeAsset,
        fungibles: Vec<FungibleAsset>,
        collectibles: Vec<CollectibleAsset>,
    ) -> Result<Self, DomainError> {
        let total_value = fungibles
            .iter()
            .try_fold(native.value(), |acc, f| acc.checked_add(f.value()))
            .ok_or(DomainError::TotalOverflow)?
            .normalize();

        Ok(Self {
            subject,
            native,
            fungibles,
            collectibles,
            total_value,
        })
    }

    #[must_use]
    pub const fn subject(&self) -> &Subject {
        &self.subject
    }

    #[must_use]
    pub const fn native(&self) -> &NativeAsset {
        &self.native
    }

    #[must_use]
    pub fn fungibles(&self) -> &[FungibleAsset] {
        &self.fungibles
    }

    #[must_use]
    pub fn collectibles(&self) -> &[CollectibleAsset] {
        &self.collectibles
    }

    #[must_use]
    pub const fn total_value(&self) -> Price {
        self.total_value
    }

    /// Sum of fungible values alone.
    #[must_use]
    pub fn fungible_value(&self) -> Decimal {
        self.fungibles.iter().map(FungibleAsset::value).sum()
    }
}
