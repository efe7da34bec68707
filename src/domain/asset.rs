//! Priced asset lines that make up a summary.

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::money::{value_of, Amount, Price};

/// The chain's native coin holding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeAsset {
    balance: Amount,
    price: Price,
    value: Price,
}

impl NativeAsset {
    /// Build a native holding; `value` is derived as `balance * price`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ValueOverflow`] if the product does not fit.
    pub fn new(balance: Amount, price: Price) -> Result<Self, DomainError> {
        Ok(Self {
            balance,
            price,
            value: value_of(balance, price)?,
        })
    }

    #[must_use]
    pub const fn balance(&self) -> Amount {
        self.balance
    }

    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    #[must_use]
    pub const fn value(&self) -> Price {
        self.value
    }
}

/// An allow-listed fungible token holding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FungibleAsset {
    symbol: String,
    name: Option<String>,
    balance: Amount,
    price: Price,
    value: Price,
    contract: String,
    logo: Option<String>,
}

impl FungibleAsset {
    /// Build a token holding; `value` is derived as `balance * price`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ValueOverflow`] if the product does not fit.
    pub fn new(
        symbol: impl Into<String>,
        name: Option<String>,
        balance: Amount,
        price: Price,
        contract: impl Into<String>,
        logo: Option<String>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            symbol: symbol.into(),
            name,
            balance,
            price,
            value: value_of(balance, price)?,
            contract: contract.into(),
            logo,
        })
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub const fn balance(&self) -> Amount {
        self.balance
    }

    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    #[must_use]
    pub const fn value(&self) -> Price {
        self.value
    }

    #[must_use]
    pub fn contract(&self) -> &str {
        &self.contract
    }

    #[must_use]
    pub fn logo(&self) -> Option<&str> {
        self.logo.as_deref()
    }
}

/// One NFT in the gallery. Collectibles carry no price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectibleAsset {
    pub name: String,
    pub image: String,
    pub contract: String,
    #[serde(rename = "tokenId")]
    pub token_id: String,
}
