//! Monetary types and fixed-point conversions.

use std::collections::HashMap;

use alloy_primitives::U256;
use rust_decimal::Decimal;

use super::error::DomainError;

/// Price represented as a Decimal for precision.
pub type Price = Decimal;

/// Token quantity after scaling by its decimal count.
pub type Amount = Decimal;

/// Decimal count of the native coin's smallest unit (wei).
pub const NATIVE_DECIMALS: u32 = 18;

/// Largest scale a `Decimal` can carry.
const MAX_SCALE: u32 = 28;

/// Mantissa width of a `Decimal`.
const MANTISSA_BITS: usize = 96;

/// Convert a raw integer amount in smallest units into a decimal quantity.
///
/// Amounts wider than the 96-bit decimal mantissa lose their lowest digits
/// until they fit, as do `decimals` beyond what a `Decimal` can carry. Only
/// the integer part has to be representable.
///
/// # Errors
///
/// Returns [`DomainError::AmountOverflow`] when the whole-unit amount itself
/// exceeds the decimal range.
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use rust_decimal_macros::dec;
/// use walletlens::domain::money::scale_units;
///
/// let wei = U256::from(2_500_000_000_000_000_000u128);
/// assert_eq!(scale_units(wei, 18).unwrap(), dec!(2.5));
/// ```
pub fn scale_units(raw: U256, decimals: u32) -> Result<Amount, DomainError> {
    let overflow = || DomainError::AmountOverflow {
        raw: raw.to_string(),
        decimals,
    };

    let ten = U256::from(10u64);
    let mut truncated = raw;
    let mut dropped = 0u32;
    while truncated.bit_len() > MANTISSA_BITS {
        if dropped == decimals {
            return Err(overflow());
        }
        truncated /= ten;
        dropped += 1;
    }
    let decimals = decimals - dropped;

    let limbs = truncated.as_limbs();
    let mantissa = (u128::from(limbs[1]) << 64) | u128::from(limbs[0]);
    let mantissa = i128::try_from(mantissa).map_err(|_| overflow())?;

    let scale = decimals.min(MAX_SCALE);
    let mut amount = Decimal::try_from_i128_with_scale(mantissa, scale).map_err(|_| overflow())?;
    for _ in scale..decimals {
        amount = amount.checked_div(Decimal::TEN).ok_or_else(overflow)?;
    }
    Ok(amount.normalize())
}

/// `balance * price`, normalized.
///
/// # Errors
///
/// Returns [`DomainError::ValueOverflow`] if the product leaves the decimal range.
pub fn value_of(balance: Amount, price: Price) -> Result<Decimal, DomainError> {
    balance
        .checked_mul(price)
        .map(|v| v.normalize())
        .ok_or(DomainError::ValueOverflow { balance, price })
}

/// Fiat prices keyed by token symbol.
///
/// Lookups never fail: an unknown symbol is priced at zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceTable {
    prices: HashMap<String, Price>,
}

impl PriceTable {
    /// Create an empty price table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a price. Negative prices are not meaningful and are dropped.
    pub fn insert(&mut self, symbol: impl Into<String>, price: Price) {
        if price.is_sign_negative() && !price.is_zero() {
            return;
        }
        self.prices.insert(symbol.into(), price);
    }

    /// Price for `symbol`, or zero when absent.
    #[must_use]
    pub fn price_of(&self, symbol: &str) -> Price {
        self.prices.get(symbol).copied().unwrap_or(Decimal::ZERO)
    }

    /// Price for an optional symbol; `None` prices at zero.
    #[must_use]
    pub fn price_of_opt(&self, symbol: Option<&str>) -> Price {
        symbol.map_or(Decimal::ZERO, |s| self.price_of(s))
    }

    #[must_use]
    pub fn contains(&self, symbol: &str) -> bool {
        self.prices.contains_key(symbol)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Price)> for PriceTable {
    fn from_iter<I: IntoIterator<Item = (S, Price)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (symbol, price) in iter {
            table.insert(symbol, price);
        }
        table
    }
}
