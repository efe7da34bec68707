//! Domain errors for arithmetic on asset amounts.
//!
//! Amounts arrive from upstream as unbounded 256-bit integers and are
//! converted to fixed-point decimals. These errors report the cases that do
//! not fit instead of panicking.
//!
//! # Examples
//!
//! ```
//! use alloy_primitives::U256;
//! use walletlens::domain::error::DomainError;
//! use walletlens::domain::money::scale_units;
//!
//! let result = scale_units(U256::MAX, 18);
//! assert!(matches!(result, Err(DomainError::AmountOverflow { .. })));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that occur when an amount cannot be represented.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The raw integer amount exceeds the decimal range.
    #[error("raw amount {raw} with {decimals} decimals does not fit a decimal")]
    AmountOverflow {
        /// The raw integer amount, in base 10.
        raw: String,
        /// The decimal count it was being scaled by.
        decimals: u32,
    },

    /// `balance * price` or a running total left the decimal range.
    #[error("value overflow computing {balance} x {price}")]
    ValueOverflow {
        /// The scaled balance.
        balance: Decimal,
        /// The unit price.
        price: Decimal,
    },

    /// The total value sum left the decimal range.
    #[error("total value overflow")]
    TotalOverflow,
}
