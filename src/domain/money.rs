//! Monetary types for price, dollar notional and share quantities.
//!
//! A MARKET order is sized in dollars and a LIMIT order in shares. The two
//! are distinct types so one can never be passed where the other is meant.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::error::ValidationError;

/// Price represented as a Decimal probability in [0, 1].
pub type Price = Decimal;

/// Volume represented as a Decimal for precision.
pub type Volume = Decimal;

/// Dollar notional (collateral units).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DollarAmount(Decimal);

impl DollarAmount {
    /// Create a strictly positive dollar amount.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonPositiveSize`] for zero or negative values.
    pub fn try_new(value: Decimal) -> Result<Self, ValidationError> {
        if value <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveSize { size: value });
        }
        Ok(Self(value))
    }

    /// Underlying decimal value.
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }

    /// Shares this amount buys (or must sell) at `price`, truncated to the
    /// exchange's two-decimal share precision.
    ///
    /// Returns `None` when `price` is zero.
    #[must_use]
    pub fn shares_at(self, price: Price) -> Option<ShareCount> {
        self.0
            .checked_div(price)
            .map(|shares| ShareCount(shares.round_dp_with_strategy(2, RoundingStrategy::ToZero)))
    }
}

impl fmt::Display for DollarAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0.round_dp(2))
    }
}

/// Number of outcome-token shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ShareCount(Decimal);

impl ShareCount {
    /// Create a strictly positive share count.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonPositiveSize`] for zero or negative values.
    pub fn try_new(value: Decimal) -> Result<Self, ValidationError> {
        if value <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveSize { size: value });
        }
        Ok(Self(value))
    }

    /// Underlying decimal value.
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }

    /// Cost of these shares at `price`.
    #[must_use]
    pub fn notional_at(self, price: Price) -> Decimal {
        self.0 * price
    }
}

impl fmt::Display for ShareCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} shares", self.0.normalize())
    }
}
