//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices are whole dollar amounts today, but cart totals are
//! computed with `Decimal` so that fractional prices never drift.
//! Arithmetic saturates at the `Decimal` bounds instead of panicking.

use std::iter::Sum;
use std::ops::Add;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize, Serializer};

/// A price in US dollars.
///
/// Serialized as a JSON number (`589`, `589.5`). Deserializes from either a
/// number or a decimal string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of dollars.
    #[must_use]
    pub fn from_dollars(dollars: i64) -> Self {
        Self(Decimal::from(dollars))
    }

    /// The decimal amount in dollars.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units, saturating at the representable range.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }

    /// Percentage saved relative to `original`, rounded half away from zero.
    ///
    /// Returns `None` unless `original` is strictly greater than `self`.
    #[must_use]
    pub fn discount_from(self, original: Self) -> Option<u32> {
        if original.0 <= self.0 {
            return None;
        }
        let percent = original
            .0
            .checked_sub(self.0)?
            .checked_div(original.0)?
            .checked_mul(Decimal::ONE_HUNDRED)?;
        percent
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.fract().is_zero() {
            write!(f, "${:.0}", self.0)
        } else {
            write!(f, "${:.2}", self.0)
        }
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let amount = self.0;
        if amount.fract().is_zero() {
            // Whole amounts beyond i64 keep full precision as a string
            return match amount.to_i64() {
                Some(whole) => serializer.serialize_i64(whole),
                None => serializer.serialize_str(&amount.to_string()),
            };
        }
        match amount.to_f64() {
            Some(value) => serializer.serialize_f64(value),
            None => serializer.serialize_str(&amount.to_string()),
        }
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}
