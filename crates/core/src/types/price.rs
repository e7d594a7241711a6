//! Type-safe price representation using decimal arithmetic.
//!
//! The catalog quotes every price in US dollars as a JSON number, so `Price`
//! carries no currency code. Cart totals are summed in `Decimal` to avoid
//! float drift (`0.1 + 0.2` style errors) on long carts.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

/// A price in US dollars.
///
/// Serialized as a JSON number, matching the catalog. Stored records written
/// with a string amount still deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(serialize_with = "rust_decimal::serde::float::serialize")] Decimal);

impl Price {
    /// Zero dollars.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Price of `quantity` units.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Price after a percentage discount, rounded to cents.
    ///
    /// Percentages outside `0..=100` are clamped; a non-finite percentage
    /// leaves the price unchanged.
    #[must_use]
    pub fn discounted(self, percent: f64) -> Self {
        let Some(percent) = Decimal::from_f64(percent.clamp(0.0, 100.0)) else {
            return self;
        };
        let hundred = Decimal::ONE_HUNDRED;
        Self((self.0 * (hundred - percent) / hundred).round_dp(2))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0.round_dp(2))
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Self> for Price {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
