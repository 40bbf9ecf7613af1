//! Currency-less price scalar using decimal arithmetic.
//!
//! The cafe sells in a single currency, so a price is just a non-negative
//! decimal amount. It displays with a leading `$` and without trailing
//! zeros (`$180`, `$4.5`), matching how the menu and the order message
//! have always shown amounts.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
    /// The input is not a decimal number.
    #[error("invalid price: {0:?}")]
    Invalid(String),
}

/// A non-negative unit price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from a whole number of currency units.
    #[must_use]
    pub fn from_units(units: u32) -> Self {
        Self(Decimal::from(units))
    }

    /// Parse a price typed into a form (`"45"`, `"4.50"`, `"$180"`).
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Invalid` if the input is not a number and
    /// `PriceError::Negative` if it is below zero.
    pub fn parse(input: &str) -> Result<Self, PriceError> {
        let trimmed = input.trim();
        let digits = trimmed.strip_prefix('$').unwrap_or(trimmed).trim();
        let amount =
            Decimal::from_str(digits).map_err(|_| PriceError::Invalid(input.to_owned()))?;
        Self::new(amount)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units, saturating at [`Decimal::MAX`].
    #[must_use]
    pub fn times(self, quantity: u64) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }

    /// Whether the price is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0.normalize())
    }
}

impl Add for Price {
    type Output = Self;

    /// Saturates at [`Decimal::MAX`] instead of overflowing.
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_drops_trailing_zeros() {
        assert_eq!(Price::parse("180.00").unwrap().to_string(), "$180");
        assert_eq!(Price::parse("4.50").unwrap().to_string(), "$4.5");
        assert_eq!(Price::ZERO.to_string(), "$0");
    }

    #[test]
    fn test_parse_accepts_dollar_prefix() {
        assert_eq!(Price::parse(" $45 ").unwrap(), Price::from_units(45));
    }

    #[test]
    fn test_parse_rejects_negative_and_garbage() {
        assert!(matches!(Price::parse("-1"), Err(PriceError::Negative(_))));
        assert!(matches!(Price::parse("cheap"), Err(PriceError::Invalid(_))));
    }

    #[test]
    fn test_negative_zero_is_zero() {
        let price = Price::new(-Decimal::ZERO).unwrap();
        assert!(price.is_zero());
    }

    #[test]
    fn test_times_and_sum() {
        let espresso = Price::from_units(45);
        let pizza = Price::from_units(180);
        let total: Price = [espresso.times(2), pizza.times(1)].into_iter().sum();
        assert_eq!(total, Price::from_units(270));
    }

    #[test]
    fn test_huge_amounts_saturate() {
        let huge = Price::parse("10000000000000000000000").unwrap();
        assert_eq!(huge.times(u64::MAX).amount(), Decimal::MAX);
        assert_eq!((huge.times(100_000_000) + huge).amount(), Decimal::MAX);
        let total: Price = [Price::new(Decimal::MAX).unwrap(), Price::from_units(1)]
            .into_iter()
            .sum();
        assert_eq!(total.amount(), Decimal::MAX);
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        assert!(serde_json::from_str::<Price>("\"-3\"").is_err());
        assert_eq!(
            serde_json::from_str::<Price>("\"3.25\"").unwrap(),
            Price::parse("3.25").unwrap()
        );
    }
}
