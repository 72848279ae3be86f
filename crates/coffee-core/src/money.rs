//! # Money Module
//!
//! Provides the `Money` type for menu prices and sale totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PRICES ON THE MENU BOARD                                               │
//! │                                                                         │
//! │  Espresso ............ 3                                               │
//! │  + Whipped Cream ..... 2                                               │
//! │  ───────────────────────                                               │
//! │  Total ............... 5   ← flat summation, never a float             │
//! │                                                                         │
//! │  Every price is a whole number of currency units. The database,        │
//! │  the receipt and the statistics table all see the same integer.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use coffee_core::money::Money;
//!
//! let espresso = Money::from_units(3);
//! let cream = Money::from_units(2);
//! assert_eq!(espresso.checked_add(cream), Some(Money::from_units(5)));
//!
//! let day = Money::checked_sum([espresso, cream, espresso]);
//! assert_eq!(day, Some(Money::from_units(8)));
//!
//! assert_eq!(Money::from_units(i64::MAX).checked_add(cream), None);
//! ```
//!
//! `Money` has no `+`. Sums go through [`Money::checked_add`] or
//! [`Money::checked_sum`] and overflow comes back as `None`.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole currency units.
///
/// ## Design Decisions
/// - **i64 (signed)**: matches SQLite's INTEGER column without conversion.
///   Negative values are rejected at the edges by
///   [`validate_price`](crate::validation::validate_price), not by the type.
/// - **Single field tuple struct**: zero-cost wrapper over i64
/// - **Transparent to sqlx/serde**: stored and serialized as a bare integer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole currency units.
    ///
    /// ## Example
    /// ```rust
    /// use coffee_core::money::Money;
    ///
    /// let price = Money::from_units(4);
    /// assert_eq!(price.units(), 4);
    /// ```
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in whole currency units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Adds two values, returning `None` on overflow.
    #[inline]
    pub const fn checked_add(self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(units) => Some(Money(units)),
            None => None,
        }
    }

    /// Sums any number of values, returning `None` on overflow.
    ///
    /// An empty input sums to zero.
    pub fn checked_sum<I: IntoIterator<Item = Money>>(values: I) -> Option<Money> {
        values
            .into_iter()
            .try_fold(Money::zero(), |total, value| total.checked_add(value))
    }
}

// =============================================================================
// Display
// =============================================================================

/// Prints the bare integer, the way it appears on receipts and in the
/// statistics table (`Total Price: 5`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Money {
    fn from(units: i64) -> Self {
        Money(units)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_sum() {
        let prices = [Money::from_units(3), Money::from_units(5)];
        assert_eq!(Money::checked_sum(prices), Some(Money::from_units(8)));
        assert_eq!(Money::checked_sum(Vec::<Money>::new()), Some(Money::zero()));
        assert_eq!(
            Money::checked_sum([Money::from_units(i64::MAX), Money::from_units(1)]),
            None
        );
    }

    #[test]
    fn test_checked_add_overflow() {
        assert_eq!(
            Money::from_units(1).checked_add(Money::from_units(2)),
            Some(Money::from_units(3))
        );
        assert_eq!(Money::from_units(i64::MAX).checked_add(Money::from_units(1)), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_units(0).to_string(), "0");
        assert_eq!(Money::from_units(12).to_string(), "12");
    }

    #[test]
    fn test_is_negative() {
        assert!(Money::from_units(-1).is_negative());
        assert!(!Money::zero().is_negative());
    }
}
