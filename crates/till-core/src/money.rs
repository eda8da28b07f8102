//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    180.0 * (1.0 - 0.147) = 153.54000000000002                          │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units (paisa / cents)                      │
//! │    18000 * (10000 - 1470) / 10000 = 15354                              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use till_core::money::Money;
//!
//! let price = Money::from_cents(55000); // 550.00
//! let two = price * 2;
//! assert_eq!(two.cents(), 110000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use crate::BPS_SCALE;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// Signed: a discount rate above 100% produces a negative net, and that has
/// to stay representable rather than wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
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

    /// Multiplies money by a quantity.
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }

    /// Checked addition. `None` on overflow.
    #[inline]
    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Checked subtraction. `None` on overflow.
    #[inline]
    pub fn checked_sub(&self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }

    /// Checked multiplication by a quantity. `None` on overflow.
    #[inline]
    pub fn checked_mul(&self, qty: u32) -> Option<Money> {
        self.0.checked_mul(qty as i64).map(Money)
    }

    /// Returns `bps` basis points of this amount, rounded half-up.
    ///
    /// `None` if the result does not fit.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// // 10% of 100.00
    /// assert_eq!(Money::from_cents(10000).checked_portion_bps(1000), Some(Money::from_cents(1000)));
    /// // 8.25% of 10.00 = 0.825 → 0.83
    /// assert_eq!(Money::from_cents(1000).checked_portion_bps(825), Some(Money::from_cents(83)));
    /// ```
    pub fn checked_portion_bps(&self, bps: u32) -> Option<Money> {
        let scale = BPS_SCALE as i128;
        let portion = (self.0 as i128 * bps as i128 + scale / 2) / scale;
        i64::try_from(portion).ok().map(Money)
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// The rate is not clamped: above 10000 bps the result goes negative.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let gross = Money::from_cents(18000);
    /// assert_eq!(gross.checked_discount(500), Some(Money::from_cents(17100)));
    /// ```
    pub fn checked_discount(&self, discount_bps: u32) -> Option<Money> {
        self.checked_sub(self.checked_portion_bps(discount_bps)?)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain amount with two decimals; the currency symbol is a display concern
/// of the app.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(17100).to_string(), "171.00");
        assert_eq!(Money::from_cents(505).to_string(), "5.05");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);
        assert_eq!((-a).cents(), -1000);

        let total: Money = [a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_percentage_discount() {
        // 180.00 at 14.7% = 153.54 exactly
        let gross = Money::from_cents(18000);
        assert_eq!(gross.checked_discount(1470), Some(Money::from_cents(15354)));
        assert_eq!(gross.checked_discount(0), Some(gross));
    }

    #[test]
    fn test_discount_over_one_hundred_percent_goes_negative() {
        let gross = Money::from_cents(10000);
        let net = gross.checked_discount(12000).unwrap();
        assert_eq!(net.cents(), -2000);
        assert!(net.is_negative());
    }

    #[test]
    fn test_checked_arithmetic_reports_overflow() {
        let huge = Money::from_cents(i64::MAX / 2);

        assert_eq!(huge.checked_mul(2), Some(Money::from_cents(i64::MAX - 1)));
        assert_eq!(huge.checked_mul(3), None);
        assert_eq!(huge.checked_add(huge).and_then(|m| m.checked_add(huge)), None);
        assert_eq!(Money::from_cents(i64::MIN).checked_sub(Money::from_cents(1)), None);
        assert_eq!(Money::from_cents(i64::MAX).checked_portion_bps(20000), None);
    }

    #[test]
    fn test_serializes_as_plain_integer() {
        let json = serde_json::to_string(&Money::from_cents(55000)).unwrap();
        assert_eq!(json, "55000");
    }
}
