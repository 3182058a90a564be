//! # Money Module
//!
//! Provides the `Money` type for Rupiah amounts.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    265000 × 0.1 = 26500.000000000004  ❌ WRONG!                         │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units + basis points                       │
//! │    (265000 × 1000 + 5000) / 10000 = 26500                               │
//! │    Rounding happens once, half-up, at a known place                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kasir_core::money::Money;
//!
//! let price = Money::new(50_000);
//! let line = price * 2;
//! assert_eq!(line, Money::new(100_000));
//! assert_eq!(line.to_string(), "Rp 100.000");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::discount::DiscountRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (whole Rupiah).
///
/// ## Design Decisions
/// - **i64 (signed)**: change can be computed before it is checked
/// - **Single field tuple struct**: serializes as a bare number
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use kasir_core::money::Money;
    ///
    /// let price = Money::new(150_000);
    /// assert_eq!(price.amount(), 150_000);
    /// ```
    #[inline]
    pub const fn new(amount: i64) -> Self {
        Money(amount)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Addition that reports overflow instead of wrapping.
    #[inline]
    pub const fn checked_add(self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }

    /// Multiplies by a quantity, reporting overflow.
    ///
    /// ## Example
    /// ```rust
    /// use kasir_core::money::Money;
    ///
    /// let unit = Money::new(90_000);
    /// assert_eq!(unit.checked_mul_quantity(2), Some(Money::new(180_000)));
    /// assert_eq!(Money::new(i64::MAX).checked_mul_quantity(2), None);
    /// ```
    #[inline]
    pub const fn checked_mul_quantity(self, qty: i64) -> Option<Money> {
        match self.0.checked_mul(qty) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }

    /// Takes a percentage of this amount, rounding half up.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000` in i128. The +5000
    /// is the half that makes .5 round up.
    ///
    /// ## Example
    /// ```rust
    /// use kasir_core::money::Money;
    /// use kasir_core::discount::DiscountRate;
    ///
    /// let subtotal = Money::new(265_000);
    /// assert_eq!(subtotal.percentage(DiscountRate::from_percent(10)), Money::new(26_500));
    ///
    /// // 15 × 10% = 1.5 → 2
    /// assert_eq!(Money::new(15).percentage(DiscountRate::from_percent(10)), Money::new(2));
    /// ```
    pub fn percentage(&self, rate: DiscountRate) -> Money {
        let scaled = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money(i64::try_from(scaled).unwrap_or(if scaled < 0 { i64::MIN } else { i64::MAX }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Rupiah display with `.` as thousands separator: `Rp 150.000`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}Rp {}", sign, grouped)
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

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
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
    fn test_display() {
        assert_eq!(Money::new(150_000).to_string(), "Rp 150.000");
        assert_eq!(Money::new(1_500_000).to_string(), "Rp 1.500.000");
        assert_eq!(Money::new(999).to_string(), "Rp 999");
        assert_eq!(Money::new(1_000).to_string(), "Rp 1.000");
        assert_eq!(Money::new(0).to_string(), "Rp 0");
        assert_eq!(Money::new(-5_000).to_string(), "-Rp 5.000");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::new(1000);
        let b = Money::new(500);

        assert_eq!((a + b).amount(), 1500);
        assert_eq!((a - b).amount(), 500);
        assert_eq!((a * 3).amount(), 3000);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total, Money::new(2000));
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        let ten = DiscountRate::from_percent(10);
        assert_eq!(Money::new(15).percentage(ten), Money::new(2));
        assert_eq!(Money::new(14).percentage(ten), Money::new(1));
        assert_eq!(Money::new(265_000).percentage(ten), Money::new(26_500));
        assert_eq!(Money::new(100_000).percentage(DiscountRate::from_percent(100)), Money::new(100_000));
        assert_eq!(Money::new(100_000).percentage(DiscountRate::from_percent(0)), Money::zero());
    }

    #[test]
    fn test_percentage_large_amount_no_overflow() {
        let amount = Money::new(i64::MAX / 2);
        let half = amount.percentage(DiscountRate::from_percent(50));
        assert!(half.is_positive());

        let max = Money::new(i64::MAX);
        assert_eq!(max.percentage(DiscountRate::from_percent(100)), max);
    }

    #[test]
    fn test_checked_operations() {
        assert_eq!(Money::new(i64::MAX).checked_add(Money::new(1)), None);
        assert_eq!(Money::new(1).checked_add(Money::new(1)), Some(Money::new(2)));
        assert_eq!(Money::new(i64::MAX / 2 + 1).checked_mul_quantity(2), None);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());
        assert!(Money::new(-1).is_negative());
        assert_eq!(Money::default(), zero);
    }
}
