//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floats:                                                           │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  With discounts that compare amounts ("strictly greater wins"), a      │
//! │  stray 0.00000001 decides which rule is reported to the customer.      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Every line share is rounded to a whole cent once, then summed.      │
//! │    Comparisons between candidate discounts are exact.                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use discount_core::money::Money;
//! use discount_core::types::Percentage;
//!
//! let unit_cost = Money::from_major_minor(50, 0); // $50.00
//! let line_total = unit_cost.multiply_quantity(5); // $250.00
//!
//! let discount = line_total.percentage_of(Percentage::from_bps(2000)); // 20%
//! assert_eq!(discount.cents(), 5000); // $50.00
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::types::Percentage;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: totals after discount are computed by subtraction
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serde**: serializes as a bare integer number of cents
///
/// ## Where Money is Used
/// ```text
/// LineItem.unit_cost ──► line_total ──┬──► EvaluationResult.total_cost
///                                     │
///                                     └──► candidate amount per rule
///                                               │
///                                               ▼
///                                     EvaluationResult.total_discount
///
/// DiscountKind::ByMinimumCost.minimum_cost ──► per-unit threshold
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use discount_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ## Example
    /// ```rust
    /// use discount_core::money::Money;
    ///
    /// let price = Money::from_major_minor(10, 99); // $10.99
    /// assert_eq!(price.cents(), 1099);
    ///
    /// let negative = Money::from_major_minor(-5, 50); // -$5.50
    /// assert_eq!(negative.cents(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use discount_core::money::Money;
    ///
    /// let unit_cost = Money::from_cents(299);
    /// assert_eq!(unit_cost.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Returns the given percentage of this amount, rounded half-up to a cent.
    ///
    /// This is the discount *amount*, not the discounted price.
    ///
    /// ## Implementation
    /// Integer math in basis points: `(amount * bps + 5000) / 10000`.
    /// i128 keeps large line totals from overflowing.
    ///
    /// ## Example
    /// ```rust
    /// use discount_core::money::Money;
    /// use discount_core::types::Percentage;
    ///
    /// let line = Money::from_cents(30000); // $300.00
    /// let share = line.percentage_of(Percentage::from_bps(1500)); // 15%
    /// assert_eq!(share.cents(), 4500); // $45.00
    ///
    /// // $0.99 at 12.5% = 12.375 cents → 12 cents
    /// let odd = Money::from_cents(99).percentage_of(Percentage::from_bps(1250));
    /// assert_eq!(odd.cents(), 12);
    /// ```
    pub fn percentage_of(&self, pct: Percentage) -> Money {
        let share = (self.0 as i128 * pct.bps() as i128 + 5000) / 10000;
        Money::from_cents(share as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// For logs and debugging only; currency formatting is out of scope.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
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

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summing line totals and line discounts.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
