//! # Money Module
//!
//! The `Money` type carries every amount the machine handles: coin face
//! values, product prices, the running deposit and change totals.
//!
//! ## Units
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ONE UNIT = ONE CENT                                                    │
//! │                                                                         │
//! │  Coin slot accepts:   25   50   100   200   300   500                  │
//! │  Displayed as:      $0.25 $0.50 $1.00 $2.00 $3.00 $5.00                 │
//! │                                                                         │
//! │  A price of 200 is two dollars. The deposit is the plain sum of the    │
//! │  inserted coin values. There is no floating point anywhere.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vend_core::money::Money;
//!
//! let quarter = Money::from_cents(25);
//! let deposit = quarter * 3 + Money::from_cents(100);
//! assert_eq!(deposit.cents(), 175);
//! assert_eq!(deposit.to_string(), "$1.75");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// An amount in the smallest currency unit (cents).
///
/// Signed so that differences can be expressed, but every amount that reaches
/// the coin inventory or the catalog is validated as positive first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use vend_core::money::Money;
    ///
    /// let coin = Money::from_cents(500);
    /// assert_eq!(coin.cents(), 500);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

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

    /// How many whole `unit`s fit into this amount.
    ///
    /// Used by the change algorithm to ask "how many 100s fit into 350?".
    /// Returns 0 for a non-positive `unit` or a non-positive amount.
    ///
    /// ## Example
    /// ```rust
    /// use vend_core::money::Money;
    ///
    /// let remaining = Money::from_cents(350);
    /// assert_eq!(remaining.units_of(Money::from_cents(100)), 3);
    /// assert_eq!(remaining.units_of(Money::from_cents(500)), 0);
    /// ```
    pub fn units_of(&self, unit: Money) -> u32 {
        if unit.0 <= 0 || self.0 <= 0 {
            return 0;
        }
        u32::try_from(self.0 / unit.0).unwrap_or(u32::MAX)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as dollars, e.g. `$2.25`. For logs and the replay tool.
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

/// Multiplication by a coin count.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, count: u32) -> Self {
        Money(self.0 * i64::from(count))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl From<i64> for Money {
    fn from(cents: i64) -> Self {
        Money(cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
