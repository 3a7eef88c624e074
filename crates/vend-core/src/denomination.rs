//! # Denominations
//!
//! The fixed set of coin values the machine accepts and pays out.
//!
//! ## Greedy Change and the Denomination Set
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Canonical set: 25  50  100  200  300  500                              │
//! │                                                                         │
//! │  Change is paid largest-coin-first. With an unlimited supply of every  │
//! │  coin this reaches zero for any multiple of 25, because 25 divides     │
//! │  every other value.                                                     │
//! │                                                                         │
//! │  With a limited supply greedy can strand a remainder that a different  │
//! │  mix would have paid:                                                   │
//! │                                                                         │
//! │    owe 400, stock {300: 1, 200: 2}                                      │
//! │    greedy takes 300 → 100 left, no 100/50/25 → InsufficientChange     │
//! │    (200 + 200 would have worked)                                        │
//! │                                                                         │
//! │  Such cases are reported, never silently mis-paid. Other sets are      │
//! │  accepted, but no optimality claim is made for them.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ValidationResult;
use crate::money::Money;
use crate::validation::validate_denominations;

/// The coin values the reference machine accepts, in cents.
pub const CANONICAL_DENOMINATIONS: [i64; 6] = [25, 50, 100, 200, 300, 500];

// =============================================================================
// Denomination Set
// =============================================================================

/// Accepted coin values, stored ascending and free of duplicates.
///
/// Immutable once built. Cloned into the coin inventory so both the inventory
/// and whoever configured it agree on the same set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Money>", into = "Vec<Money>")]
pub struct DenominationSet {
    values: Vec<Money>,
}

impl DenominationSet {
    /// Builds a set from any ordering of values.
    ///
    /// ## Errors
    /// `ValidationError` if the list is empty, contains a non-positive value,
    /// or lists a value twice.
    ///
    /// ## Example
    /// ```rust
    /// use vend_core::{DenominationSet, Money};
    ///
    /// let set = DenominationSet::new([100, 25, 50].map(Money::from_cents)).unwrap();
    /// assert_eq!(set.smallest(), Money::from_cents(25));
    /// ```
    pub fn new(values: impl IntoIterator<Item = Money>) -> ValidationResult<Self> {
        let mut values: Vec<Money> = values.into_iter().collect();
        validate_denominations(&values)?;
        values.sort_unstable();
        Ok(DenominationSet { values })
    }

    /// Builds a set from raw cent values.
    pub fn from_cents(values: &[i64]) -> ValidationResult<Self> {
        Self::new(values.iter().copied().map(Money::from_cents))
    }

    /// The reference set: 25, 50, 100, 200, 300, 500.
    pub fn canonical() -> Self {
        DenominationSet {
            values: CANONICAL_DENOMINATIONS
                .iter()
                .copied()
                .map(Money::from_cents)
                .collect(),
        }
    }

    /// Returns true if `coin` is an accepted value.
    pub fn contains(&self, coin: Money) -> bool {
        self.values.binary_search(&coin).is_ok()
    }

    /// Smallest to largest.
    pub fn ascending(&self) -> impl DoubleEndedIterator<Item = Money> + '_ {
        self.values.iter().copied()
    }

    /// Largest to smallest; the order change is paid in.
    pub fn descending(&self) -> impl Iterator<Item = Money> + '_ {
        self.values.iter().rev().copied()
    }

    pub fn smallest(&self) -> Money {
        self.values[0]
    }

    pub fn largest(&self) -> Money {
        self.values[self.values.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; an empty set cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The values as raw cents, ascending. Used in error messages.
    pub fn to_cents(&self) -> Vec<i64> {
        self.values.iter().map(Money::cents).collect()
    }
}

impl Default for DenominationSet {
    fn default() -> Self {
        DenominationSet::canonical()
    }
}

impl TryFrom<Vec<Money>> for DenominationSet {
    type Error = crate::error::ValidationError;

    fn try_from(values: Vec<Money>) -> Result<Self, Self::Error> {
        DenominationSet::new(values)
    }
}

impl From<DenominationSet> for Vec<Money> {
    fn from(set: DenominationSet) -> Self {
        set.values
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
