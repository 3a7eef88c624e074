//! # Coin Inventory
//!
//! The authoritative count of coins inside the machine, and the only place
//! that accepts coins or pays change out.
//!
//! ## Change-Making Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  load_change(deposit = 500, price = 250)                                │
//! │                                                                         │
//! │  required = 250                      stock {25:10, 100:10, 200:10}      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  plan_change(250)        ← reads stock, mutates nothing                 │
//! │       │  500 > 250 skip                                                 │
//! │       │  300 > 250 skip                                                 │
//! │       │  200: take min(1, 10) = 1   → 50 left                          │
//! │       │  100 > 50  skip                                                 │
//! │       │   50: stock 0, take 0                                           │
//! │       │   25: take min(2, 10) = 2   → 0 left                           │
//! │       ▼                                                                 │
//! │  remaining == 0 ?                                                       │
//! │       ├── no  → InsufficientChange, stock untouched                     │
//! │       └── yes → commit {200:1, 25:2}, stock {25:8, 100:10, 200:9}      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Planning reads each denomination's count exactly once, so the plan can
//! never take more coins than are on hand and the commit cannot fail.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::denomination::DenominationSet;
use crate::error::{ValidationError, ValidationResult, VendError, VendResult};
use crate::money::Money;

// =============================================================================
// Change
// =============================================================================

/// The coins handed back to the buyer, by denomination.
///
/// Only denominations with a non-zero count are stored. An empty `Change` is a
/// valid result and means exact payment. Built only by planning or by
/// collecting `(coin, count)` pairs, never deserialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Change {
    coins: BTreeMap<Money, u32>,
}

impl Change {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `coin` in this change.
    pub fn get(&self, coin: Money) -> u32 {
        self.coins.get(&coin).copied().unwrap_or(0)
    }

    /// Largest denomination first.
    pub fn iter(&self) -> impl Iterator<Item = (Money, u32)> + '_ {
        self.coins.iter().rev().map(|(&coin, &count)| (coin, count))
    }

    /// Total value of the change.
    pub fn total(&self) -> Money {
        self.iter().map(|(coin, count)| coin * count).sum()
    }

    /// Number of physical coins.
    pub fn coin_count(&self) -> u32 {
        self.coins.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }

    /// Borrow the underlying map (ascending key order).
    pub fn as_map(&self) -> &BTreeMap<Money, u32> {
        &self.coins
    }

    fn insert(&mut self, coin: Money, count: u32) {
        if count > 0 {
            *self.coins.entry(coin).or_insert(0) += count;
        }
    }
}

impl FromIterator<(Money, u32)> for Change {
    fn from_iter<I: IntoIterator<Item = (Money, u32)>>(iter: I) -> Self {
        let mut change = Change::new();
        for (coin, count) in iter {
            change.insert(coin, count);
        }
        change
    }
}

/// Renders as `500 * 1; 25 * 2;`, largest coin first. Empty change renders
/// as an empty string.
impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (coin, count) in self.iter() {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{} * {};", coin.cents(), count)?;
            first = false;
        }
        Ok(())
    }
}

// =============================================================================
// Coin Bank Trait
// =============================================================================

/// What a vending session needs from wherever the coins are kept.
///
/// Implemented by [`CoinInventory`] for a single machine, and by the
/// mutex-guarded inventory in `vend-machine` for sessions sharing one pool.
pub trait CoinBank {
    /// Accepts one coin into the bank.
    fn add_coin(&mut self, coin: Money) -> VendResult<()>;

    /// Pays out `deposit - price`, all or nothing.
    fn load_change(&mut self, deposit: Money, price: Money) -> VendResult<Change>;
}

impl<T: CoinBank + ?Sized> CoinBank for &mut T {
    fn add_coin(&mut self, coin: Money) -> VendResult<()> {
        (**self).add_coin(coin)
    }

    fn load_change(&mut self, deposit: Money, price: Money) -> VendResult<Change> {
        (**self).load_change(deposit, price)
    }
}

// =============================================================================
// Coin Inventory
// =============================================================================

/// Coin counts keyed by denomination.
///
/// ## Invariants
/// - `counts` has exactly one entry per denomination in the set, zero or not
/// - counts only change through `add_coin` (+1) and a successful
///   `load_change` (bulk decrement)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoinInventory {
    denominations: DenominationSet,
    counts: BTreeMap<Money, u32>,
}

impl CoinInventory {
    /// Creates an inventory with every denomination at zero.
    pub fn empty(denominations: DenominationSet) -> Self {
        let counts = denominations.ascending().map(|coin| (coin, 0)).collect();
        CoinInventory {
            denominations,
            counts,
        }
    }

    /// Creates an inventory with initial counts.
    ///
    /// Denominations not mentioned start at zero. A later entry for the same
    /// denomination replaces an earlier one.
    ///
    /// ## Errors
    /// `ValidationError::NotAllowed` if a count is given for a value outside
    /// the denomination set.
    ///
    /// ## Example
    /// ```rust
    /// use vend_core::{CoinInventory, DenominationSet, Money};
    ///
    /// let inventory = CoinInventory::new(
    ///     DenominationSet::canonical(),
    ///     [(Money::from_cents(25), 10), (Money::from_cents(200), 3)],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(inventory.count(Money::from_cents(25)), 10);
    /// assert_eq!(inventory.count(Money::from_cents(500)), 0);
    /// ```
    pub fn new(
        denominations: DenominationSet,
        initial: impl IntoIterator<Item = (Money, u32)>,
    ) -> ValidationResult<Self> {
        let mut inventory = Self::empty(denominations);

        for (coin, count) in initial {
            match inventory.counts.get_mut(&coin) {
                Some(slot) => *slot = count,
                None => {
                    return Err(ValidationError::NotAllowed {
                        field: "coin".to_string(),
                        value: coin.cents(),
                        allowed: inventory.denominations.to_cents(),
                    })
                }
            }
        }

        Ok(inventory)
    }

    /// Creates an inventory over the canonical denomination set.
    pub fn canonical(initial: impl IntoIterator<Item = (Money, u32)>) -> ValidationResult<Self> {
        Self::new(DenominationSet::canonical(), initial)
    }

    /// Accepts one coin.
    ///
    /// ## Errors
    /// `VendError::InvalidDenomination` if the value is not accepted, or if
    /// its count is already at `u32::MAX` and the coin cannot be booked.
    /// Nothing changes in either case.
    pub fn add_coin(&mut self, coin: Money) -> VendResult<()> {
        let Some(count) = self.counts.get_mut(&coin) else {
            debug!(coin = %coin, "Coin rejected");
            return Err(VendError::InvalidDenomination { coin });
        };

        match count.checked_add(1) {
            Some(next) => {
                *count = next;
                debug!(coin = %coin, count = next, "Coin accepted");
                Ok(())
            }
            None => {
                warn!(coin = %coin, count = *count, "Coin tube full, coin rejected");
                Err(VendError::InvalidDenomination { coin })
            }
        }
    }

    /// Works out the coins for `amount` without touching the inventory.
    ///
    /// Greedy, largest denomination first, limited by the coins on hand.
    /// A zero amount yields empty change.
    ///
    /// ## Errors
    /// `VendError::InsufficientChange` if the selection cannot reach exactly
    /// zero, including when `amount` is negative or not a sum of accepted
    /// denominations.
    pub fn plan_change(&self, amount: Money) -> VendResult<Change> {
        let mut remaining = amount;
        let mut change = Change::new();

        if remaining.is_positive() {
            for coin in self.denominations.descending() {
                if coin > remaining {
                    continue;
                }

                let take = remaining.units_of(coin).min(self.count(coin));
                if take == 0 {
                    continue;
                }

                change.insert(coin, take);
                remaining -= coin * take;
            }
        }

        if !remaining.is_zero() {
            return Err(VendError::InsufficientChange {
                required: amount,
                remaining,
            });
        }

        Ok(change)
    }

    /// Pays out `deposit - price` and removes those coins from the inventory.
    ///
    /// ## Atomicity
    /// Either the full amount is paid and the coins are deducted, or an error
    /// is returned and every count is exactly what it was before the call.
    ///
    /// ## Errors
    /// - `VendError::InsufficientDeposit` if `deposit < price`
    /// - `VendError::InsufficientChange` if exact change cannot be made
    pub fn load_change(&mut self, deposit: Money, price: Money) -> VendResult<Change> {
        if deposit < price {
            return Err(VendError::InsufficientDeposit { deposit, price });
        }

        let required = deposit - price;
        if required.is_zero() {
            return Ok(Change::new());
        }

        let change = match self.plan_change(required) {
            Ok(change) => change,
            Err(err) => {
                warn!(required = %required, "Cannot make exact change");
                return Err(err);
            }
        };

        for (coin, count) in change.iter() {
            if let Some(slot) = self.counts.get_mut(&coin) {
                *slot -= count;
            }
        }

        debug!(required = %required, change = %change, "Change paid out");
        Ok(change)
    }

    /// Current counts, one entry per denomination, ascending.
    pub fn coins(&self) -> &BTreeMap<Money, u32> {
        &self.counts
    }

    /// Count on hand for `coin`; zero for values outside the set.
    pub fn count(&self, coin: Money) -> u32 {
        self.counts.get(&coin).copied().unwrap_or(0)
    }

    /// Value of every coin in the machine.
    pub fn total_value(&self) -> Money {
        self.counts.iter().map(|(&coin, &count)| coin * count).sum()
    }

    pub fn denominations(&self) -> &DenominationSet {
        &self.denominations
    }
}

impl Default for CoinInventory {
    /// Canonical denominations, no coins.
    fn default() -> Self {
        CoinInventory::empty(DenominationSet::canonical())
    }
}

impl CoinBank for CoinInventory {
    fn add_coin(&mut self, coin: Money) -> VendResult<()> {
        CoinInventory::add_coin(self, coin)
    }

    fn load_change(&mut self, deposit: Money, price: Money) -> VendResult<Change> {
        CoinInventory::load_change(self, deposit, price)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
