//! # Vending Session
//!
//! One buyer's purchase: coins go in one at a time, then a product is
//! withdrawn (or the purchase is cancelled).
//!
//! ## Purchase State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   insert_coin(v) ──► add_coin(v) ──┬── ok  ──► deposit += v             │
//! │        ▲                           └── err ──► InvalidDenomination      │
//! │        │                                                                │
//! │        │     withdraw_product(id)                                       │
//! │        │        1. id unknown          ──► ProductUnavailable ─┐        │
//! │        │        2. stock == 0          ──► ProductUnavailable ─┤        │
//! │        │        3. deposit < price     ──► InsufficientDeposit ┤        │
//! │        │        4. load_change fails   ──► InsufficientChange ─┤        │
//! │        │        5. stock -= 1, deposit = 0 ──► Vended           │        │
//! │        │                                                        │        │
//! │        └──────────── deposit kept, buyer may retry ◄────────────┘        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failure is returned as a `VendError` value. The session is still
//! usable afterwards and nothing has been mutated.

use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::{Catalog, ProductCatalog, ProductId};
use crate::coins::{Change, CoinBank, CoinInventory};
use crate::error::{VendError, VendResult};
use crate::money::Money;

// =============================================================================
// Vended
// =============================================================================

/// A completed purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vended {
    /// Name of the dispensed product.
    pub product: String,

    /// Coins returned; empty on exact payment.
    pub change: Change,
}

// =============================================================================
// Vending Session
// =============================================================================

/// Orchestrates coin insertion and product withdrawal.
///
/// Generic over where products and coins live, so the same session logic
/// runs against a plain `&mut Catalog` / `&mut CoinInventory` or against the
/// shared, lock-guarded versions in `vend-machine`.
///
/// ## Example
/// ```rust
/// use vend_core::{Catalog, CoinInventory, Money, Product, VendingSession};
///
/// let mut catalog = Catalog::new();
/// let cola = catalog.insert(Product::new("Cola", Money::from_cents(200), 1).unwrap());
/// let mut coins = CoinInventory::canonical([(Money::from_cents(25), 10)]).unwrap();
///
/// let mut session = VendingSession::new(&mut catalog, &mut coins);
/// session.insert_coin(Money::from_cents(200)).unwrap();
///
/// let vended = session.withdraw_product(&cola).unwrap();
/// assert_eq!(vended.product, "Cola");
/// assert!(vended.change.is_empty());
/// assert_eq!(session.deposit(), Money::zero());
/// ```
#[derive(Debug)]
pub struct VendingSession<C = Catalog, B = CoinInventory> {
    products: C,
    coins: B,
    deposit: Money,
}

impl<C, B> VendingSession<C, B>
where
    C: ProductCatalog,
    B: CoinBank,
{
    /// Starts a session with a zero deposit.
    pub fn new(products: C, coins: B) -> Self {
        VendingSession {
            products,
            coins,
            deposit: Money::zero(),
        }
    }

    /// Inserts one coin.
    ///
    /// ## Errors
    /// `VendError::InvalidDenomination` if the coin is not accepted. The coin
    /// is not counted and the deposit does not change.
    pub fn insert_coin(&mut self, coin: Money) -> VendResult<()> {
        self.coins.add_coin(coin)?;
        self.deposit += coin;
        debug!(coin = %coin, deposit = %self.deposit, "Deposit increased");
        Ok(())
    }

    /// Dispenses one unit of `id` and pays out change.
    ///
    /// The catalog record stays borrowed for the whole call, so a shared
    /// catalog serializes concurrent withdrawals. Stock and deposit only
    /// change once change has been paid.
    ///
    /// ## Errors
    /// Checked in this order, stopping at the first failure:
    /// - `ProductUnavailable`: unknown id, or stock is zero
    /// - `InsufficientDeposit`: deposit below price
    /// - `InsufficientChange`: exact change cannot be paid
    pub fn withdraw_product(&mut self, id: &ProductId) -> VendResult<Vended> {
        let deposit = self.deposit;
        let coins = &mut self.coins;

        let result = self.products.with_product(id, |product| {
            let product = match product {
                Some(product) if product.is_available() => product,
                _ => return Err(VendError::ProductUnavailable { product_id: *id }),
            };

            if deposit < product.price() {
                return Err(VendError::InsufficientDeposit {
                    deposit,
                    price: product.price(),
                });
            }

            let change = coins.load_change(deposit, product.price())?;
            product.take_one();

            Ok(Vended {
                product: product.name().to_string(),
                change,
            })
        });

        match result {
            Ok(vended) => {
                self.deposit = Money::zero();
                info!(
                    product_id = %id,
                    product = %vended.product,
                    change = %vended.change,
                    "Product dispensed"
                );
                Ok(vended)
            }
            Err(err) => {
                debug!(product_id = %id, deposit = %deposit, error = %err, "Withdrawal refused");
                Err(err)
            }
        }
    }

    /// Returns the whole deposit as coins and ends the purchase.
    ///
    /// Uses the same greedy selection as change. A zero deposit returns empty
    /// change.
    ///
    /// ## Errors
    /// `VendError::InsufficientChange` if the deposit cannot be paid back
    /// exactly; the deposit is kept so the buyer can still buy something.
    pub fn cancel(&mut self) -> VendResult<Change> {
        let refund = self.coins.load_change(self.deposit, Money::zero())?;
        info!(refund = %refund, "Purchase cancelled");
        self.deposit = Money::zero();
        Ok(refund)
    }

    /// Value inserted so far in this purchase.
    pub fn deposit(&self) -> Money {
        self.deposit
    }

    /// The catalog this session sells from.
    pub fn products(&self) -> &C {
        &self.products
    }

    /// The coin bank this session pays from.
    pub fn coins(&self) -> &B {
        &self.coins
    }

    /// Ends the session, returning its collaborators and any unspent deposit.
    pub fn into_parts(self) -> (C, B, Money) {
        (self.products, self.coins, self.deposit)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
