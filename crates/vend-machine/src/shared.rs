//! # Shared Machine State
//!
//! One coin float and one catalog serve every session a machine opens. Each
//! session gets a cheap clone of these handles.
//!
//! ## Thread Safety
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Lock Scope per Session Operation                     │
//! │                                                                         │
//! │  Operation            Catalog lock           Coin lock                  │
//! │  ─────────            ────────────           ─────────                  │
//! │                                                                         │
//! │  insert_coin()        -                      add_coin()                 │
//! │                                                                         │
//! │  withdraw_product()   held for the whole ─┬─► load_change()             │
//! │                       check + decrement   │   (taken inside)            │
//! │                                           │                             │
//! │  cancel()             -                   └─► load_change()             │
//! │                                                                         │
//! │  NOTE: The catalog lock is always taken before the coin lock, never     │
//! │        the other way round. Two buyers cannot both take the last can.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A poisoned lock is recovered rather than propagated: every mutation under
//! these locks is validated first and committed with plain assignments, so a
//! panic elsewhere cannot leave the guarded value half-written.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use vend_core::{
    Catalog, Change, CoinBank, CoinInventory, Money, Product, ProductCatalog, ProductId,
    VendResult,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// =============================================================================
// Shared Coin Inventory
// =============================================================================

/// Coin float shared by every session of a machine.
#[derive(Debug, Clone, Default)]
pub struct SharedCoinInventory {
    inner: Arc<Mutex<CoinInventory>>,
}

impl SharedCoinInventory {
    pub fn new(inventory: CoinInventory) -> Self {
        SharedCoinInventory {
            inner: Arc::new(Mutex::new(inventory)),
        }
    }

    /// Executes a function with read access to the inventory.
    pub fn with_inventory<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CoinInventory) -> R,
    {
        let inventory = lock(&self.inner);
        f(&inventory)
    }

    /// Executes a function with write access to the inventory, e.g. to
    /// restock the float.
    pub fn with_inventory_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CoinInventory) -> R,
    {
        let mut inventory = lock(&self.inner);
        f(&mut inventory)
    }

    pub fn count(&self, coin: Money) -> u32 {
        self.with_inventory(|inventory| inventory.count(coin))
    }

    pub fn total_value(&self) -> Money {
        self.with_inventory(CoinInventory::total_value)
    }
}

impl CoinBank for SharedCoinInventory {
    fn add_coin(&mut self, coin: Money) -> VendResult<()> {
        self.with_inventory_mut(|inventory| inventory.add_coin(coin))
    }

    fn load_change(&mut self, deposit: Money, price: Money) -> VendResult<Change> {
        self.with_inventory_mut(|inventory| inventory.load_change(deposit, price))
    }
}

// =============================================================================
// Shared Catalog
// =============================================================================

/// Catalog shared by every session of a machine.
#[derive(Debug, Clone, Default)]
pub struct SharedCatalog {
    inner: Arc<Mutex<Catalog>>,
}

impl SharedCatalog {
    pub fn new(catalog: Catalog) -> Self {
        SharedCatalog {
            inner: Arc::new(Mutex::new(catalog)),
        }
    }

    /// Executes a function with read access to the catalog.
    pub fn with_catalog<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Catalog) -> R,
    {
        let catalog = lock(&self.inner);
        f(&catalog)
    }

    /// Executes a function with write access to the catalog, e.g. to add a
    /// product.
    pub fn with_catalog_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Catalog) -> R,
    {
        let mut catalog = lock(&self.inner);
        f(&mut catalog)
    }

    pub fn find_by_name(&self, name: &str) -> Option<ProductId> {
        self.with_catalog(|catalog| catalog.find_by_name(name))
    }

    pub fn product(&self, id: &ProductId) -> Option<Product> {
        self.with_catalog(|catalog| catalog.get(id).cloned())
    }
}

impl ProductCatalog for SharedCatalog {
    fn with_product<R>(
        &mut self,
        id: &ProductId,
        f: impl FnOnce(Option<&mut Product>) -> R,
    ) -> R {
        self.with_catalog_mut(|catalog| f(catalog.get_mut(id)))
    }
}
