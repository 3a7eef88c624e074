//! # Machine
//!
//! A configured machine: its name, its shared coin float, and its shared
//! catalog. Every buyer gets a fresh [`VendingSession`] over the same state.

use tracing::info;
use vend_core::{Catalog, CoinInventory, ProductId, VendingSession};

use crate::config::MachineConfig;
use crate::error::MachineResult;
use crate::shared::{SharedCatalog, SharedCoinInventory};

/// Session type handed out by a [`Machine`].
pub type MachineSession = VendingSession<SharedCatalog, SharedCoinInventory>;

#[derive(Debug, Clone)]
pub struct Machine {
    name: String,
    catalog: SharedCatalog,
    coins: SharedCoinInventory,
}

impl Machine {
    pub fn new(name: impl Into<String>, catalog: Catalog, coins: CoinInventory) -> Self {
        Machine {
            name: name.into(),
            catalog: SharedCatalog::new(catalog),
            coins: SharedCoinInventory::new(coins),
        }
    }

    /// Builds a machine from a loaded configuration.
    pub fn from_config(config: &MachineConfig) -> MachineResult<Self> {
        let (catalog, coins) = config.build()?;
        info!(
            machine = %config.name(),
            products = catalog.len(),
            float = %coins.total_value(),
            "Machine ready"
        );
        Ok(Self::new(config.name(), catalog, coins))
    }

    /// Opens a session for the next buyer, starting at a zero deposit.
    pub fn session(&self) -> MachineSession {
        VendingSession::new(self.catalog.clone(), self.coins.clone())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn product_id(&self, name: &str) -> Option<ProductId> {
        self.catalog.find_by_name(name)
    }

    pub fn catalog(&self) -> &SharedCatalog {
        &self.catalog
    }

    pub fn coins(&self) -> &SharedCoinInventory {
        &self.coins
    }
}
