//! # Machine Configuration
//!
//! What a machine is loaded with when it boots: the coins it accepts, the
//! float of coins it starts with, and the products on its shelves.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     VEND_MACHINE_NAME="Lobby"                                          │
//! │     VEND_DENOMINATIONS=25,100,500                                      │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $VEND_CONFIG, --config <path>, or                                  │
//! │     ~/.config/vend/machine.toml (Linux)                                │
//! │     ~/Library/Application Support/com.vend.vend/machine.toml (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     Canonical coin set, empty float, no products                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # machine.toml
//! [machine]
//! name = "Lobby"
//! denominations = [25, 50, 100, 200, 300, 500]
//!
//! [[coins]]
//! denomination = 25
//! count = 20
//!
//! [[coins]]
//! denomination = 100
//! count = 10
//!
//! [[products]]
//! name = "coke"
//! price = 200
//! stock = 5
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use vend_core::{Catalog, CoinInventory, DenominationSet, Money, Product, ValidationError};

use crate::error::{MachineError, MachineResult};

/// Env var naming the config file, checked before the platform default.
pub const CONFIG_PATH_ENV: &str = "VEND_CONFIG";

// =============================================================================
// Machine Settings
// =============================================================================

/// Identity of the machine and the coins it accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineSettings {
    /// Human-readable machine name (e.g., "Lobby", "Floor 3").
    #[serde(default = "default_machine_name")]
    pub name: String,

    /// Accepted coin values in cents.
    #[serde(default)]
    pub denominations: DenominationSet,
}

fn default_machine_name() -> String {
    "Vending Machine".to_string()
}

impl Default for MachineSettings {
    fn default() -> Self {
        MachineSettings {
            name: default_machine_name(),
            denominations: DenominationSet::default(),
        }
    }
}

// =============================================================================
// Coin Float and Product Seeds
// =============================================================================

/// Number of coins of one denomination loaded at boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinLoad {
    pub denomination: Money,
    pub count: u32,
}

/// A product placed on the shelves at boot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSeed {
    pub name: String,
    pub price: Money,
    #[serde(default)]
    pub stock: u32,
}

// =============================================================================
// Main Machine Configuration
// =============================================================================

/// Complete machine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineConfig {
    #[serde(default)]
    pub machine: MachineSettings,

    /// Initial coin float. Denominations not listed start at zero.
    #[serde(default)]
    pub coins: Vec<CoinLoad>,

    #[serde(default)]
    pub products: Vec<ProductSeed>,
}

impl MachineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (machine.toml)
    /// 3. Environment variables
    ///
    /// A missing file is not an error; an unreadable or malformed one is.
    pub fn load(config_path: Option<PathBuf>) -> MachineResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading machine config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Reads and parses one config file without applying overrides.
    pub fn from_file(path: &Path) -> MachineResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses a config document without applying overrides.
    pub fn from_toml_str(contents: &str) -> MachineResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Checks that the config can actually be built into a machine.
    pub fn validate(&self) -> MachineResult<()> {
        self.build().map(|_| ())
    }

    /// Builds the coin float and the catalog this config describes.
    ///
    /// ## Errors
    /// - `ValidationError::NotAllowed` for a coin load outside the accepted set
    /// - `ValidationError::Duplicate` for a denomination or product listed twice
    /// - any `ValidationError` a product seed fails
    pub fn build(&self) -> MachineResult<(Catalog, CoinInventory)> {
        let mut seen = HashSet::new();
        for load in &self.coins {
            if !seen.insert(load.denomination) {
                return Err(ValidationError::Duplicate {
                    field: "coins.denomination".to_string(),
                    value: load.denomination.cents().to_string(),
                }
                .into());
            }
        }

        let inventory = CoinInventory::new(
            self.machine.denominations.clone(),
            self.coins.iter().map(|load| (load.denomination, load.count)),
        )?;

        let mut catalog = Catalog::new();
        for seed in &self.products {
            let product = Product::new(seed.name.as_str(), seed.price, seed.stock)?;
            if catalog.find_by_name(product.name()).is_some() {
                return Err(ValidationError::Duplicate {
                    field: "products.name".to_string(),
                    value: product.name().to_string(),
                }
                .into());
            }
            catalog.insert(product);
        }

        Ok((catalog, inventory))
    }

    /// Serializes the config back to TOML, e.g. to print a starter file.
    pub fn to_toml_string(&self) -> MachineResult<String> {
        toml::to_string_pretty(self).map_err(|e| MachineError::InvalidConfig(e.to_string()))
    }

    /// Applies `VEND_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup. Unparseable values are logged
    /// and skipped.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("VEND_MACHINE_NAME") {
            debug!(name = %name, "Overriding machine name from environment");
            self.machine.name = name;
        }

        if let Some(raw) = lookup("VEND_DENOMINATIONS") {
            match parse_denominations(&raw) {
                Ok(set) => {
                    debug!(denominations = ?set.to_cents(), "Overriding denominations from environment");
                    self.machine.denominations = set;
                }
                Err(e) => warn!(value = %raw, error = %e, "Ignoring VEND_DENOMINATIONS"),
            }
        }
    }

    /// Returns the default config file path.
    ///
    /// `VEND_CONFIG` wins over the platform config directory.
    pub fn default_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(path));
        }
        directories::ProjectDirs::from("com", "vend", "vend")
            .map(|dirs| dirs.config_dir().join("machine.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn name(&self) -> &str {
        &self.machine.name
    }

    pub fn denominations(&self) -> &DenominationSet {
        &self.machine.denominations
    }
}

/// Parses a comma separated list of cent values, e.g. `"25, 100,500"`.
fn parse_denominations(raw: &str) -> MachineResult<DenominationSet> {
    let cents = raw
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i64>().map_err(|_| ValidationError::InvalidFormat {
                field: "denominations".to_string(),
                reason: format!("'{}' is not a whole number of cents", part),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DenominationSet::from_cents(&cents)?)
}
