//! # vend-machine: Machine Wiring for Vend
//!
//! Loads a machine from `machine.toml`, shares its coin float and catalog
//! between buyer sessions, and replays scripted purchases.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Vend Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              ★ vend-machine (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   config ──► machine ──► replay ◄── bin/vend                    │   │
//! │  │                 │                                               │   │
//! │  │                 ▼                                               │   │
//! │  │              shared (Arc<Mutex<_>> float + catalog)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                vend-core (pure transaction logic)               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::Level;
use tracing_subscriber::EnvFilter;

pub mod config;
pub mod error;
pub mod machine;
pub mod replay;
pub mod shared;

pub use config::{CoinLoad, MachineConfig, MachineSettings, ProductSeed};
pub use error::{MachineError, MachineResult};
pub use machine::{Machine, MachineSession};
pub use replay::{replay, Outcome, Step};
pub use shared::{SharedCatalog, SharedCoinInventory};

/// Initializes the tracing subscriber for logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every coin and change decision
/// - `RUST_LOG=info` - Show purchases and machine start-up (default for vend)
/// - `RUST_LOG=warn` - Show only refused change and config problems
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,vend=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .init();
}
