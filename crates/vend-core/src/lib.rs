//! # vend-core: Pure Transaction Logic for a Vending Machine
//!
//! Coin acceptance, deposit bookkeeping, greedy change-making over a finite
//! coin supply, and product withdrawal. No I/O, no threads, no config files.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Vend Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              vend-machine (config, shared state, binary)        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vend-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  session  │─►│   coins   │  │  catalog  │  │   money   │  │   │
//! │  │   │ Vending-  │  │ Coin-     │  │ Product   │  │ Money     │  │   │
//! │  │   │ Session   │  │ Inventory │  │ Catalog   │  │           │  │   │
//! │  │   └─────┬─────┘  │ Change    │  └───────────┘  └───────────┘  │   │
//! │  │         │        └───────────┘        ▲                        │   │
//! │  │         └─────────────────────────────┘                        │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOCKS • DETERMINISTIC                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Integer money in cents
//! - [`denomination`] - The accepted coin set
//! - [`coins`] - Coin inventory, greedy change, the `CoinBank` seam
//! - [`catalog`] - Products and the `ProductCatalog` seam
//! - [`session`] - The purchase state machine
//! - [`error`] - `VendError` and `ValidationError`
//! - [`validation`] - Construction-time checks
//!
//! ## Example Usage
//!
//! ```rust
//! use vend_core::{Catalog, CoinInventory, Money, Product, VendingSession};
//!
//! let mut catalog = Catalog::new();
//! let coke = catalog.insert(Product::new("coke", Money::from_cents(200), 1).unwrap());
//! let mut coins = CoinInventory::canonical([
//!     (Money::from_cents(25), 10),
//!     (Money::from_cents(100), 10),
//!     (Money::from_cents(500), 5),
//! ])
//! .unwrap();
//!
//! let mut session = VendingSession::new(&mut catalog, &mut coins);
//! for coin in [500, 200, 25, 25] {
//!     session.insert_coin(Money::from_cents(coin)).unwrap();
//! }
//!
//! let vended = session.withdraw_product(&coke).unwrap();
//! assert_eq!(vended.change.to_string(), "500 * 1; 25 * 2;");
//! ```

pub mod catalog;
pub mod coins;
pub mod denomination;
pub mod error;
pub mod money;
pub mod session;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{Catalog, Product, ProductCatalog, ProductId};
pub use coins::{Change, CoinBank, CoinInventory};
pub use denomination::{DenominationSet, CANONICAL_DENOMINATIONS};
pub use error::{ValidationError, ValidationResult, VendError, VendResult};
pub use money::Money;
pub use session::{Vended, VendingSession};
