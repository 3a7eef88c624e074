//! # Error Types
//!
//! Domain-specific error types for vend-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vend-core errors (this file)                                          │
//! │  ├── VendError        - Transaction failures (recoverable, per call)    │
//! │  └── ValidationError  - Bad construction input (denominations, prices)  │
//! │                                                                         │
//! │  vend-machine errors (separate crate)                                  │
//! │  └── MachineError     - Config file / environment failures              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Transaction Failures
//! Every `VendError` leaves the machine usable. The buyer can insert more
//! coins, pick another product, or cancel. None of them mutates the deposit,
//! the coin inventory or the catalog.
//!
//! | Variant               | Raised by                          | Message prefix             |
//! |-----------------------|------------------------------------|----------------------------|
//! | `InvalidDenomination` | `insert_coin`, `add_coin`          | "Non supported coin"       |
//! | `InsufficientChange`  | `withdraw_product`, `load_change`  | "Not enough change"        |
//! | `ProductUnavailable`  | `withdraw_product`                 | "Product is not available" |
//! | `InsufficientDeposit` | `withdraw_product`, `load_change`  | "Not enough money"         |

use thiserror::Error;

use crate::catalog::ProductId;
use crate::money::Money;

// =============================================================================
// Vend Error
// =============================================================================

/// A purchase step that could not be completed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VendError {
    /// The coin is not accepted: its value is outside the denomination set,
    /// or the inventory cannot count one more of it.
    ///
    /// The coin is handed back; deposit and inventory are untouched.
    #[error("Non supported coin: {coin}")]
    InvalidDenomination { coin: Money },

    /// The inventory cannot pay out the exact change with greedy selection.
    ///
    /// `remaining` is what was still owed after every usable coin was taken.
    /// The inventory is left exactly as it was before the attempt.
    #[error("Not enough change: cannot pay out {required} ({remaining} short)")]
    InsufficientChange { required: Money, remaining: Money },

    /// The product id is unknown or its stock is zero.
    ///
    /// Both causes share this variant so callers cannot tell them apart.
    #[error("Product is not available: {product_id}")]
    ProductUnavailable { product_id: ProductId },

    /// The deposit does not cover the price.
    #[error("Not enough money: deposited {deposit}, price is {price}")]
    InsufficientDeposit { deposit: Money, price: Money },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Construction input that violates a domain rule.
///
/// Raised while building denomination sets, inventories and catalogs, never
/// during a purchase.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly positive.
    #[error("{field} must be positive, got {value}")]
    MustBePositive { field: String, value: i64 },

    /// The same value was given twice.
    #[error("{field} '{value}' appears more than once")]
    Duplicate { field: String, value: String },

    /// Value is not in the allowed set.
    #[error("{field} {value} must be one of: {allowed:?}")]
    NotAllowed {
        field: String,
        value: i64,
        allowed: Vec<i64>,
    },

    /// Invalid format (e.g. a product id that is not a UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value exceeds its upper bound.
    #[error("{field} must be at most {max}, got {value}")]
    TooLarge { field: String, value: i64, max: i64 },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result of a purchase step.
pub type VendResult<T> = Result<T, VendError>;

/// Result of a construction-time check.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vend_error_messages() {
        let err = VendError::InvalidDenomination {
            coin: Money::from_cents(999),
        };
        assert_eq!(err.to_string(), "Non supported coin: $9.99");

        let err = VendError::InsufficientDeposit {
            deposit: Money::from_cents(100),
            price: Money::from_cents(200),
        };
        assert_eq!(
            err.to_string(),
            "Not enough money: deposited $1.00, price is $2.00"
        );

        let err = VendError::InsufficientChange {
            required: Money::from_cents(300),
            remaining: Money::from_cents(300),
        };
        assert!(err.to_string().starts_with("Not enough change"));
    }

    #[test]
    fn test_product_unavailable_message() {
        let id = ProductId::new();
        let err = VendError::ProductUnavailable { product_id: id };
        assert_eq!(err.to_string(), format!("Product is not available: {}", id));
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "denominations".to_string(),
        };
        assert_eq!(err.to_string(), "denominations is required");

        let err = ValidationError::NotAllowed {
            field: "coin".to_string(),
            value: 10,
            allowed: vec![25, 50],
        };
        assert_eq!(err.to_string(), "coin 10 must be one of: [25, 50]");
    }
}
