//! # Validation Module
//!
//! Checks applied when a machine is assembled: the denomination set, initial
//! coin loads and catalog entries. Purchases never call into this module;
//! their failures are `VendError`s.
//!
//! ## Usage
//! ```rust
//! use vend_core::validation::{validate_price, validate_product_name};
//! use vend_core::Money;
//!
//! assert!(validate_product_name("Cola").is_ok());
//! assert!(validate_price(Money::from_cents(200)).is_ok());
//! assert!(validate_price(Money::zero()).is_err());
//! ```

use std::collections::BTreeSet;

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;

/// Longest product name the display can show.
pub const MAX_PRODUCT_NAME_LEN: usize = 64;

/// Largest coin face value the machine will book, in cents ($100).
///
/// With counts capped at `u32::MAX` and distinct values at or below this,
/// neither a deposit nor an inventory total can overflow `i64`.
pub const MAX_DENOMINATION_CENTS: i64 = 10_000;

// =============================================================================
// Catalog Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be blank
/// - At most [`MAX_PRODUCT_NAME_LEN`] characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a unit price. Free products are not sold by the machine.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
            value: price.cents(),
        });
    }

    Ok(())
}

// =============================================================================
// Coin Validators
// =============================================================================

/// Validates a single denomination value.
///
/// ## Rules
/// - Positive
/// - At most [`MAX_DENOMINATION_CENTS`]
pub fn validate_denomination(value: Money) -> ValidationResult<()> {
    if !value.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "denomination".to_string(),
            value: value.cents(),
        });
    }

    if value.cents() > MAX_DENOMINATION_CENTS {
        return Err(ValidationError::TooLarge {
            field: "denomination".to_string(),
            value: value.cents(),
            max: MAX_DENOMINATION_CENTS,
        });
    }

    Ok(())
}

/// Validates a whole denomination list.
///
/// ## Rules
/// - At least one denomination
/// - Every value positive
/// - No value listed twice
pub fn validate_denominations(values: &[Money]) -> ValidationResult<()> {
    if values.is_empty() {
        return Err(ValidationError::Required {
            field: "denominations".to_string(),
        });
    }

    let mut seen = BTreeSet::new();
    for &value in values {
        validate_denomination(value)?;
        if !seen.insert(value) {
            return Err(ValidationError::Duplicate {
                field: "denomination".to_string(),
                value: value.cents().to_string(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cents(values: &[i64]) -> Vec<Money> {
        values.iter().copied().map(Money::from_cents).collect()
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Cola").is_ok());
        assert!(validate_product_name("  ").is_err());
        assert!(validate_product_name(&"x".repeat(MAX_PRODUCT_NAME_LEN)).is_ok());
        assert!(validate_product_name(&"x".repeat(MAX_PRODUCT_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::from_cents(25)).is_ok());
        assert!(validate_price(Money::zero()).is_err());
        assert!(validate_price(Money::from_cents(-200)).is_err());
    }

    #[test]
    fn test_validate_denomination_upper_bound() {
        assert!(validate_denomination(Money::from_cents(MAX_DENOMINATION_CENTS)).is_ok());

        let err = validate_denomination(Money::from_cents(i64::MAX)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::TooLarge {
                field: "denomination".to_string(),
                value: i64::MAX,
                max: MAX_DENOMINATION_CENTS,
            }
        );
        assert!(validate_denominations(&cents(&[25, MAX_DENOMINATION_CENTS + 1])).is_err());
    }

    #[test]
    fn test_validate_denominations() {
        assert!(validate_denominations(&cents(&[25, 50, 100])).is_ok());
        assert!(validate_denominations(&[]).is_err());
        assert!(validate_denominations(&cents(&[25, 0])).is_err());

        let err = validate_denominations(&cents(&[25, 100, 25])).unwrap_err();
        assert!(matches!(err, ValidationError::Duplicate { .. }));
    }
}
