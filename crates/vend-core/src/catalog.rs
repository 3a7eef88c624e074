//! # Product Catalog
//!
//! Products are owned by the catalog. A vending session only borrows a
//! capability to look a product up and decrement its stock.
//!
//! ## Why a closure-based lookup?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  withdraw_product(id)                                                   │
//! │                                                                         │
//! │  catalog.with_product(id, |product| {      ← catalog held for the whole │
//! │      stock check                              closure: a shared catalog │
//! │      deposit check                            keeps its lock here, so   │
//! │      coins.load_change(..)                    two sessions cannot both  │
//! │      product.take_one()                       sell the last item        │
//! │  })                                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::validation::{validate_price, validate_product_name};

// =============================================================================
// Product Id
// =============================================================================

/// Opaque product identifier (UUID v4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(Uuid);

impl ProductId {
    /// Generates a fresh random id.
    pub fn new() -> Self {
        ProductId(Uuid::new_v4())
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ProductId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(ProductId)
            .map_err(|_| ValidationError::InvalidFormat {
                field: "product id".to_string(),
                reason: "must be a valid UUID".to_string(),
            })
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product slot in the machine.
///
/// Fields are private so that every `Product`, including deserialized ones,
/// has passed [`Product::new`]: a non-blank name and a positive price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProductRecord")]
pub struct Product {
    /// Name shown to the buyer and returned on a successful purchase.
    name: String,

    /// Unit price in cents. Always positive.
    price: Money,

    /// Units left in the slot.
    stock: u32,
}

/// Unchecked wire form of a [`Product`].
#[derive(Deserialize)]
struct ProductRecord {
    name: String,
    price: Money,
    stock: u32,
}

impl TryFrom<ProductRecord> for Product {
    type Error = ValidationError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        Product::new(record.name, record.price, record.stock)
    }
}

impl Product {
    /// Creates a validated product.
    ///
    /// ## Example
    /// ```rust
    /// use vend_core::{Money, Product};
    ///
    /// let cola = Product::new("Cola", Money::from_cents(200), 5).unwrap();
    /// assert!(cola.is_available());
    /// assert!(Product::new("", Money::from_cents(200), 5).is_err());
    /// ```
    pub fn new(name: impl Into<String>, price: Money, stock: u32) -> ValidationResult<Self> {
        let name = name.into();
        validate_product_name(&name)?;
        validate_price(price)?;

        Ok(Product {
            name: name.trim().to_string(),
            price,
            stock,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    /// True while at least one unit is left.
    #[inline]
    pub fn is_available(&self) -> bool {
        self.stock > 0
    }

    /// Removes one unit from the slot. No-op on an empty slot.
    pub(crate) fn take_one(&mut self) {
        self.stock = self.stock.saturating_sub(1);
    }
}

// =============================================================================
// Catalog Trait
// =============================================================================

/// Lookup-and-mutate access to product records, as a session needs it.
pub trait ProductCatalog {
    /// Runs `f` with mutable access to the product for `id`, or `None` if no
    /// such product exists.
    fn with_product<R>(&mut self, id: &ProductId, f: impl FnOnce(Option<&mut Product>) -> R)
        -> R;
}

impl<T: ProductCatalog + ?Sized> ProductCatalog for &mut T {
    fn with_product<R>(
        &mut self,
        id: &ProductId,
        f: impl FnOnce(Option<&mut Product>) -> R,
    ) -> R {
        (**self).with_product(id, f)
    }
}

// =============================================================================
// In-Memory Catalog
// =============================================================================

/// Products keyed by id, iterated in id order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    products: BTreeMap<ProductId, Product>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a product under a fresh id and returns that id.
    pub fn insert(&mut self, product: Product) -> ProductId {
        let id = ProductId::new();
        self.products.insert(id, product);
        id
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.get(id)
    }

    pub fn get_mut(&mut self, id: &ProductId) -> Option<&mut Product> {
        self.products.get_mut(id)
    }

    /// First product whose name matches, ignoring ASCII case.
    pub fn find_by_name(&self, name: &str) -> Option<ProductId> {
        let name = name.trim();
        self.products
            .iter()
            .find(|(_, product)| product.name.eq_ignore_ascii_case(name))
            .map(|(&id, _)| id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ProductId, &Product)> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl ProductCatalog for Catalog {
    fn with_product<R>(
        &mut self,
        id: &ProductId,
        f: impl FnOnce(Option<&mut Product>) -> R,
    ) -> R {
        f(self.products.get_mut(id))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cola() -> Product {
        Product::new("Cola", Money::from_cents(200), 3).unwrap()
    }

    #[test]
    fn test_product_new_trims_name() {
        let product = Product::new("  Water ", Money::from_cents(100), 1).unwrap();
        assert_eq!(product.name(), "Water");
    }

    #[test]
    fn test_product_validation() {
        assert!(Product::new("Cola", Money::zero(), 1).is_err());
        assert!(Product::new(" ", Money::from_cents(100), 1).is_err());
        // Out-of-stock products are valid catalog entries
        assert!(Product::new("Cola", Money::from_cents(100), 0).is_ok());
    }

    #[test]
    fn test_catalog_insert_and_get() {
        let mut catalog = Catalog::new();
        let id = catalog.insert(cola());

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(&id).map(Product::stock), Some(3));
        assert!(catalog.get(&ProductId::new()).is_none());
    }

    #[test]
    fn test_find_by_name() {
        let mut catalog = Catalog::new();
        let id = catalog.insert(cola());

        assert_eq!(catalog.find_by_name("cola"), Some(id));
        assert_eq!(catalog.find_by_name("juice"), None);
    }

    #[test]
    fn test_with_product_mutates_record() {
        let mut catalog = Catalog::new();
        let id = catalog.insert(cola());

        catalog.with_product(&id, |product| {
            if let Some(product) = product {
                product.take_one();
            }
        });

        assert_eq!(catalog.get(&id).map(Product::stock), Some(2));
        assert!(catalog.with_product(&ProductId::new(), |p| p.is_none()));
    }

    #[test]
    fn test_deserialize_validates_product() {
        let product: Product =
            serde_json::from_str(r#"{"name": " Cola ", "price": 200, "stock": 2}"#).unwrap();
        assert_eq!(product, Product::new("Cola", Money::from_cents(200), 2).unwrap());

        let negative = serde_json::from_str::<Product>(r#"{"name": "x", "price": -500, "stock": 1}"#);
        assert!(negative.is_err());
        let blank = serde_json::from_str::<Product>(r#"{"name": "", "price": 100, "stock": 1}"#);
        assert!(blank.is_err());
    }

    #[test]
    fn test_deserialize_catalog_rejects_bad_price() {
        let id = ProductId::new();
        let json = format!(r#"{{"products": {{"{}": {{"name": "x", "price": 0, "stock": 1}}}}}}"#, id);
        assert!(serde_json::from_str::<Catalog>(&json).is_err());
    }

    #[test]
    fn test_iter_in_id_order() {
        let mut catalog = Catalog::new();
        let a = catalog.insert(cola());
        let b = catalog.insert(Product::new("Water", Money::from_cents(100), 1).unwrap());

        let ids: Vec<ProductId> = catalog.iter().map(|(&id, _)| id).collect();
        let mut expected = vec![a, b];
        expected.sort();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_product_id_parse() {
        let id = ProductId::new();
        let parsed: ProductId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("not-a-uuid".parse::<ProductId>().is_err());
    }
}
