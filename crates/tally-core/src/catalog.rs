//! # Catalog Module
//!
//! The read-only registry of products available for sale.
//!
//! A catalog is built once, from a seed, and owns the canonical `Product`
//! values. Baskets borrow products from it; nothing mutates a catalog after
//! construction, so one catalog can serve any number of checkouts.

use std::collections::BTreeMap;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::product::Product;

/// A name-keyed registry of products, fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    // BTreeMap keeps iteration ordered by name, so listings are stable.
    products: BTreeMap<String, Product>,
}

impl Catalog {
    /// Builds a catalog from a seed set of products.
    ///
    /// Product names are identities: a duplicate name is a seed defect and
    /// fails construction rather than silently shadowing an earlier entry.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::catalog::Catalog;
    /// use tally_core::money::Money;
    /// use tally_core::product::Product;
    ///
    /// let catalog = Catalog::new([
    ///     Product::new("C", Money::from_cents(20)).unwrap(),
    ///     Product::new("D", Money::from_cents(15)).unwrap(),
    /// ])
    /// .unwrap();
    /// assert_eq!(catalog.len(), 2);
    /// ```
    pub fn new(products: impl IntoIterator<Item = Product>) -> CoreResult<Self> {
        let mut map = BTreeMap::new();

        for product in products {
            if map.contains_key(product.name()) {
                return Err(ValidationError::Duplicate {
                    field: "product name".to_string(),
                    value: product.name().to_string(),
                }
                .into());
            }
            map.insert(product.name().to_string(), product);
        }

        Ok(Catalog { products: map })
    }

    /// Looks a product up by name, reporting a miss as a typed error.
    ///
    /// The caller decides what a miss means; the reference driver logs it
    /// and skips the basket line.
    pub fn lookup(&self, name: &str) -> CoreResult<&Product> {
        self.get(name)
            .ok_or_else(|| CoreError::ProductNotFound(name.to_string()))
    }

    /// Looks a product up by name.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Product> {
        self.products.get(name)
    }

    /// Whether the catalog carries a product with this name.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.products.contains_key(name)
    }

    /// Number of products in the catalog.
    #[inline]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Iterates products in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
