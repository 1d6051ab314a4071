//! # Checkout Module
//!
//! The basket: products and quantities being priced in one transaction.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     One Basket, One Checkout                            │
//! │                                                                         │
//! │  Catalog::lookup("A") ──► &Product ──► Checkout::add(&product, 3)      │
//! │                                              │                          │
//! │                              merge by name, validate quantity           │
//! │                                              │                          │
//! │                                              ▼                          │
//! │                               Checkout::calculate_total()               │
//! │                                              │                          │
//! │                          Product::price_for per line, in the order      │
//! │                          lines were first added                         │
//! │                                              │                          │
//! │                                              ▼                          │
//! │                                      BasketTotals                       │
//! │                            (lines, failed lines, grand total)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by product name (adding the same product accumulates)
//! - Every line holds a positive quantity; rejected adds change nothing
//! - Lines keep the order in which their product was first added
//! - Maximum distinct lines: [`crate::MAX_BASKET_LINES`]
//! - Maximum accumulated quantity per line: [`crate::MAX_LINE_QUANTITY`]
//!
//! A checkout borrows its products from the catalog that owns them. It
//! never copies or mutates product state, only reads prices.

use serde::Serialize;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::product::Product;
use crate::validation::validate_quantity;
use crate::{MAX_BASKET_LINES, MAX_LINE_QUANTITY};

// =============================================================================
// Basket Line
// =============================================================================

/// One distinct product in the basket with its accumulated quantity.
#[derive(Debug, Clone)]
struct BasketLine<'a> {
    product: &'a Product,
    quantity: i64,
}

// =============================================================================
// Checkout
// =============================================================================

/// A single-use basket of products and quantities.
///
/// Created empty, grown with [`Checkout::add`], consumed with
/// [`Checkout::calculate_total`]. There is no removal: a basket that needs
/// shrinking is a new basket.
#[derive(Debug)]
pub struct Checkout<'a> {
    /// Basket identity, for diagnostics and the receipt.
    id: String,

    /// Distinct lines, in the order their product was first added.
    lines: Vec<BasketLine<'a>>,
}

impl<'a> Checkout<'a> {
    /// Creates a new empty basket with a fresh id.
    pub fn new() -> Self {
        Checkout {
            id: Uuid::new_v4().to_string(),
            lines: Vec::new(),
        }
    }

    /// The basket's identity.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Registers `quantity` additional units of `product`.
    ///
    /// If the product (by name) is already in the basket, quantities
    /// accumulate; otherwise a new line is appended. On any error the
    /// basket is unchanged.
    ///
    /// ## Errors
    /// - `quantity` is not positive
    /// - the accumulated line quantity would exceed [`MAX_LINE_QUANTITY`]
    /// - the basket already holds [`MAX_BASKET_LINES`] distinct lines
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::checkout::Checkout;
    /// use tally_core::money::Money;
    /// use tally_core::product::Product;
    ///
    /// let c = Product::new("C", Money::from_cents(20)).unwrap();
    /// let mut checkout = Checkout::new();
    ///
    /// checkout.add(&c, 2).unwrap();
    /// checkout.add(&c, 3).unwrap();
    /// assert_eq!(checkout.quantity_of("C"), Some(5));
    ///
    /// assert!(checkout.add(&c, 0).is_err());
    /// assert_eq!(checkout.quantity_of("C"), Some(5)); // unchanged
    /// ```
    pub fn add(&mut self, product: &'a Product, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity)?;

        // Lines are keyed by product name; the first reference added is the
        // one priced.
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product.name() == product.name())
        {
            let requested = line.quantity.saturating_add(quantity);
            if requested > MAX_LINE_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    name: product.name().to_string(),
                    requested,
                    max: MAX_LINE_QUANTITY,
                });
            }
            line.quantity = requested;
            return Ok(());
        }

        if quantity > MAX_LINE_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                name: product.name().to_string(),
                requested: quantity,
                max: MAX_LINE_QUANTITY,
            });
        }

        if self.lines.len() >= MAX_BASKET_LINES {
            return Err(CoreError::BasketTooLarge {
                max: MAX_BASKET_LINES,
            });
        }

        self.lines.push(BasketLine { product, quantity });
        Ok(())
    }

    /// Prices every line and sums the basket.
    ///
    /// A pure read: calling it twice on an unchanged basket yields the same
    /// totals. Lines are priced in insertion order. A line whose pricing
    /// fails contributes zero and is recorded in [`BasketTotals::failed`];
    /// the method itself always produces a total.
    pub fn calculate_total(&self) -> BasketTotals {
        let mut total = Money::zero();
        let mut lines = Vec::with_capacity(self.lines.len());
        let mut failed = Vec::new();

        for line in &self.lines {
            let name = line.product.name().to_string();

            match line.product.price_for(line.quantity) {
                Ok(line_total) => match total.checked_add(line_total) {
                    Some(sum) => {
                        total = sum;
                        lines.push(LineTotal {
                            name,
                            quantity: line.quantity,
                            total: line_total,
                        });
                    }
                    None => failed.push(LineFailure {
                        name: name.clone(),
                        reason: CoreError::PricingOverflow {
                            name,
                            quantity: line.quantity,
                        }
                        .to_string(),
                    }),
                },
                Err(err) => failed.push(LineFailure {
                    name,
                    reason: err.to_string(),
                }),
            }
        }

        BasketTotals {
            basket_id: self.id.clone(),
            line_count: self.lines.len(),
            total_quantity: self.total_quantity(),
            lines,
            failed,
            total,
        }
    }

    /// Whether the basket has no lines.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines in the basket.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Accumulated quantity for a product name, if present.
    pub fn quantity_of(&self, name: &str) -> Option<i64> {
        self.lines
            .iter()
            .find(|line| line.product.name() == name)
            .map(|line| line.quantity)
    }
}

impl Default for Checkout<'_> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Basket Totals
// =============================================================================

/// A successfully priced line, in basket insertion order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineTotal {
    pub name: String,
    pub quantity: i64,
    pub total: Money,
}

/// A line that could not be priced; it contributed zero to the total.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineFailure {
    pub name: String,
    pub reason: String,
}

/// The outcome of pricing a basket.
///
/// `total` is always present: failed lines are reported in `failed`
/// instead of aborting the checkout. The caller decides whether to
/// surface, default, or abort on failures.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketTotals {
    pub basket_id: String,
    pub line_count: usize,
    pub total_quantity: i64,
    pub lines: Vec<LineTotal>,
    pub failed: Vec<LineFailure>,
    pub total: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn product(name: &str, cents: i64) -> Product {
        Product::new(name, Money::from_cents(cents)).unwrap()
    }

    #[test]
    fn test_add_accumulates_quantity() {
        let c = product("C", 20);
        let mut checkout = Checkout::new();

        checkout.add(&c, 2).unwrap();
        checkout.add(&c, 3).unwrap();

        assert_eq!(checkout.line_count(), 1);
        assert_eq!(checkout.quantity_of("C"), Some(5));
        assert_eq!(checkout.total_quantity(), 5);
    }

    #[test]
    fn test_add_rejects_non_positive_quantity() {
        let c = product("C", 20);
        let mut checkout = Checkout::new();
        checkout.add(&c, 2).unwrap();

        for bad in [0, -1, -10] {
            let err = checkout.add(&c, bad).unwrap_err();
            assert!(matches!(
                err,
                CoreError::Validation(ValidationError::MustBePositive { .. })
            ));
        }

        // Rejected adds leave the basket unchanged
        assert_eq!(checkout.quantity_of("C"), Some(2));
        assert_eq!(checkout.line_count(), 1);
    }

    #[test]
    fn test_add_enforces_line_quantity_cap() {
        let c = product("C", 20);
        let mut checkout = Checkout::new();

        checkout.add(&c, MAX_LINE_QUANTITY).unwrap();
        let err = checkout.add(&c, 1).unwrap_err();

        assert!(matches!(
            err,
            CoreError::QuantityTooLarge {
                requested,
                ..
            } if requested == MAX_LINE_QUANTITY + 1
        ));
        assert_eq!(checkout.quantity_of("C"), Some(MAX_LINE_QUANTITY));

        // A fresh line over the cap is rejected outright
        let d = product("D", 15);
        assert!(checkout.add(&d, MAX_LINE_QUANTITY + 1).is_err());
        assert_eq!(checkout.quantity_of("D"), None);
    }

    #[test]
    fn test_add_enforces_basket_size_cap() {
        let products: Vec<Product> = (0..=MAX_BASKET_LINES)
            .map(|i| product(&format!("P{i:03}"), 100))
            .collect();

        let mut checkout = Checkout::new();
        for p in products.iter().take(MAX_BASKET_LINES) {
            checkout.add(p, 1).unwrap();
        }

        let err = checkout.add(&products[MAX_BASKET_LINES], 1).unwrap_err();
        assert!(matches!(err, CoreError::BasketTooLarge { .. }));
        assert_eq!(checkout.line_count(), MAX_BASKET_LINES);
    }

    #[test]
    fn test_empty_basket_totals_to_zero() {
        let checkout = Checkout::new();
        let totals = checkout.calculate_total();

        assert_eq!(totals.total, Money::zero());
        assert_eq!(totals.line_count, 0);
        assert!(totals.lines.is_empty());
        assert!(totals.failed.is_empty());
    }

    #[test]
    fn test_calculate_total_sums_lines_in_insertion_order() {
        let b = Product::with_bundle("B", Money::from_cents(30), 2, Money::from_cents(45)).unwrap();
        let c = product("C", 20);
        let d = product("D", 15);

        let mut checkout = Checkout::new();
        checkout.add(&d, 1).unwrap();
        checkout.add(&b, 5).unwrap();
        checkout.add(&c, 1).unwrap();

        let totals = checkout.calculate_total();

        // 2 bundles of 2 at 45 each + 1 at 30 = 120
        assert_eq!(totals.total, Money::from_cents(15 + 120 + 20));

        let names: Vec<&str> = totals.lines.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["D", "B", "C"]);
        assert_eq!(totals.lines[1].total, Money::from_cents(120));
    }

    #[test]
    fn test_calculate_total_is_idempotent() {
        let c = product("C", 20);
        let mut checkout = Checkout::new();
        checkout.add(&c, 3).unwrap();

        let first = checkout.calculate_total();
        let second = checkout.calculate_total();

        assert_eq!(first.total, second.total);
        assert_eq!(first.lines.len(), second.lines.len());
        assert_eq!(first.basket_id, second.basket_id);
    }

    #[test]
    fn test_failed_line_contributes_zero_and_is_reported() {
        let pricey = product("Yacht", i64::MAX);
        let c = product("C", 20);

        let mut checkout = Checkout::new();
        checkout.add(&c, 1).unwrap();
        checkout.add(&pricey, 2).unwrap();

        let totals = checkout.calculate_total();

        // The overflowing line is reported; the rest of the basket totals
        assert_eq!(totals.total, Money::from_cents(20));
        assert_eq!(totals.lines.len(), 1);
        assert_eq!(totals.failed.len(), 1);
        assert_eq!(totals.failed[0].name, "Yacht");
        assert!(totals.failed[0].reason.contains("overflows"));
    }

    #[test]
    fn test_aggregate_overflow_is_reported_per_line() {
        let pricey = product("Yacht", i64::MAX);
        let also_pricey = product("Island", i64::MAX);

        let mut checkout = Checkout::new();
        checkout.add(&pricey, 1).unwrap();
        checkout.add(&also_pricey, 1).unwrap();

        let totals = checkout.calculate_total();

        // First line prices fine; summing the second overflows the total
        assert_eq!(totals.total, Money::from_cents(i64::MAX));
        assert_eq!(totals.failed.len(), 1);
        assert_eq!(totals.failed[0].name, "Island");
    }

    #[test]
    fn test_totals_serialize_for_receipts() {
        let c = product("C", 20);
        let mut checkout = Checkout::new();
        checkout.add(&c, 1).unwrap();

        let totals = checkout.calculate_total();
        let json = serde_json::to_value(&totals).unwrap();

        assert_eq!(json["total"], 20);
        assert_eq!(json["lineCount"], 1);
        assert_eq!(json["lines"][0]["name"], "C");
    }
}
