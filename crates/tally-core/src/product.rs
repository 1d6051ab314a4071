//! # Product Module
//!
//! Products and their optional bundle discount rule.
//!
//! ## Bundle Pricing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "3 FOR $1.30" — HOW A BUNDLE RULE PRICES A LINE                        │
//! │                                                                         │
//! │  Product: A, unit price 50¢, bundle { quantity: 3, price: 130¢ }       │
//! │                                                                         │
//! │  price_for(4):                                                          │
//! │    full_bundles = 4 / 3 = 1      remainder = 4 % 3 = 1                 │
//! │    total = 1 × 130¢ + 1 × 50¢ = 180¢                                   │
//! │                                                                         │
//! │  price_for(2):   below the bundle threshold                            │
//! │    total = 2 × 50¢ = 100¢                                              │
//! │                                                                         │
//! │  The bundle price is a FLAT price for the whole group, not a          │
//! │  discounted per-unit price.                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Immutability
//! A `Product` is validated once, at construction, and has no setters.
//! Whatever holds a `&Product` can price against it without re-checking.

use serde::Serialize;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::validation::{
    validate_bundle_price, validate_bundle_quantity, validate_product_name, validate_unit_price,
};

// =============================================================================
// Bundle Discount
// =============================================================================

/// A "buy N for a flat price" discount rule.
///
/// ## Both-or-Neither
/// The rule is a single value: a product either carries a complete
/// `BundleDiscount` or none at all. A bundle quantity without a bundle
/// price (or the reverse) is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BundleDiscount {
    /// Units that make up one full bundle (always positive).
    quantity: i64,

    /// Flat price charged per full bundle (always non-negative).
    price: Money,
}

impl BundleDiscount {
    /// Creates a bundle rule, validating both halves.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    /// use tally_core::product::BundleDiscount;
    ///
    /// let three_for_130 = BundleDiscount::new(3, Money::from_cents(130)).unwrap();
    /// assert_eq!(three_for_130.quantity(), 3);
    ///
    /// assert!(BundleDiscount::new(0, Money::from_cents(130)).is_err());
    /// assert!(BundleDiscount::new(3, Money::from_cents(-1)).is_err());
    /// ```
    pub fn new(quantity: i64, price: Money) -> CoreResult<Self> {
        validate_bundle_quantity(quantity)?;
        validate_bundle_price(price)?;

        Ok(BundleDiscount { quantity, price })
    }

    /// Units per full bundle.
    #[inline]
    pub const fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Flat price per full bundle.
    #[inline]
    pub const fn price(&self) -> Money {
        self.price
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
///
/// The name doubles as the product's identity within a catalog and basket.
/// Fields are private: construction is the only write, reads go through
/// accessors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    /// Display name and identity within a catalog (trimmed, non-empty).
    name: String,

    /// Unit price (non-negative).
    price: Money,

    /// Optional bundle discount rule.
    bundle: Option<BundleDiscount>,
}

impl Product {
    /// Creates a product with no discount rule.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    /// use tally_core::product::Product;
    ///
    /// let c = Product::new("C", Money::from_cents(20)).unwrap();
    /// assert_eq!(c.name(), "C");
    ///
    /// assert!(Product::new("", Money::from_cents(20)).is_err());
    /// assert!(Product::new("C", Money::from_cents(-20)).is_err());
    /// ```
    pub fn new(name: impl Into<String>, price: Money) -> CoreResult<Self> {
        Self::build(name.into(), price, None)
    }

    /// Creates a product with a "buy N for a flat price" rule.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    /// use tally_core::product::Product;
    ///
    /// // 50¢ each, or 3 for $1.30
    /// let a = Product::with_bundle("A", Money::from_cents(50), 3, Money::from_cents(130)).unwrap();
    /// assert!(a.bundle().is_some());
    /// ```
    pub fn with_bundle(
        name: impl Into<String>,
        price: Money,
        bundle_quantity: i64,
        bundle_price: Money,
    ) -> CoreResult<Self> {
        let bundle = BundleDiscount::new(bundle_quantity, bundle_price)?;
        Self::build(name.into(), price, Some(bundle))
    }

    fn build(name: String, price: Money, bundle: Option<BundleDiscount>) -> CoreResult<Self> {
        validate_product_name(&name)?;
        validate_unit_price(price)?;

        Ok(Product {
            // Identity is the trimmed name; lookups are exact matches.
            name: name.trim().to_string(),
            price,
            bundle,
        })
    }

    /// The product's name (identity within a catalog).
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price.
    #[inline]
    pub const fn price(&self) -> Money {
        self.price
    }

    /// The bundle discount rule, if any.
    #[inline]
    pub const fn bundle(&self) -> Option<BundleDiscount> {
        self.bundle
    }

    /// Prices `quantity` units of this product.
    ///
    /// With an active bundle rule and `quantity` at or above the bundle
    /// threshold, every complete group of `bundle.quantity()` units is
    /// charged the flat bundle price and the leftover units are charged at
    /// the unit price. Otherwise the line is plain `price × quantity`.
    ///
    /// `quantity` of zero prices to zero; negative quantities are rejected
    /// (the basket admits only positive quantities, so a negative here means
    /// the caller bypassed admission).
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    /// use tally_core::product::Product;
    ///
    /// let a = Product::with_bundle("A", Money::from_cents(50), 3, Money::from_cents(130)).unwrap();
    /// assert_eq!(a.price_for(4).unwrap(), Money::from_cents(180));
    /// assert_eq!(a.price_for(3).unwrap(), Money::from_cents(130));
    /// assert_eq!(a.price_for(2).unwrap(), Money::from_cents(100));
    /// assert_eq!(a.price_for(0).unwrap(), Money::zero());
    /// ```
    pub fn price_for(&self, quantity: i64) -> CoreResult<Money> {
        if quantity < 0 {
            return Err(ValidationError::MustBeNonNegative {
                field: "quantity".to_string(),
            }
            .into());
        }

        match self.bundle {
            Some(bundle) if quantity >= bundle.quantity() => {
                let full_bundles = quantity / bundle.quantity();
                let remainder = quantity % bundle.quantity();

                let bundled = bundle
                    .price()
                    .checked_mul_quantity(full_bundles)
                    .ok_or_else(|| self.overflow(quantity))?;
                let rest = self
                    .price
                    .checked_mul_quantity(remainder)
                    .ok_or_else(|| self.overflow(quantity))?;

                bundled
                    .checked_add(rest)
                    .ok_or_else(|| self.overflow(quantity))
            }
            _ => self
                .price
                .checked_mul_quantity(quantity)
                .ok_or_else(|| self.overflow(quantity)),
        }
    }

    fn overflow(&self, quantity: i64) -> CoreError {
        CoreError::PricingOverflow {
            name: self.name.clone(),
            quantity,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn bundled_a() -> Product {
        Product::with_bundle("A", Money::from_cents(50), 3, Money::from_cents(130)).unwrap()
    }

    #[test]
    fn test_construction_rejects_bad_fields() {
        assert!(Product::new("", Money::from_cents(50)).is_err());
        assert!(Product::new("   ", Money::from_cents(50)).is_err());
        assert!(Product::new("A", Money::from_cents(-50)).is_err());

        assert!(Product::with_bundle("A", Money::from_cents(50), 3, Money::from_cents(-1)).is_err());
        assert!(Product::with_bundle("A", Money::from_cents(50), 0, Money::from_cents(130)).is_err());
        assert!(
            Product::with_bundle("A", Money::from_cents(50), -3, Money::from_cents(130)).is_err()
        );
    }

    #[test]
    fn test_construction_trims_name() {
        let product = Product::new("  A  ", Money::from_cents(50)).unwrap();
        assert_eq!(product.name(), "A");
    }

    #[test]
    fn test_zero_price_is_allowed() {
        // Free items price every quantity to zero
        let free = Product::new("Sample", Money::zero()).unwrap();
        assert_eq!(free.price_for(7).unwrap(), Money::zero());
    }

    #[test]
    fn test_price_for_with_bundle() {
        let a = bundled_a();

        // One full bundle plus one unit at the regular price
        assert_eq!(a.price_for(4).unwrap(), Money::from_cents(180));
        // Exactly one bundle
        assert_eq!(a.price_for(3).unwrap(), Money::from_cents(130));
        // Below the threshold: no discount
        assert_eq!(a.price_for(2).unwrap(), Money::from_cents(100));
        // Two bundles, no remainder
        assert_eq!(a.price_for(6).unwrap(), Money::from_cents(260));
        // Zero units
        assert_eq!(a.price_for(0).unwrap(), Money::zero());
    }

    #[test]
    fn test_price_for_without_bundle() {
        let c = Product::new("C", Money::from_cents(20)).unwrap();

        for quantity in 0..=10 {
            assert_eq!(
                c.price_for(quantity).unwrap(),
                Money::from_cents(20 * quantity)
            );
        }
    }

    #[test]
    fn test_price_for_rejects_negative_quantity() {
        let a = bundled_a();
        assert!(matches!(
            a.price_for(-1),
            Err(CoreError::Validation(ValidationError::MustBeNonNegative { .. }))
        ));
    }

    #[test]
    fn test_price_for_reports_overflow() {
        let pricey = Product::new("Yacht", Money::from_cents(i64::MAX)).unwrap();

        assert_eq!(
            pricey.price_for(1).unwrap(),
            Money::from_cents(i64::MAX)
        );
        assert!(matches!(
            pricey.price_for(2),
            Err(CoreError::PricingOverflow { quantity: 2, .. })
        ));
    }
}
