//! # Catalog Seed
//!
//! Builds the catalog at the composition root.
//!
//! The core treats the catalog as an externally supplied seed: there is no
//! global registry, just a `Catalog` value handed to whoever needs it. Two
//! seed sources exist:
//!
//! - [`reference_catalog`] - the built-in four-product set used by the
//!   reference scenario
//! - [`load_catalog`] - a JSON seed file of the form:
//!
//! ```json
//! [
//!   { "name": "A", "price_cents": 50, "bundle": { "quantity": 3, "price_cents": 130 } },
//!   { "name": "C", "price_cents": 20 }
//! ]
//! ```
//!
//! Seed entries are plain DTOs; every one is re-validated through the core
//! constructors, so a seed file can never smuggle in a product the engine
//! would have rejected.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use tally_core::{Catalog, CoreError, CoreResult, Money, Product};

/// The reference basket: {A:3, B:5, C:1, D:1}, totalling $2.85 against
/// [`reference_catalog`].
pub const REFERENCE_BASKET: [(&str, i64); 4] = [("A", 3), ("B", 5), ("C", 1), ("D", 1)];

// =============================================================================
// Seed Errors
// =============================================================================

/// Errors raised while loading a catalog seed.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The seed file could not be read.
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    /// The seed file is not valid JSON (or misses required fields).
    #[error("Seed file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A seed entry failed core validation (bad name, price, or bundle).
    #[error(transparent)]
    Invalid(#[from] CoreError),
}

// =============================================================================
// Seed DTOs
// =============================================================================

/// One product entry in a JSON seed file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedProduct {
    pub name: String,
    pub price_cents: i64,
    #[serde(default)]
    pub bundle: Option<SeedBundle>,
}

/// The bundle half of a seed entry. Both fields are required: a seed file
/// cannot express a dangling bundle price or quantity.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedBundle {
    pub quantity: i64,
    pub price_cents: i64,
}

impl SeedProduct {
    /// Converts the DTO through the validated core constructors.
    fn into_product(self) -> CoreResult<Product> {
        let price = Money::from_cents(self.price_cents);

        match self.bundle {
            Some(bundle) => Product::with_bundle(
                self.name,
                price,
                bundle.quantity,
                Money::from_cents(bundle.price_cents),
            ),
            None => Product::new(self.name, price),
        }
    }
}

// =============================================================================
// Seed Sources
// =============================================================================

/// The fixed reference catalog:
/// A at 50¢ (3 for $1.30), B at 30¢ (2 for 45¢), C at 20¢, D at 15¢.
pub fn reference_catalog() -> CoreResult<Catalog> {
    Catalog::new([
        Product::with_bundle("A", Money::from_cents(50), 3, Money::from_cents(130))?,
        Product::with_bundle("B", Money::from_cents(30), 2, Money::from_cents(45))?,
        Product::new("C", Money::from_cents(20))?,
        Product::new("D", Money::from_cents(15))?,
    ])
}

/// Loads and validates a JSON seed file.
pub fn load_catalog(path: &Path) -> Result<Catalog, SeedError> {
    let text = fs::read_to_string(path)?;
    parse_catalog(&text)
}

/// Parses and validates seed JSON.
pub fn parse_catalog(text: &str) -> Result<Catalog, SeedError> {
    let entries: Vec<SeedProduct> = serde_json::from_str(text)?;
    let products = entries
        .into_iter()
        .map(SeedProduct::into_product)
        .collect::<CoreResult<Vec<_>>>()?;

    Ok(Catalog::new(products)?)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::Checkout;

    /// The end-to-end reference scenario: catalog {A, B, C, D}, basket
    /// {A:3, B:5, C:1, D:1}. A prices as one bundle (130), B as two bundles
    /// plus one unit (45 + 45 + 30), C and D at unit price.
    #[test]
    fn test_reference_scenario_totals_285() {
        let catalog = reference_catalog().unwrap();
        let mut checkout = Checkout::new();

        for (name, quantity) in REFERENCE_BASKET {
            checkout.add(catalog.lookup(name).unwrap(), quantity).unwrap();
        }

        let totals = checkout.calculate_total();

        assert!(totals.failed.is_empty());
        assert_eq!(totals.total, Money::from_cents(285));
        assert_eq!(totals.total_quantity, 10);

        let per_line: Vec<(&str, i64)> = totals
            .lines
            .iter()
            .map(|line| (line.name.as_str(), line.total.cents()))
            .collect();
        assert_eq!(
            per_line,
            vec![("A", 130), ("B", 120), ("C", 20), ("D", 15)]
        );
    }

    #[test]
    fn test_parse_catalog() {
        let catalog = parse_catalog(
            r#"[
                { "name": "A", "price_cents": 50, "bundle": { "quantity": 3, "price_cents": 130 } },
                { "name": "C", "price_cents": 20 }
            ]"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        let a = catalog.lookup("A").unwrap();
        assert_eq!(a.price_for(4).unwrap(), Money::from_cents(180));
        assert!(catalog.lookup("C").unwrap().bundle().is_none());
    }

    #[test]
    fn test_parse_catalog_rejects_invalid_entries() {
        // Negative price: valid JSON, rejected by the core constructor
        let result = parse_catalog(r#"[{ "name": "A", "price_cents": -50 }]"#);
        assert!(matches!(result, Err(SeedError::Invalid(_))));

        // A bundle must carry both fields
        let result = parse_catalog(
            r#"[{ "name": "A", "price_cents": 50, "bundle": { "quantity": 3 } }]"#,
        );
        assert!(matches!(result, Err(SeedError::Parse(_))));

        // Not JSON at all
        let result = parse_catalog("price A 50");
        assert!(matches!(result, Err(SeedError::Parse(_))));
    }

    #[test]
    fn test_parse_catalog_rejects_duplicates() {
        let result = parse_catalog(
            r#"[
                { "name": "A", "price_cents": 50 },
                { "name": "A", "price_cents": 60 }
            ]"#,
        );
        assert!(matches!(result, Err(SeedError::Invalid(_))));
    }
}
