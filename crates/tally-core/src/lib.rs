//! # tally-core: Pure Pricing Logic for Tally POS
//!
//! This crate is the **heart** of Tally POS. It contains the whole pricing
//! engine as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/till (driver)                           │   │
//! │  │   seed catalog ──► build basket ──► print receipt               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  product  │  │   money   │  │ checkout  │  │  catalog  │  │   │
//! │  │   │  Product  │  │   Money   │  │ Checkout  │  │  Catalog  │  │   │
//! │  │   │  Bundle   │  │           │  │  Totals   │  │  lookup   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`product`] - Products and their optional bundle discount rule
//! - [`catalog`] - The read-only product registry
//! - [`checkout`] - The basket and its totals
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Construction and admission-time validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics;
//!    pricing a basket never aborts on a single bad line
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::{Catalog, Checkout, Money, Product};
//!
//! # fn main() -> Result<(), tally_core::CoreError> {
//! // 50¢ each, or 3 for $1.30
//! let catalog = Catalog::new([
//!     Product::with_bundle("A", Money::from_cents(50), 3, Money::from_cents(130))?,
//!     Product::new("C", Money::from_cents(20))?,
//! ])?;
//!
//! let mut checkout = Checkout::new();
//! checkout.add(catalog.lookup("A")?, 4)?;
//! checkout.add(catalog.lookup("C")?, 1)?;
//!
//! let totals = checkout.calculate_total();
//! // One bundle (130) + one unit (50) + C (20)
//! assert_eq!(totals.total, Money::from_cents(200));
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod checkout;
pub mod error;
pub mod money;
pub mod product;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use tally_core::Money` instead of
// `use tally_core::money::Money`

pub use catalog::Catalog;
pub use checkout::{BasketTotals, Checkout, LineFailure, LineTotal};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use product::{BundleDiscount, Product};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single basket
///
/// ## Business Reason
/// Prevents runaway baskets and keeps one checkout a bounded computation.
pub const MAX_BASKET_LINES: usize = 100;

/// Maximum accumulated quantity of a single line
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;
