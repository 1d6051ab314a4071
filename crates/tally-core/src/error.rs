//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── CoreError        - Lookup, basket and pricing failures            │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  till app errors (apps/till)                                           │
//! │  └── SeedError        - Seed file loading failures                     │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → till (logged, never fatal to a   │
//! │  basket: a failed line contributes zero and the total still prints)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, quantity, etc.)
//! 3. Errors are enum variants, never String
//! 4. The core never prints and never panics; callers decide presentation

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core pricing and basket errors.
///
/// Construction errors are the only ones that abort an operation outright
/// (the value is simply never created). Pricing errors surface per line and
/// degrade to a zero contribution inside [`crate::Checkout::calculate_total`].
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found in the catalog.
    ///
    /// ## When This Occurs
    /// - The requested name was never seeded into the catalog
    /// - A seed file omitted a product the basket refers to
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Basket has exceeded the maximum number of distinct lines.
    #[error("Basket cannot have more than {max} distinct products")]
    BasketTooLarge { max: usize },

    /// Accumulated line quantity exceeds the maximum allowed.
    ///
    /// `requested` is the quantity the line would have held after the add.
    #[error("Quantity {requested} for '{name}' exceeds maximum allowed ({max})")]
    QuantityTooLarge {
        name: String,
        requested: i64,
        max: i64,
    },

    /// A line price could not be represented.
    ///
    /// ## When This Occurs
    /// - `unit price × quantity` (or the bundle arithmetic) overflows i64
    /// - The running basket total overflows while summing lines
    ///
    /// The aggregation path treats this as a zero contribution for the
    /// affected line and keeps totalling the rest of the basket.
    #[error("Price for '{name}' x {quantity} overflows the representable range")]
    PricingOverflow { name: String, quantity: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before pricing logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Duplicate value (e.g., duplicate product name in a catalog).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
