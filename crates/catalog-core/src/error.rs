//! # Error Types
//!
//! Domain-specific error types for catalog-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  catalog-core errors (this file)                                       │
//! │  └── CoreError        - Domain rule violations                         │
//! │                                                                         │
//! │  config errors (config.rs)                                             │
//! │  └── ConfigError      - Bad environment values                         │
//! │                                                                         │
//! │  Flow: validation → CoreError → caller                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two Policies
//! Price and quantity are guarded differently, on purpose:
//! - A bad price at **construction** is a hard [`CoreError::InvalidPrice`].
//!   A bad price passed to the **setter** is logged and ignored.
//! - A bad quantity is always a hard [`CoreError::InvalidQuantity`].

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core catalog errors.
///
/// These errors represent business rule violations. They are surfaced to the
/// caller, which must handle them explicitly.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Price is zero, negative or not a finite number.
    ///
    /// ## When This Occurs
    /// - Constructing a product with `price <= 0`, `NaN` or an infinite price
    ///
    /// The price setter never returns this; it logs and keeps the old value.
    #[error("Invalid price {value}: price must be a finite number greater than zero")]
    InvalidPrice { value: f64 },

    /// Quantity is zero or negative.
    ///
    /// ## When This Occurs
    /// - Constructing a product with `quantity <= 0`
    #[error("Invalid quantity {quantity}: a product with zero quantity cannot be added")]
    InvalidQuantity { quantity: i64 },

    /// Something that is not a product was handed to a category.
    ///
    /// ## When This Occurs
    /// - `Category::add_product` with a non-product value
    /// - `Category::set_products` with a list holding a non-product
    ///
    /// The category is left unchanged.
    #[error("Only products (Product, Smartphone, LawnGrass) can be added, got {found}")]
    InvalidProductType { found: String },

    /// Two values cannot be combined.
    ///
    /// ## When This Occurs
    /// - Combining a `Smartphone` with a `LawnGrass` in exact mode
    /// - Combining a category with something that is not a category
    #[error("Cannot combine {left} with {right}: instances of different classes")]
    IncompatibleType { left: String, right: String },

    /// The named-field factory got the wrong set of fields.
    #[error("Invalid fields for {kind}: {reason}")]
    InvalidFields { kind: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
