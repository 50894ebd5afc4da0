//! # Validation Module
//!
//! Input validation for product construction and price updates.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Where Validation Runs                              │
//! │                                                                         │
//! │  Product::new(...)                                                     │
//! │  ├── validate_price         → CoreError::InvalidPrice (hard)           │
//! │  └── validate_quantity      → CoreError::InvalidQuantity (hard)        │
//! │                                                                         │
//! │  product.set_price(value)                                              │
//! │  └── validate_price         → logged, old price kept (soft)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use catalog_core::validation::{validate_price, validate_quantity};
//!
//! assert!(validate_price(180000.0).is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price.
///
/// ## Rules
/// - Must be a finite number
/// - Must be strictly greater than zero
///
/// `NaN` fails the `> 0` comparison and is rejected with the rest.
pub fn validate_price(value: f64) -> CoreResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CoreError::InvalidPrice { value });
    }

    Ok(())
}

/// Validates a stock quantity.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_quantity(quantity: i64) -> CoreResult<()> {
    if quantity <= 0 {
        return Err(CoreError::InvalidQuantity { quantity });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
