//! # Price Module
//!
//! Provides the `Price` type used by every product.
//!
//! ## Why a Newtype?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  A bare f64 can be 0, negative, NaN or infinite.                        │
//! │                                                                         │
//! │  Price can only be built through Price::new, which rejects all of       │
//! │  those. Holding a Price means holding a value > 0.                      │
//! │                                                                         │
//! │  Display keeps one decimal for whole numbers:                           │
//! │    180000.0  → "180000.0"                                               │
//! │    99.5      → "99.5"                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use catalog_core::price::Price;
//!
//! let price = Price::new(180000.0).unwrap();
//! assert_eq!(price.to_string(), "180000.0");
//! assert_eq!(price * 5, 900000.0);
//! assert!(Price::new(0.0).is_err());
//! ```

use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::Mul;

use crate::error::CoreResult;
use crate::validation::validate_price;

/// Whole numbers at or above this magnitude are printed without the `.0`
/// suffix so huge values do not turn into a wall of zeros.
const WHOLE_NUMBER_LIMIT: f64 = 1e16;

// =============================================================================
// Price Type
// =============================================================================

/// A strictly positive, finite unit price in roubles.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Price(f64);

impl Price {
    /// Creates a price, rejecting anything that is not a finite value > 0.
    pub fn new(value: f64) -> CoreResult<Self> {
        validate_price(value)?;
        Ok(Price(value))
    }

    /// Returns the raw value.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.0
    }
}

/// Formats a price the way catalog strings show it.
///
/// ## Example
/// ```rust
/// use catalog_core::price::format_price;
///
/// assert_eq!(format_price(31000.0), "31000.0");
/// assert_eq!(format_price(140333.33333333334), "140333.33333333334");
/// ```
pub fn format_price(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < WHOLE_NUMBER_LIMIT {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_price(self.0))
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

/// Price × quantity gives the stock value.
impl Mul<i64> for Price {
    type Output = f64;

    #[inline]
    fn mul(self, qty: i64) -> f64 {
        self.0 * qty as f64
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
