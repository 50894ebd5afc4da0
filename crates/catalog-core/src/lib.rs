//! # catalog-core: Pure Catalog Logic
//!
//! Products, product variants and categories, with formatting, validation,
//! arithmetic aggregation and simple statistics. Zero I/O: the crate only
//! emits `tracing` events and leaves the subscriber to the binary.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Catalog Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  catalog-demo (apps/)                           │   │
//! │  │    init tracing ──► load config ──► build data ──► print        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ catalog-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  product  │  │ category  │  │ registry  │  │ validation│  │   │
//! │  │   │ Product   │  │ Category  │  │ counters  │  │   rules   │  │   │
//! │  │   │Smartphone │  │CatalogVal.│  │  reset    │  │  checks   │  │   │
//! │  │   │ LawnGrass │  │  summary  │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`product`] - `BaseProduct` contract, `Product`, `Smartphone`, `LawnGrass`
//! - [`category`] - `Category` and the `CatalogValue` input type
//! - [`registry`] - Process-wide category/product counters
//! - [`observer`] - Optional hook called after each product construction
//! - [`price`] - Validated `Price` type and price formatting
//! - [`validation`] - Input validation
//! - [`config`] - Behavior switches loaded from the environment
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use catalog_core::{BaseProduct, Category, Smartphone};
//!
//! let phone = Smartphone::new(
//!     "Xiaomi Redmi Note 11", "1024GB, Синий", 31000.0, 14,
//!     "Высокая", "Note 11", 1024, "Синий",
//! ).unwrap();
//!
//! let mut category = Category::new("Смартфоны", "Смартфоны", vec![]);
//! category.add_product(phone).unwrap();
//!
//! assert_eq!(category.to_string(), "Смартфоны, количество продуктов: 14 шт.");
//! assert_eq!(category.average_price(), 31000.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod category;
pub mod config;
pub mod error;
pub mod observer;
pub mod price;
pub mod product;
pub mod registry;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use catalog_core::Category` instead of
// `use catalog_core::category::Category`

pub use category::{CatalogValue, Category, CombineOperand, SummaryFormat};
pub use config::{CatalogConfig, ConfigError};
pub use error::{CoreError, CoreResult};
pub use observer::{clear_observer, set_observer, ConstructionObserver};
pub use price::Price;
pub use product::{
    AnyProduct, BaseProduct, CombineMode, FieldMap, LawnGrass, Product, ProductKind, Smartphone,
};
pub use registry::CatalogRegistry;
