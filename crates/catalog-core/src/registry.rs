//! # Catalog Registry
//!
//! Process-wide category and product counters.
//!
//! ## Counting Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    What Moves the Counters                              │
//! │                                                                         │
//! │  Category::new(name, desc, vec![a, b])                                 │
//! │      category_count += 1                                               │
//! │      product_count  += 2                                               │
//! │                                                                         │
//! │  category.add_product(c)          (only when accepted)                 │
//! │      product_count  += 1                                               │
//! │                                                                         │
//! │  Dropping a category or product   → nothing                            │
//! │  category.set_products(...)       → nothing                            │
//! │                                                                         │
//! │  Counters only grow. They record how many were ever created,           │
//! │  not how many are alive.                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle
//! The global registry starts at zero when the process starts. [`CatalogRegistry::reset`]
//! exists for test isolation; nothing in the library calls it.
//!
//! Tests that assert exact counts should build their own registry with
//! [`CatalogRegistry::new`] and pass it to `Category::with_registry`, since the
//! test harness runs tests on several threads against the same global.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

/// Monotonic category/product counters.
#[derive(Debug, Default)]
pub struct CatalogRegistry {
    category_count: AtomicUsize,
    product_count: AtomicUsize,
}

impl CatalogRegistry {
    /// Creates a registry with both counters at zero.
    pub const fn new() -> Self {
        CatalogRegistry {
            category_count: AtomicUsize::new(0),
            product_count: AtomicUsize::new(0),
        }
    }

    /// Total categories ever constructed against this registry.
    pub fn category_count(&self) -> usize {
        self.category_count.load(Ordering::SeqCst)
    }

    /// Total products ever placed into categories of this registry.
    pub fn product_count(&self) -> usize {
        self.product_count.load(Ordering::SeqCst)
    }

    /// Records one new category holding `initial_products` products.
    pub fn record_category(&self, initial_products: usize) {
        self.category_count.fetch_add(1, Ordering::SeqCst);
        self.product_count
            .fetch_add(initial_products, Ordering::SeqCst);
    }

    /// Records one product added to an existing category.
    pub fn record_product(&self) {
        self.product_count.fetch_add(1, Ordering::SeqCst);
    }

    /// Sets both counters back to zero.
    pub fn reset(&self) {
        self.category_count.store(0, Ordering::SeqCst);
        self.product_count.store(0, Ordering::SeqCst);
    }
}

/// Returns the process-wide registry used by `Category::new`.
pub fn global() -> Arc<CatalogRegistry> {
    static GLOBAL: OnceLock<Arc<CatalogRegistry>> = OnceLock::new();
    Arc::clone(GLOBAL.get_or_init(|| Arc::new(CatalogRegistry::new())))
}

// =============================================================================
// Unit Tests
// =============================================================================
