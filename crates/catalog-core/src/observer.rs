//! # Construction Observer
//!
//! Optional hook called after every successful product construction.
//!
//! ```text
//! Product::new(...) ── ok ──► notify(kind, debug_repr)
//!                                 │
//!                                 ├── tracing::trace!  (always)
//!                                 └── observer.on_construct  (if installed)
//! ```
//!
//! The hook is side-effect only. A product behaves the same whether or not an
//! observer is installed.

use std::sync::{Arc, RwLock};

use tracing::trace;

use crate::product::ProductKind;

/// Receives a trace of every constructed product.
pub trait ConstructionObserver: Send + Sync {
    /// Called once per constructed product with its `debug_repr()`.
    fn on_construct(&self, kind: ProductKind, repr: &str);
}

impl<F> ConstructionObserver for F
where
    F: Fn(ProductKind, &str) + Send + Sync,
{
    fn on_construct(&self, kind: ProductKind, repr: &str) {
        self(kind, repr)
    }
}

static OBSERVER: RwLock<Option<Arc<dyn ConstructionObserver>>> = RwLock::new(None);

/// Installs `observer`, replacing any previous one.
pub fn set_observer(observer: Arc<dyn ConstructionObserver>) {
    if let Ok(mut slot) = OBSERVER.write() {
        *slot = Some(observer);
    }
}

/// Removes the installed observer, if any.
pub fn clear_observer() {
    if let Ok(mut slot) = OBSERVER.write() {
        *slot = None;
    }
}

pub(crate) fn notify(kind: ProductKind, repr: &str) {
    trace!(kind = %kind, repr = %repr, "Constructed product");

    // Clone out of the lock so the observer may install/clear observers itself.
    let observer = OBSERVER.read().ok().and_then(|slot| slot.clone());
    if let Some(observer) = observer {
        observer.on_construct(kind, repr);
    }
}
