//! Property system for Horizon Brain.
//!
//! A [`Property<T>`] wraps a value and reports whether a write actually
//! changed it. Components pair a property with a [`Signal`](crate::Signal)
//! and emit only when `set` returns `true`, so observers never see a
//! notification for a value that stayed the same.
//!
//! # Example
//!
//! ```
//! use horizon_brain_core::Property;
//!
//! let expanded = Property::new(false);
//! assert!(expanded.set(true));
//! assert!(!expanded.set(true));
//! ```

use std::fmt;

use parking_lot::RwLock;

use crate::logging::targets;

/// A value with change detection.
///
/// When `set()` is called, the new value is compared with the current one
/// and the return value says whether it changed.
///
/// # Thread Safety
///
/// `Property<T>` uses interior mutability with `RwLock` and is `Send + Sync`
/// whenever `T` is.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Get a clone of the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Set the value, returning `true` if the value changed.
    ///
    /// The caller should emit the associated notification signal when this
    /// returns `true`.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current != value {
            *current = value;
            tracing::trace!(target: targets::PROPERTY, "property changed");
            true
        } else {
            false
        }
    }
}

impl<T: Clone> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .finish()
    }
}

static_assertions::assert_impl_all!(Property<bool>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_property_basic() {
        let prop = Property::new(42);
        assert_eq!(prop.get(), 42);
    }

    #[test]
    fn test_property_set_detects_change() {
        let prop = Property::new(false);

        // Same value - no change
        assert!(!prop.set(false));
        assert!(!prop.get());

        // Different value - changed
        assert!(prop.set(true));
        assert!(prop.get());
    }

    #[test]
    fn test_property_shared_between_threads() {
        let prop = Arc::new(Property::new(0));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let prop = prop.clone();
                std::thread::spawn(move || {
                    for i in 0..50 {
                        prop.set(i);
                        let _ = prop.get();
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(prop.get(), 49);
    }

    #[test]
    fn test_property_default() {
        let prop: Property<bool> = Property::default();
        assert!(!prop.get());
    }
}
