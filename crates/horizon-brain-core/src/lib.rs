//! Core primitives for Horizon Brain.
//!
//! Horizon Brain components are headless: they own state and behavior, and
//! leave drawing to whatever rendering layer hosts them. This crate provides
//! the reactive plumbing those components share:
//!
//! - **Signal/Slot System**: Synchronous, type-safe change notification
//! - **Property System**: Values with change detection
//! - **Logging**: `tracing` target names for log filtering
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_brain_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//!
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Property Example
//!
//! ```
//! use horizon_brain_core::{Property, Signal};
//!
//! struct Counter {
//!     value: Property<i32>,
//!     value_changed: Signal<i32>,
//! }
//!
//! impl Counter {
//!     fn increment(&self) {
//!         let new_value = self.value.get() + 1;
//!         if self.value.set(new_value) {
//!             self.value_changed.emit(new_value);
//!         }
//!     }
//! }
//!
//! let counter = Counter { value: Property::new(0), value_changed: Signal::new() };
//! counter.increment();
//! assert_eq!(counter.value.get(), 1);
//! ```

pub mod logging;
pub mod property;
pub mod signal;

pub use property::Property;
pub use signal::{ConnectionId, Signal};
