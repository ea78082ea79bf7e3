//! Horizon Brain - headless, accessible UI primitives for Horizon Lattice.
//!
//! Components in this crate own state, keyboard behavior and accessibility
//! attributes, and leave drawing to the host. The host feeds them
//! [`events::InputEvent`]s (translated from winit with
//! [`keyboard::KeyboardInputHandler`]) and renders from their state.
//!
//! # Components
//!
//! - [`accordion`]: stacked, expandable sections with roving keyboard focus
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_brain::prelude::*;
//!
//! let accordion = Arc::new(Accordion::new());
//! let item = AccordionItem::with_initially_open(&accordion, true);
//! let trigger = AccordionTrigger::new(&accordion, &item, |_| {})?;
//!
//! assert!(trigger.aria().expanded);
//! assert_eq!(accordion.state(), ItemState::Open);
//! # Ok::<(), AccordionError>(())
//! ```

pub mod accordion;
pub mod error;
pub mod events;
pub mod keyboard;
pub mod logging;
pub mod prelude;

pub use error::{AccordionError, Result};
pub use horizon_brain_core::{ConnectionId, Property, Signal};
