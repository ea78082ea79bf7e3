//! Prelude module for Horizon Brain.
//!
//! ```ignore
//! use horizon_brain::prelude::*;
//! ```
//!
//! This provides access to:
//! - Signal/slot system (`Signal`, `Property`)
//! - Accordion bindings (`Accordion`, `AccordionItem`, `AccordionTrigger`)
//! - Input events (`InputEvent`, `Key`, `KeyboardModifiers`)

// ============================================================================
// Signal/Slot and Property System
// ============================================================================

pub use horizon_brain_core::{ConnectionId, Property, Signal};

// ============================================================================
// Accordion
// ============================================================================

pub use crate::accordion::{
    Accordion, AccordionConfig, AccordionItem, AccordionTrigger, AncestorContext, ExpansionMode,
    ItemId, ItemState, NavigationCommand, Orientation, TextDirection,
};

// ============================================================================
// Events
// ============================================================================

pub use crate::events::{
    ClickEvent, EventTarget, FocusInEvent, FocusOutEvent, FocusReason, InputEvent, Key,
    KeyPressEvent, KeyReleaseEvent, KeyboardModifiers, MouseButton,
};
pub use crate::keyboard::KeyboardInputHandler;

// ============================================================================
// Errors
// ============================================================================

pub use crate::error::AccordionError;
