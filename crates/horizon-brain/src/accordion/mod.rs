//! Headless accordion.
//!
//! An accordion is a vertically (or horizontally) stacked set of items, each
//! with a trigger that expands or collapses the item's content. This module
//! owns the accordion's behavior and none of its drawing:
//!
//! - [`ExpansionController`] tracks which items are open and enforces the
//!   single/multiple [`ExpansionMode`].
//! - [`FocusNavigator`] implements roving focus across the triggers: arrow
//!   keys, Home/End and PageUp/PageDown move an "active" pointer that wraps
//!   at both ends.
//! - [`Accordion`] is the container that owns one of each, plus the
//!   container-level keyboard handling and focus-within tracking.
//! - [`AccordionItem`] and [`AccordionTrigger`] are the per-item bindings a
//!   rendering layer creates for each child.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use horizon_brain::accordion::{
//!     Accordion, AccordionConfig, AccordionItem, AccordionTrigger, ExpansionMode, ItemState,
//! };
//! use horizon_brain::events::{ClickEvent, InputEvent, Key, KeyPressEvent, KeyboardModifiers};
//!
//! let accordion = Arc::new(Accordion::with_config(
//!     AccordionConfig::new().with_mode(ExpansionMode::Multiple),
//! ));
//!
//! let item = AccordionItem::new(&accordion);
//! let trigger = AccordionTrigger::new(&accordion, &item, |_reason| {
//!     // move real keyboard focus to the rendered trigger here
//! })?;
//!
//! // A click on the trigger toggles its item.
//! let mut click = InputEvent::Click(ClickEvent::primary());
//! trigger.event(&mut click);
//! assert_eq!(item.state(), ItemState::Open);
//! assert!(click.is_default_prevented());
//!
//! // Arrow keys on the container move the roving focus.
//! let mut down = InputEvent::KeyPress(KeyPressEvent::new(Key::ArrowDown, KeyboardModifiers::NONE));
//! assert!(accordion.event(&mut down));
//! assert!(trigger.is_active());
//! # Ok::<(), horizon_brain::AccordionError>(())
//! ```

mod container;
mod context;
mod expansion;
mod item;
mod navigator;
mod trigger;

pub use container::Accordion;
pub use context::AncestorContext;
pub use expansion::{ExpansionController, ItemId};
pub use item::AccordionItem;
pub use navigator::{should_prevent_default, FocusNavigator, NavigationCommand, TriggerId};
pub use trigger::{AccordionTrigger, AriaAttributes};

use std::fmt;

/// Whether one or many items may be open at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExpansionMode {
    /// Opening an item closes whichever item was open.
    #[default]
    Single,
    /// Items open and close independently.
    Multiple,
}

/// The axis along which triggers are laid out.
///
/// Orientation decides which arrow keys move the roving focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Triggers sit side by side; Left/Right navigate.
    Horizontal,
    /// Triggers are stacked; Up/Down navigate.
    #[default]
    Vertical,
}

impl Orientation {
    /// The value rendered into a `data-orientation` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Writing direction, used to mirror Left/Right in horizontal accordions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextDirection {
    /// Left-to-right: Right moves forward.
    #[default]
    Ltr,
    /// Right-to-left: Left moves forward.
    Rtl,
}

/// Open/closed state of an item, or of the accordion as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemState {
    /// Expanded.
    Open,
    /// Collapsed.
    Closed,
}

impl ItemState {
    /// Map an "is open" flag to a state.
    pub fn from_open(open: bool) -> Self {
        if open { ItemState::Open } else { ItemState::Closed }
    }

    /// Check if this is [`ItemState::Open`].
    pub fn is_open(&self) -> bool {
        matches!(self, ItemState::Open)
    }

    /// The value rendered into a `data-state` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemState::Open => "open",
            ItemState::Closed => "closed",
        }
    }
}

impl fmt::Display for ItemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Construction-time configuration for an [`Accordion`].
///
/// Every field can also be changed later through the accordion's setters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccordionConfig {
    /// Single or multiple expansion. Defaults to single.
    pub mode: ExpansionMode,
    /// Trigger layout axis. Defaults to vertical.
    pub orientation: Orientation,
    /// Writing direction; `None` navigates as left-to-right.
    pub direction: Option<TextDirection>,
}

impl AccordionConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the expansion mode using builder pattern.
    pub fn with_mode(mut self, mode: ExpansionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the orientation using builder pattern.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set the writing direction using builder pattern.
    pub fn with_direction(mut self, direction: Option<TextDirection>) -> Self {
        self.direction = direction;
        self
    }
}
