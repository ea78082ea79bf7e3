//! The accordion container.

use std::fmt;

use horizon_brain_core::{Property, Signal};

use super::{
    should_prevent_default, AccordionConfig, AccordionTrigger, ExpansionController, ExpansionMode,
    FocusNavigator, ItemId, ItemState, Orientation, TextDirection,
};
use crate::error::Result;
use crate::events::{EventTarget, InputEvent, KeyPressEvent};
use crate::logging::targets;

/// A headless accordion.
///
/// `Accordion` owns the open-set bookkeeping ([`ExpansionController`]) and the
/// roving focus across triggers ([`FocusNavigator`]). Items and triggers hold
/// an `Arc<Accordion>` and forward to it, so the container is normally
/// created once and wrapped in an `Arc`:
///
/// ```
/// use std::sync::Arc;
/// use horizon_brain::accordion::{Accordion, AccordionItem, ItemState};
///
/// let accordion = Arc::new(Accordion::new());
/// let first = AccordionItem::new(&accordion);
/// let second = AccordionItem::new(&accordion);
///
/// accordion.open_item(first.id());
/// accordion.open_item(second.id());
/// assert_eq!(first.state(), ItemState::Closed);
/// assert_eq!(accordion.state(), ItemState::Open);
/// ```
///
/// # Keyboard Handling
///
/// Key presses delivered through [`event`](Self::event) are forwarded to the
/// navigator. Presses that originate in a text entry are left alone. While
/// the accordion has focus within, the default action of its navigation
/// keys (and Space/Enter) is suppressed; NumpadEnter is never suppressed.
///
/// # Signals
///
/// - `focus_within_changed(bool)`: Emitted when focus enters or leaves the
///   accordion's subtree
///
/// The expansion and navigation signals live on [`expansion`](Self::expansion)
/// and [`navigator`](Self::navigator).
pub struct Accordion {
    expansion: ExpansionController,
    navigator: FocusNavigator,
    focus_within: Property<bool>,
    direction: Property<Option<TextDirection>>,

    /// Signal emitted when focus-within changes.
    pub focus_within_changed: Signal<bool>,
}

impl Accordion {
    /// Create an accordion with the default configuration.
    pub fn new() -> Self {
        Self::with_config(AccordionConfig::default())
    }

    /// Create an accordion with the given configuration.
    pub fn with_config(config: AccordionConfig) -> Self {
        tracing::debug!(
            target: targets::ACCORDION,
            mode = ?config.mode,
            orientation = %config.orientation,
            "accordion created"
        );
        Self {
            expansion: ExpansionController::new(config.mode),
            navigator: FocusNavigator::new(
                config.orientation,
                config.direction.unwrap_or_default(),
            ),
            focus_within: Property::new(false),
            direction: Property::new(config.direction),
            focus_within_changed: Signal::new(),
        }
    }

    /// The current configuration.
    pub fn config(&self) -> AccordionConfig {
        AccordionConfig {
            mode: self.mode(),
            orientation: self.orientation(),
            direction: self.direction(),
        }
    }

    /// The open-set bookkeeping.
    pub fn expansion(&self) -> &ExpansionController {
        &self.expansion
    }

    /// The roving focus manager.
    pub fn navigator(&self) -> &FocusNavigator {
        &self.navigator
    }

    // =========================================================================
    // Expansion
    // =========================================================================

    /// Get the expansion mode.
    pub fn mode(&self) -> ExpansionMode {
        self.expansion.mode()
    }

    /// Set the expansion mode. See [`ExpansionController::set_mode`].
    pub fn set_mode(&self, mode: ExpansionMode) -> bool {
        self.expansion.set_mode(mode)
    }

    /// Open an item. Returns `true` if the open set changed.
    pub fn open_item(&self, id: ItemId) -> bool {
        self.expansion.open_item(id)
    }

    /// Close an item. Returns `true` if the open set changed.
    pub fn close_item(&self, id: ItemId) -> bool {
        self.expansion.close_item(id)
    }

    /// Toggle an item. Returns `true` if the open set changed.
    pub fn toggle_item(&self, id: ItemId) -> bool {
        self.expansion.toggle_item(id)
    }

    /// Check if an item is open.
    pub fn is_open(&self, id: ItemId) -> bool {
        self.expansion.is_open(id)
    }

    /// Open items, in the order they were opened.
    pub fn open_items(&self) -> Vec<ItemId> {
        self.expansion.open_items()
    }

    /// Aggregate state: open if at least one item is open.
    pub fn state(&self) -> ItemState {
        self.expansion.state()
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Get the orientation.
    pub fn orientation(&self) -> Orientation {
        self.navigator.orientation()
    }

    /// Set the orientation. Affects which arrow keys navigate.
    pub fn set_orientation(&self, orientation: Orientation) -> bool {
        self.navigator.set_orientation(orientation)
    }

    /// Get the writing direction, if one was set.
    pub fn direction(&self) -> Option<TextDirection> {
        self.direction.get()
    }

    /// Set the writing direction. `None` navigates as left-to-right.
    pub fn set_direction(&self, direction: Option<TextDirection>) -> bool {
        if !self.direction.set(direction) {
            return false;
        }
        self.navigator.set_direction(direction.unwrap_or_default());
        true
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Check if keyboard focus is on the accordion or one of its triggers.
    pub fn has_focus_within(&self) -> bool {
        self.focus_within.get()
    }

    /// Record whether focus is within the accordion.
    ///
    /// Hosts call this from their focus tracking; [`AccordionTrigger`]
    /// calls it on focus-in.
    pub fn set_focus_within(&self, focused: bool) {
        if self.focus_within.set(focused) {
            tracing::trace!(target: targets::ACCORDION, focused, "focus within changed");
            self.focus_within_changed.emit(focused);
        }
    }

    /// Make `trigger` the navigator's active trigger.
    pub fn set_active_item(&self, trigger: &AccordionTrigger) -> Result<()> {
        self.navigator.set_active(trigger.handle())
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Handle a key press delivered to the accordion's subtree.
    ///
    /// Returns `true` if the key moved the roving focus.
    pub fn handle_key_press(&self, event: &mut KeyPressEvent) -> bool {
        if event.target == EventTarget::TextEntry {
            return false;
        }

        let handled = self
            .navigator
            .handle_navigation_key(event.key, event.modifiers, None);
        if handled {
            event.base.accept();
        }

        if should_prevent_default(event.key, self.orientation(), self.has_focus_within()) {
            event.base.prevent_default();
        }
        handled
    }

    /// Handle an input event delivered to the accordion's subtree.
    ///
    /// Returns `true` if the event was handled.
    pub fn event(&self, event: &mut InputEvent) -> bool {
        match event {
            InputEvent::KeyPress(key_event) => self.handle_key_press(key_event),
            InputEvent::FocusIn(_) => {
                self.set_focus_within(true);
                false
            }
            InputEvent::FocusOut(_) => {
                self.set_focus_within(false);
                false
            }
            _ => false,
        }
    }
}

impl Default for Accordion {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Accordion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accordion")
            .field("config", &self.config())
            .field("open_items", &self.open_items())
            .field("focus_within", &self.has_focus_within())
            .finish()
    }
}

static_assertions::assert_impl_all!(Accordion: Send, Sync);
