//! Per-trigger binding.

use std::fmt;
use std::sync::Arc;

use super::{Accordion, AccordionItem, AncestorContext, ItemId, ItemState, TriggerId};
use crate::error::{AccordionError, Result};
use crate::events::{EventTarget, FocusReason, InputEvent, MouseButton};
use crate::logging::targets;

/// Accessibility attributes a renderer should put on a trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AriaAttributes {
    /// Element id of the trigger.
    pub id: String,
    /// ARIA role.
    pub role: &'static str,
    /// Heading level.
    pub level: u8,
    /// `aria-expanded`.
    pub expanded: bool,
    /// `aria-controls`: element id of the item's content.
    pub controls: String,
    /// `data-state`.
    pub data_state: ItemState,
}

/// The trigger of one [`AccordionItem`].
///
/// Creating a trigger registers it with the accordion's
/// [`FocusNavigator`](super::FocusNavigator); dropping it deregisters it.
/// The focus callback passed at construction is how navigation moves real
/// keyboard focus; it is invoked with [`FocusReason::Navigation`] when arrow
/// keys make this trigger active.
///
/// # Events
///
/// [`event`](Self::event) handles:
///
/// - Focus in: records focus within the accordion and makes this trigger
///   active. The trigger already holds focus, so no focus request is made.
/// - Primary click: toggles the item.
/// - Space, Enter or NumpadEnter released without modifiers: toggles the
///   item, unless the release came from a text entry.
///
/// Toggling events have their default action prevented.
pub struct AccordionTrigger {
    handle: TriggerId,
    accordion: Arc<Accordion>,
    item: Arc<AccordionItem>,
}

impl AccordionTrigger {
    /// Create a trigger for `item`.
    ///
    /// Fails with [`AccordionError::ForeignItem`] if `item` belongs to a
    /// different accordion.
    pub fn new<F>(accordion: &Arc<Accordion>, item: &Arc<AccordionItem>, focus: F) -> Result<Self>
    where
        F: Fn(FocusReason) + Send + Sync + 'static,
    {
        if !Arc::ptr_eq(accordion, item.accordion()) {
            return Err(AccordionError::ForeignItem);
        }
        let handle = accordion.navigator().register(focus);
        tracing::trace!(target: targets::ACCORDION, item = %item.id(), "trigger created");
        Ok(Self {
            handle,
            accordion: accordion.clone(),
            item: item.clone(),
        })
    }

    /// Create a trigger for the item found in `context`.
    ///
    /// Fails with [`MissingAncestor`](AccordionError::MissingAncestor) when
    /// the context lacks an accordion or an item.
    pub fn from_context<F>(context: &AncestorContext, focus: F) -> Result<Self>
    where
        F: Fn(FocusReason) + Send + Sync + 'static,
    {
        let accordion = context.require_accordion("AccordionTrigger")?;
        let item = context.require_item("AccordionTrigger")?;
        Self::new(accordion, item, focus)
    }

    /// The navigator handle.
    pub fn handle(&self) -> TriggerId {
        self.handle
    }

    /// The item this trigger toggles.
    pub fn item(&self) -> &Arc<AccordionItem> {
        &self.item
    }

    /// Id of the item this trigger toggles.
    pub fn item_id(&self) -> ItemId {
        self.item.id()
    }

    /// Element id for the rendered trigger.
    pub fn dom_id(&self) -> String {
        format!("brn-accordion-trigger-{}", self.item.id())
    }

    /// Element id of the content region this trigger controls.
    pub fn controls_id(&self) -> String {
        format!("brn-accordion-content-{}", self.item.id())
    }

    /// The item's state.
    pub fn state(&self) -> ItemState {
        self.item.state()
    }

    /// Check if the item is open.
    pub fn is_expanded(&self) -> bool {
        self.item.is_open()
    }

    /// Accessibility attributes for the current state.
    pub fn aria(&self) -> AriaAttributes {
        let state = self.state();
        AriaAttributes {
            id: self.dom_id(),
            role: "heading",
            level: 3,
            expanded: state.is_open(),
            controls: self.controls_id(),
            data_state: state,
        }
    }

    /// Exclude this trigger from keyboard navigation, or include it again.
    pub fn set_disabled(&self, disabled: bool) -> Result<()> {
        self.accordion.navigator().set_disabled(self.handle, disabled)
    }

    /// Check if this trigger is skipped by keyboard navigation.
    pub fn is_disabled(&self) -> bool {
        self.accordion.navigator().is_disabled(self.handle)
    }

    /// Check if this is the navigator's active trigger.
    pub fn is_active(&self) -> bool {
        self.accordion.navigator().active() == Some(self.handle)
    }

    /// Make this trigger active and request focus on it.
    pub fn focus(&self) -> Result<()> {
        self.accordion.set_active_item(self)
    }

    /// Toggle the item. Returns `true` if the open set changed.
    pub fn toggle(&self) -> bool {
        self.accordion.toggle_item(self.item.id())
    }

    /// Handle an input event delivered to the trigger.
    ///
    /// Returns `true` if the event was handled.
    pub fn event(&self, event: &mut InputEvent) -> bool {
        match event {
            InputEvent::FocusIn(_) => {
                self.accordion.set_focus_within(true);
                if let Err(err) = self.accordion.navigator().mark_active(self.handle) {
                    tracing::warn!(target: targets::ACCORDION, %err, "focused trigger is not registered");
                    return false;
                }
                event.accept();
                true
            }
            InputEvent::Click(click) => {
                if click.button != MouseButton::Left {
                    return false;
                }
                self.toggle();
                event.prevent_default();
                event.accept();
                true
            }
            InputEvent::KeyRelease(key_event) => {
                if key_event.target == EventTarget::TextEntry
                    || key_event.modifiers.any()
                    || !key_event.key.is_activation()
                {
                    return false;
                }
                self.toggle();
                event.prevent_default();
                event.accept();
                true
            }
            _ => false,
        }
    }
}

impl Drop for AccordionTrigger {
    fn drop(&mut self) {
        self.accordion.navigator().deregister(self.handle);
    }
}

impl fmt::Debug for AccordionTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccordionTrigger")
            .field("handle", &self.handle)
            .field("item", &self.item.id())
            .field("expanded", &self.is_expanded())
            .finish()
    }
}

static_assertions::assert_impl_all!(AccordionTrigger: Send, Sync);
