//! Roving focus across accordion triggers.
//!
//! [`FocusNavigator`] keeps the triggers of one accordion in registration
//! order, which hosts keep equal to document order, and tracks which of them
//! is "active": the one arrow keys move away from and the one that receives
//! keyboard focus. Navigation wraps at both ends.
//!
//! # Key Mapping
//!
//! | Key              | Vertical  | Horizontal (ltr) | Horizontal (rtl) |
//! |------------------|-----------|------------------|------------------|
//! | ArrowDown        | next      | -                | -                |
//! | ArrowUp          | previous  | -                | -                |
//! | ArrowRight       | -         | next             | previous         |
//! | ArrowLeft        | -         | previous         | next             |
//! | Home / PageUp    | first     | first            | first            |
//! | End / PageDown   | last      | last             | last             |
//!
//! Disabled triggers are skipped.

use std::fmt;
use std::sync::Arc;

use horizon_brain_core::{Property, Signal};
use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use super::{Orientation, TextDirection};
use crate::error::{AccordionError, Result};
use crate::events::{FocusReason, Key, KeyboardModifiers};
use crate::logging::targets;

new_key_type! {
    /// Handle of a trigger registered with a [`FocusNavigator`].
    pub struct TriggerId;
}

type FocusRequest = Arc<dyn Fn(FocusReason) + Send + Sync>;

/// Keys whose default action is suppressed in vertical accordions.
const VERTICAL_KEYS_TO_PREVENT_DEFAULT: [Key; 8] = [
    Key::ArrowUp,
    Key::ArrowDown,
    Key::PageDown,
    Key::PageUp,
    Key::Home,
    Key::End,
    Key::Space,
    Key::Enter,
];

/// Keys whose default action is suppressed in horizontal accordions.
const HORIZONTAL_KEYS_TO_PREVENT_DEFAULT: [Key; 8] = [
    Key::ArrowLeft,
    Key::ArrowRight,
    Key::PageDown,
    Key::PageUp,
    Key::Home,
    Key::End,
    Key::Space,
    Key::Enter,
];

/// Decide whether a key press inside an accordion should suppress the host's
/// default action.
///
/// Nothing is suppressed unless the accordion currently has focus. The
/// numpad Enter key is never suppressed, so numpad users keep their normal
/// activation behavior.
pub fn should_prevent_default(key: Key, orientation: Orientation, has_focus: bool) -> bool {
    if !has_focus {
        return false;
    }
    let keys = match orientation {
        Orientation::Horizontal => &HORIZONTAL_KEYS_TO_PREVENT_DEFAULT,
        Orientation::Vertical => &VERTICAL_KEYS_TO_PREVENT_DEFAULT,
    };
    keys.contains(&key)
}

/// An abstract navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationCommand {
    /// Move to the following trigger, wrapping to the first.
    Next,
    /// Move to the preceding trigger, wrapping to the last.
    Previous,
    /// Move to the first trigger.
    First,
    /// Move to the last trigger.
    Last,
}

impl NavigationCommand {
    /// Map a physical key to a command for the given layout.
    ///
    /// Returns `None` for keys that do not navigate in this orientation.
    pub fn from_key(key: Key, orientation: Orientation, direction: TextDirection) -> Option<Self> {
        let rtl = direction == TextDirection::Rtl;
        match (key, orientation) {
            (Key::Home | Key::PageUp, _) => Some(Self::First),
            (Key::End | Key::PageDown, _) => Some(Self::Last),
            (Key::ArrowDown, Orientation::Vertical) => Some(Self::Next),
            (Key::ArrowUp, Orientation::Vertical) => Some(Self::Previous),
            (Key::ArrowRight, Orientation::Horizontal) => {
                Some(if rtl { Self::Previous } else { Self::Next })
            }
            (Key::ArrowLeft, Orientation::Horizontal) => {
                Some(if rtl { Self::Next } else { Self::Previous })
            }
            _ => None,
        }
    }
}

struct Entry {
    focus: FocusRequest,
    disabled: bool,
}

#[derive(Default)]
struct Registry {
    entries: SlotMap<TriggerId, Entry>,
    order: Vec<TriggerId>,
    active: Option<TriggerId>,
}

impl Registry {
    fn index_of(&self, handle: TriggerId) -> Option<usize> {
        self.order.iter().position(|&h| h == handle)
    }

    fn is_enabled_at(&self, index: usize) -> bool {
        self.entries
            .get(self.order[index])
            .is_some_and(|entry| !entry.disabled)
    }

    fn first_enabled(&self) -> Option<usize> {
        (0..self.order.len()).find(|&i| self.is_enabled_at(i))
    }

    fn last_enabled(&self) -> Option<usize> {
        (0..self.order.len()).rev().find(|&i| self.is_enabled_at(i))
    }

    /// Step from `from` by `delta`, wrapping, until an enabled trigger is found.
    fn step_enabled(&self, from: usize, delta: isize) -> Option<usize> {
        let count = self.order.len() as isize;
        (1..=count)
            .map(|k| (from as isize + delta * k + count).rem_euclid(count) as usize)
            .find(|&i| self.is_enabled_at(i))
    }

    /// Nearest enabled position at or after `index`, else before it.
    fn enabled_near(&self, index: usize) -> Option<usize> {
        let len = self.order.len();
        (index.min(len)..len)
            .find(|&i| self.is_enabled_at(i))
            .or_else(|| (0..index.min(len)).rev().find(|&i| self.is_enabled_at(i)))
    }

    fn target_index(&self, command: NavigationCommand) -> Option<usize> {
        if self.order.is_empty() {
            return None;
        }
        let current = self.active.and_then(|handle| self.index_of(handle));
        match (command, current) {
            (NavigationCommand::First, _) | (NavigationCommand::Next, None) => self.first_enabled(),
            (NavigationCommand::Last, _) | (NavigationCommand::Previous, None) => {
                self.last_enabled()
            }
            (NavigationCommand::Next, Some(index)) => self.step_enabled(index, 1),
            (NavigationCommand::Previous, Some(index)) => self.step_enabled(index, -1),
        }
    }
}

/// Roving focus manager for one accordion.
///
/// # Signals
///
/// - `active_changed(Option<TriggerId>)`: Emitted whenever the active
///   trigger changes, including when it is cleared
///
/// # Removal Policy
///
/// When the active trigger is deregistered, the nearest enabled trigger at
/// or after its position becomes active, falling back to the nearest enabled
/// one before it. With no enabled trigger left the active trigger is
/// cleared. No focus request is issued for that replacement; focus only
/// moves in response to input or an explicit [`set_active`](Self::set_active).
pub struct FocusNavigator {
    registry: Mutex<Registry>,
    orientation: Property<Orientation>,
    direction: Property<TextDirection>,

    /// Signal emitted when the active trigger changes.
    pub active_changed: Signal<Option<TriggerId>>,
}

impl FocusNavigator {
    /// Create an empty navigator.
    pub fn new(orientation: Orientation, direction: TextDirection) -> Self {
        Self {
            registry: Mutex::new(Registry::default()),
            orientation: Property::new(orientation),
            direction: Property::new(direction),
            active_changed: Signal::new(),
        }
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Get the orientation used for arrow key mapping.
    pub fn orientation(&self) -> Orientation {
        self.orientation.get()
    }

    /// Set the orientation used for arrow key mapping.
    pub fn set_orientation(&self, orientation: Orientation) -> bool {
        self.orientation.set(orientation)
    }

    /// Get the writing direction used for horizontal key mapping.
    pub fn direction(&self) -> TextDirection {
        self.direction.get()
    }

    /// Set the writing direction used for horizontal key mapping.
    pub fn set_direction(&self, direction: TextDirection) -> bool {
        self.direction.set(direction)
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Append a trigger to the navigation order.
    ///
    /// `focus` is called when navigation makes this trigger active; it should
    /// move real keyboard focus to the rendered trigger.
    pub fn register<F>(&self, focus: F) -> TriggerId
    where
        F: Fn(FocusReason) + Send + Sync + 'static,
    {
        let mut registry = self.registry.lock();
        let handle = registry.entries.insert(Entry {
            focus: Arc::new(focus),
            disabled: false,
        });
        registry.order.push(handle);
        tracing::trace!(target: targets::NAVIGATOR, count = registry.order.len(), "trigger registered");
        handle
    }

    /// Remove a trigger from the navigation order.
    ///
    /// Returns `false` if the handle was not registered.
    pub fn deregister(&self, handle: TriggerId) -> bool {
        let active = {
            let mut registry = self.registry.lock();
            if registry.entries.remove(handle).is_none() {
                return false;
            }
            let Some(index) = registry.index_of(handle) else {
                return true;
            };
            registry.order.remove(index);

            if registry.active != Some(handle) {
                return true;
            }
            let replacement = registry
                .enabled_near(index)
                .map(|index| registry.order[index]);
            registry.active = replacement;
            replacement
        };

        tracing::trace!(
            target: targets::NAVIGATOR,
            has_replacement = active.is_some(),
            "active trigger deregistered"
        );
        self.active_changed.emit(active);
        true
    }

    /// Check if a handle is registered.
    pub fn contains(&self, handle: TriggerId) -> bool {
        self.registry.lock().entries.contains_key(handle)
    }

    /// Number of registered triggers.
    pub fn len(&self) -> usize {
        self.registry.lock().order.len()
    }

    /// Check if no triggers are registered.
    pub fn is_empty(&self) -> bool {
        self.registry.lock().order.is_empty()
    }

    /// Registered handles in navigation order.
    pub fn handles(&self) -> Vec<TriggerId> {
        self.registry.lock().order.clone()
    }

    /// Position of a handle in the navigation order.
    pub fn index_of(&self, handle: TriggerId) -> Option<usize> {
        self.registry.lock().index_of(handle)
    }

    /// Exclude a trigger from arrow/Home/End navigation, or include it again.
    pub fn set_disabled(&self, handle: TriggerId, disabled: bool) -> Result<()> {
        let mut registry = self.registry.lock();
        let entry = registry
            .entries
            .get_mut(handle)
            .ok_or(AccordionError::InvalidHandle)?;
        entry.disabled = disabled;
        Ok(())
    }

    /// Check if a trigger is skipped by navigation.
    pub fn is_disabled(&self, handle: TriggerId) -> bool {
        self.registry
            .lock()
            .entries
            .get(handle)
            .is_some_and(|entry| entry.disabled)
    }

    // =========================================================================
    // Active Trigger
    // =========================================================================

    /// The active trigger, if any.
    pub fn active(&self) -> Option<TriggerId> {
        self.registry.lock().active
    }

    /// Position of the active trigger in the navigation order.
    pub fn active_index(&self) -> Option<usize> {
        let registry = self.registry.lock();
        registry.active.and_then(|handle| registry.index_of(handle))
    }

    /// Make a trigger active and request focus on it.
    ///
    /// Focus is requested even when the trigger is already active, since
    /// keyboard focus may have moved elsewhere inside the accordion. Hosts
    /// reporting that a trigger received focus use
    /// [`mark_active`](Self::mark_active) instead.
    pub fn set_active(&self, handle: TriggerId) -> Result<()> {
        let focus = {
            let registry = self.registry.lock();
            registry
                .entries
                .get(handle)
                .map(|entry| entry.focus.clone())
                .ok_or(AccordionError::InvalidHandle)?
        };
        self.activate(handle, &focus, FocusReason::Other);
        Ok(())
    }

    /// Make a trigger active without requesting focus.
    ///
    /// Used when the trigger already holds keyboard focus, e.g. from its
    /// focus-in handler.
    pub fn mark_active(&self, handle: TriggerId) -> Result<()> {
        let changed = {
            let mut registry = self.registry.lock();
            if !registry.entries.contains_key(handle) {
                return Err(AccordionError::InvalidHandle);
            }
            registry.active.replace(handle) != Some(handle)
        };
        if changed {
            self.active_changed.emit(Some(handle));
        }
        Ok(())
    }

    /// Forget the active trigger without moving focus.
    pub fn clear_active(&self) {
        let had_active = self.registry.lock().active.take().is_some();
        if had_active {
            self.active_changed.emit(None);
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Apply a navigation command.
    ///
    /// Returns `false` when there is no enabled trigger to move to; the active
    /// trigger is then left untouched.
    pub fn navigate(&self, command: NavigationCommand) -> bool {
        let target = {
            let registry = self.registry.lock();
            registry.target_index(command).and_then(|index| {
                let handle = registry.order[index];
                registry
                    .entries
                    .get(handle)
                    .map(|entry| (handle, entry.focus.clone()))
            })
        };

        let Some((handle, focus)) = target else {
            tracing::trace!(target: targets::NAVIGATOR, ?command, "nothing to navigate to");
            return false;
        };

        tracing::trace!(target: targets::NAVIGATOR, ?command, "navigating");
        self.activate(handle, &focus, FocusReason::Navigation);
        true
    }

    /// Translate a key press into navigation.
    ///
    /// `orientation_override` replaces the navigator's own orientation for
    /// this key only. Keys pressed together with a modifier are not handled.
    ///
    /// Returns `true` if the key was a navigation key and there was a
    /// trigger to move to.
    pub fn handle_navigation_key(
        &self,
        key: Key,
        modifiers: KeyboardModifiers,
        orientation_override: Option<Orientation>,
    ) -> bool {
        if modifiers.any() {
            return false;
        }
        let orientation = orientation_override.unwrap_or_else(|| self.orientation());
        match NavigationCommand::from_key(key, orientation, self.direction()) {
            Some(command) => self.navigate(command),
            None => false,
        }
    }

    fn activate(&self, handle: TriggerId, focus: &FocusRequest, reason: FocusReason) {
        let changed = {
            let mut registry = self.registry.lock();
            if !registry.entries.contains_key(handle) {
                return;
            }
            registry.active.replace(handle) != Some(handle)
        };

        if changed {
            self.active_changed.emit(Some(handle));
        }
        focus(reason);
    }
}

impl Default for FocusNavigator {
    fn default() -> Self {
        Self::new(Orientation::default(), TextDirection::default())
    }
}

impl fmt::Debug for FocusNavigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.lock();
        f.debug_struct("FocusNavigator")
            .field("order", &registry.order)
            .field("active", &registry.active)
            .field("orientation", &self.orientation.get())
            .field("direction", &self.direction.get())
            .finish()
    }
}

static_assertions::assert_impl_all!(FocusNavigator: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    /// Registers `count` triggers that record their focus requests.
    fn setup(
        navigator: &FocusNavigator,
        count: usize,
    ) -> (Vec<TriggerId>, Arc<Mutex<Vec<usize>>>) {
        let focused = Arc::new(Mutex::new(Vec::new()));
        let handles = (0..count)
            .map(|i| {
                let focused = focused.clone();
                navigator.register(move |_| focused.lock().push(i))
            })
            .collect();
        (handles, focused)
    }

    #[test]
    fn test_home_and_end() {
        let navigator = FocusNavigator::default();
        let (handles, focused) = setup(&navigator, 4);

        assert!(navigator.navigate(NavigationCommand::Last));
        assert_eq!(navigator.active(), Some(handles[3]));

        assert!(navigator.navigate(NavigationCommand::First));
        assert_eq!(navigator.active(), Some(handles[0]));

        assert_eq!(*focused.lock(), vec![3, 0]);
    }

    #[test]
    fn test_next_and_previous_wrap() {
        let navigator = FocusNavigator::default();
        let (handles, _) = setup(&navigator, 3);

        navigator.set_active(handles[2]).unwrap();
        navigator.navigate(NavigationCommand::Next);
        assert_eq!(navigator.active(), Some(handles[0]));

        navigator.navigate(NavigationCommand::Previous);
        assert_eq!(navigator.active(), Some(handles[2]));
    }

    #[test]
    fn test_navigation_without_active_trigger() {
        let navigator = FocusNavigator::default();
        let (handles, _) = setup(&navigator, 3);

        navigator.navigate(NavigationCommand::Next);
        assert_eq!(navigator.active(), Some(handles[0]));

        navigator.clear_active();
        navigator.navigate(NavigationCommand::Previous);
        assert_eq!(navigator.active(), Some(handles[2]));
    }

    #[test]
    fn test_empty_registry_is_not_handled() {
        let navigator = FocusNavigator::default();
        let changes = Arc::new(Mutex::new(0));

        let changes_clone = changes.clone();
        navigator.active_changed.connect(move |_| *changes_clone.lock() += 1);

        for command in [
            NavigationCommand::Next,
            NavigationCommand::Previous,
            NavigationCommand::First,
            NavigationCommand::Last,
        ] {
            assert!(!navigator.navigate(command));
        }
        assert!(!navigator.handle_navigation_key(Key::End, KeyboardModifiers::NONE, None));
        assert_eq!(navigator.active(), None);
        assert_eq!(*changes.lock(), 0);
    }

    #[test]
    fn test_set_active_unregistered_handle() {
        let navigator = FocusNavigator::default();
        let (handles, _) = setup(&navigator, 1);
        navigator.deregister(handles[0]);

        assert_eq!(navigator.set_active(handles[0]), Err(AccordionError::InvalidHandle));
        assert_eq!(navigator.active(), None);
    }

    #[test]
    fn test_set_active_always_requests_focus() {
        let navigator = FocusNavigator::default();
        let (handles, focused) = setup(&navigator, 2);

        navigator.set_active(handles[1]).unwrap();
        navigator.set_active(handles[1]).unwrap();
        assert_eq!(*focused.lock(), vec![1, 1]);
    }

    #[test]
    fn test_repeated_home_refocuses_active_trigger() {
        let navigator = FocusNavigator::default();
        let (handles, focused) = setup(&navigator, 1);
        let changes = Arc::new(Mutex::new(0));

        let changes_clone = changes.clone();
        navigator.active_changed.connect(move |_| *changes_clone.lock() += 1);

        assert!(navigator.handle_navigation_key(Key::Home, KeyboardModifiers::NONE, None));
        assert!(navigator.handle_navigation_key(Key::Home, KeyboardModifiers::NONE, None));

        assert_eq!(navigator.active(), Some(handles[0]));
        assert_eq!(*focused.lock(), vec![0, 0]);
        assert_eq!(*changes.lock(), 1);
    }

    #[test]
    fn test_mark_active_does_not_request_focus() {
        let navigator = FocusNavigator::default();
        let (handles, focused) = setup(&navigator, 2);

        navigator.mark_active(handles[1]).unwrap();
        assert_eq!(navigator.active(), Some(handles[1]));
        assert!(focused.lock().is_empty());

        navigator.deregister(handles[0]);
        assert_eq!(navigator.mark_active(handles[0]), Err(AccordionError::InvalidHandle));
    }

    #[test]
    fn test_vertical_key_mapping() {
        let navigator = FocusNavigator::new(Orientation::Vertical, TextDirection::Rtl);
        let (handles, _) = setup(&navigator, 3);
        let none = KeyboardModifiers::NONE;

        assert!(navigator.handle_navigation_key(Key::ArrowDown, none, None));
        assert_eq!(navigator.active(), Some(handles[0]));
        assert!(navigator.handle_navigation_key(Key::ArrowDown, none, None));
        assert_eq!(navigator.active(), Some(handles[1]));
        assert!(navigator.handle_navigation_key(Key::ArrowUp, none, None));
        assert_eq!(navigator.active(), Some(handles[0]));

        assert!(!navigator.handle_navigation_key(Key::ArrowRight, none, None));
        assert!(!navigator.handle_navigation_key(Key::ArrowLeft, none, None));
        assert_eq!(navigator.active(), Some(handles[0]));
    }

    #[test]
    fn test_horizontal_rtl_mirrors_ltr() {
        let none = KeyboardModifiers::NONE;

        let ltr = FocusNavigator::new(Orientation::Horizontal, TextDirection::Ltr);
        let (ltr_handles, _) = setup(&ltr, 3);
        ltr.set_active(ltr_handles[0]).unwrap();
        ltr.handle_navigation_key(Key::ArrowRight, none, None);

        let rtl = FocusNavigator::new(Orientation::Horizontal, TextDirection::Rtl);
        let (rtl_handles, _) = setup(&rtl, 3);
        rtl.set_active(rtl_handles[0]).unwrap();
        rtl.handle_navigation_key(Key::ArrowLeft, none, None);

        assert_eq!(ltr.active_index(), Some(1));
        assert_eq!(rtl.active_index(), Some(1));

        rtl.handle_navigation_key(Key::ArrowRight, none, None);
        assert_eq!(rtl.active_index(), Some(0));
        assert!(!rtl.handle_navigation_key(Key::ArrowDown, none, None));
    }

    #[test]
    fn test_orientation_override() {
        let navigator = FocusNavigator::new(Orientation::Vertical, TextDirection::Ltr);
        let (handles, _) = setup(&navigator, 2);

        assert!(navigator.handle_navigation_key(
            Key::ArrowRight,
            KeyboardModifiers::NONE,
            Some(Orientation::Horizontal)
        ));
        assert_eq!(navigator.active(), Some(handles[0]));
    }

    #[test]
    fn test_page_keys_jump_to_ends() {
        let navigator = FocusNavigator::default();
        let (handles, _) = setup(&navigator, 5);
        let none = KeyboardModifiers::NONE;

        navigator.set_active(handles[2]).unwrap();
        navigator.handle_navigation_key(Key::PageDown, none, None);
        assert_eq!(navigator.active(), Some(handles[4]));
        navigator.handle_navigation_key(Key::PageUp, none, None);
        assert_eq!(navigator.active(), Some(handles[0]));
    }

    #[test]
    fn test_modified_keys_are_ignored() {
        let navigator = FocusNavigator::default();
        let (_, _) = setup(&navigator, 2);

        assert!(!navigator.handle_navigation_key(Key::ArrowDown, KeyboardModifiers::SHIFT, None));
        assert!(!navigator.handle_navigation_key(Key::Home, KeyboardModifiers::CTRL, None));
        assert_eq!(navigator.active(), None);
    }

    #[test]
    fn test_disabled_triggers_are_skipped() {
        let navigator = FocusNavigator::default();
        let (handles, _) = setup(&navigator, 4);
        navigator.set_disabled(handles[0], true).unwrap();
        navigator.set_disabled(handles[2], true).unwrap();
        assert!(navigator.is_disabled(handles[2]));

        navigator.navigate(NavigationCommand::First);
        assert_eq!(navigator.active(), Some(handles[1]));
        navigator.navigate(NavigationCommand::Next);
        assert_eq!(navigator.active(), Some(handles[3]));
        navigator.navigate(NavigationCommand::Next);
        assert_eq!(navigator.active(), Some(handles[1]));

        navigator.set_disabled(handles[1], true).unwrap();
        navigator.set_disabled(handles[3], true).unwrap();
        assert!(!navigator.navigate(NavigationCommand::Last));
    }

    #[test]
    fn test_deregister_active_moves_to_same_index() {
        let navigator = FocusNavigator::default();
        let (handles, focused) = setup(&navigator, 3);

        navigator.set_active(handles[1]).unwrap();
        assert!(navigator.deregister(handles[1]));
        assert_eq!(navigator.active(), Some(handles[2]));

        // Removing the last trigger falls back to the one before it.
        assert!(navigator.deregister(handles[2]));
        assert_eq!(navigator.active(), Some(handles[0]));

        assert!(navigator.deregister(handles[0]));
        assert_eq!(navigator.active(), None);
        assert!(navigator.is_empty());

        // Replacements are not focused.
        assert_eq!(*focused.lock(), vec![1]);
    }

    #[test]
    fn test_deregister_active_skips_disabled_replacement() {
        let navigator = FocusNavigator::default();
        let (handles, _) = setup(&navigator, 5);
        navigator.set_disabled(handles[2], true).unwrap();
        navigator.set_disabled(handles[4], true).unwrap();

        navigator.set_active(handles[1]).unwrap();
        navigator.deregister(handles[1]);
        assert_eq!(navigator.active(), Some(handles[3]));

        navigator.deregister(handles[3]);
        assert_eq!(navigator.active(), Some(handles[0]));

        navigator.deregister(handles[0]);
        assert_eq!(navigator.active(), None);
        assert_eq!(navigator.len(), 2);
    }

    #[test]
    fn test_deregister_inactive_keeps_active() {
        let navigator = FocusNavigator::default();
        let (handles, _) = setup(&navigator, 3);

        navigator.set_active(handles[2]).unwrap();
        navigator.deregister(handles[0]);
        assert_eq!(navigator.active(), Some(handles[2]));
        assert_eq!(navigator.active_index(), Some(1));
        assert!(!navigator.deregister(handles[0]));
    }

    #[test]
    fn test_registration_order_survives_dynamic_changes() {
        let navigator = FocusNavigator::default();
        let (handles, _) = setup(&navigator, 3);

        navigator.deregister(handles[1]);
        let late = navigator.register(|_| {});
        assert_eq!(navigator.handles(), vec![handles[0], handles[2], late]);
        assert_eq!(navigator.index_of(late), Some(2));
        assert_eq!(navigator.len(), 3);
    }

    #[test]
    fn test_active_changed_signal() {
        let navigator = FocusNavigator::default();
        let (handles, _) = setup(&navigator, 2);
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        navigator.active_changed.connect(move |&active| received_clone.lock().push(active));

        navigator.navigate(NavigationCommand::Next);
        navigator.navigate(NavigationCommand::Next);
        navigator.clear_active();

        assert_eq!(*received.lock(), vec![Some(handles[0]), Some(handles[1]), None]);
    }

    #[test]
    fn test_focus_request_may_reenter_navigator() {
        let navigator = Arc::new(FocusNavigator::default());
        let weak = Arc::downgrade(&navigator);
        let handle_cell: Arc<Mutex<Option<TriggerId>>> = Arc::new(Mutex::new(None));

        // A host that reports focus-in synchronously from focus().
        let cell = handle_cell.clone();
        let handle = navigator.register(move |_| {
            if let (Some(navigator), Some(handle)) = (weak.upgrade(), *cell.lock()) {
                navigator.mark_active(handle).unwrap();
            }
        });
        *handle_cell.lock() = Some(handle);

        assert!(navigator.navigate(NavigationCommand::First));
        assert_eq!(navigator.active(), Some(handle));
    }

    #[test]
    fn test_prevent_default_policy() {
        assert!(should_prevent_default(Key::ArrowDown, Orientation::Vertical, true));
        assert!(should_prevent_default(Key::Space, Orientation::Vertical, true));
        assert!(should_prevent_default(Key::Enter, Orientation::Horizontal, true));
        assert!(should_prevent_default(Key::ArrowLeft, Orientation::Horizontal, true));

        assert!(!should_prevent_default(Key::ArrowLeft, Orientation::Vertical, true));
        assert!(!should_prevent_default(Key::ArrowUp, Orientation::Horizontal, true));
        assert!(!should_prevent_default(Key::NumpadEnter, Orientation::Vertical, true));
        assert!(!should_prevent_default(Key::Tab, Orientation::Vertical, true));
        assert!(!should_prevent_default(Key::Home, Orientation::Vertical, false));
    }

    #[test]
    fn test_command_from_key() {
        use NavigationCommand::*;
        let h = Orientation::Horizontal;
        let v = Orientation::Vertical;
        let ltr = TextDirection::Ltr;

        assert_eq!(NavigationCommand::from_key(Key::Home, h, ltr), Some(First));
        assert_eq!(NavigationCommand::from_key(Key::PageDown, v, ltr), Some(Last));
        assert_eq!(NavigationCommand::from_key(Key::ArrowLeft, h, TextDirection::Rtl), Some(Next));
        assert_eq!(NavigationCommand::from_key(Key::ArrowUp, h, ltr), None);
        assert_eq!(NavigationCommand::from_key(Key::Space, v, ltr), None);
    }
}
