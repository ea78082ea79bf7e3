//! Keyboard input translation from winit.
//!
//! Hosts that run on winit feed raw keyboard events through
//! [`KeyboardInputHandler`] to get the [`KeyPressEvent`]/[`KeyReleaseEvent`]
//! values components consume.
//!
//! ```ignore
//! use horizon_brain::keyboard::KeyboardInputHandler;
//!
//! let mut handler = KeyboardInputHandler::new();
//!
//! // On WindowEvent::ModifiersChanged:
//! handler.update_modifiers(&modifiers);
//!
//! // On WindowEvent::KeyboardInput:
//! let mut event = handler
//!     .process_keyboard_event(&event.logical_key, &event.physical_key, event.state, event.repeat)
//!     .into_input_event();
//! accordion.event(&mut event);
//! ```
//!
//! The physical key is consulted first. That is what separates the numpad
//! Enter from the main Enter key, which share a logical key.

use winit::event::{ElementState, Modifiers};
use winit::keyboard::{Key as WinitKey, KeyCode, NamedKey, PhysicalKey};

use crate::events::{
    EventTarget, InputEvent, Key, KeyPressEvent, KeyReleaseEvent, KeyboardModifiers,
};

/// Converts a winit logical key to a Horizon Brain key.
pub fn from_winit_key(key: &WinitKey) -> Key {
    match key {
        WinitKey::Named(named) => from_winit_named_key(named),
        WinitKey::Character(c) => from_character(c),
        WinitKey::Unidentified(_) => Key::Unknown(0),
        WinitKey::Dead(_) => Key::Unknown(0),
    }
}

fn from_winit_named_key(key: &NamedKey) -> Key {
    match key {
        NamedKey::ArrowUp => Key::ArrowUp,
        NamedKey::ArrowDown => Key::ArrowDown,
        NamedKey::ArrowLeft => Key::ArrowLeft,
        NamedKey::ArrowRight => Key::ArrowRight,
        NamedKey::Home => Key::Home,
        NamedKey::End => Key::End,
        NamedKey::PageUp => Key::PageUp,
        NamedKey::PageDown => Key::PageDown,
        NamedKey::Enter => Key::Enter,
        NamedKey::Space => Key::Space,
        NamedKey::Tab => Key::Tab,
        NamedKey::Escape => Key::Escape,
        _ => Key::Unknown(0),
    }
}

/// Converts the text of a character key.
///
/// Multi-character input (compose sequences, IME commits) has no single key.
fn from_character(c: &str) -> Key {
    let mut chars = c.chars();
    match (chars.next(), chars.next()) {
        (Some(' '), None) => Key::Space,
        (Some(ch), None) => Key::Character(ch.to_ascii_lowercase()),
        _ => Key::Unknown(0),
    }
}

/// Converts a winit physical key to a Horizon Brain key.
///
/// Only layout-independent keys are mapped; everything else is
/// [`Key::Unknown`] so callers fall back to the logical key.
pub fn from_winit_physical_key(physical: &PhysicalKey) -> Key {
    match physical {
        PhysicalKey::Code(code) => from_winit_key_code(code),
        PhysicalKey::Unidentified(_) => Key::Unknown(0),
    }
}

fn from_winit_key_code(code: &KeyCode) -> Key {
    match code {
        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Enter => Key::Enter,
        KeyCode::NumpadEnter => Key::NumpadEnter,
        KeyCode::Space => Key::Space,
        KeyCode::Tab => Key::Tab,
        KeyCode::Escape => Key::Escape,
        _ => Key::Unknown(0),
    }
}

/// Converts winit modifiers to Horizon Brain keyboard modifiers.
pub fn from_winit_modifiers(modifiers: &Modifiers) -> KeyboardModifiers {
    let state = modifiers.state();
    KeyboardModifiers {
        shift: state.shift_key(),
        control: state.control_key(),
        alt: state.alt_key(),
        meta: state.super_key(),
    }
}

fn resolve_key(logical_key: &WinitKey, physical_key: &PhysicalKey) -> Key {
    let key = from_winit_physical_key(physical_key);
    if matches!(key, Key::Unknown(_)) {
        from_winit_key(logical_key)
    } else {
        key
    }
}

/// Handler for keyboard input that maintains modifier state.
#[derive(Debug, Default)]
pub struct KeyboardInputHandler {
    modifiers: KeyboardModifiers,
    target: EventTarget,
}

impl KeyboardInputHandler {
    /// Creates a new keyboard input handler with no modifiers pressed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the current modifier key state.
    pub fn modifiers(&self) -> KeyboardModifiers {
        self.modifiers
    }

    /// Updates the modifier state from a winit `ModifiersChanged` event.
    pub fn update_modifiers(&mut self, modifiers: &Modifiers) {
        self.modifiers = from_winit_modifiers(modifiers);
    }

    /// Records whether keyboard focus currently sits in a text-entry field.
    ///
    /// Subsequent events are tagged with [`EventTarget::TextEntry`] until
    /// this is called again with `false`.
    pub fn set_text_entry_focused(&mut self, focused: bool) {
        self.target = if focused {
            EventTarget::TextEntry
        } else {
            EventTarget::Surface
        };
    }

    /// Creates a key press event from winit keyboard event data.
    pub fn create_key_press_event(
        &self,
        logical_key: &WinitKey,
        physical_key: &PhysicalKey,
        is_repeat: bool,
    ) -> KeyPressEvent {
        KeyPressEvent::new(resolve_key(logical_key, physical_key), self.modifiers)
            .with_repeat(is_repeat)
            .with_target(self.target)
    }

    /// Creates a key release event from winit keyboard event data.
    pub fn create_key_release_event(
        &self,
        logical_key: &WinitKey,
        physical_key: &PhysicalKey,
    ) -> KeyReleaseEvent {
        KeyReleaseEvent::new(resolve_key(logical_key, physical_key), self.modifiers)
            .with_target(self.target)
    }

    /// Processes a winit keyboard event into a press or release.
    pub fn process_keyboard_event(
        &self,
        logical_key: &WinitKey,
        physical_key: &PhysicalKey,
        state: ElementState,
        is_repeat: bool,
    ) -> KeyboardEvent {
        match state {
            ElementState::Pressed => KeyboardEvent::Press(self.create_key_press_event(
                logical_key,
                physical_key,
                is_repeat,
            )),
            ElementState::Released => {
                KeyboardEvent::Release(self.create_key_release_event(logical_key, physical_key))
            }
        }
    }
}

/// A keyboard event that can be either a press or release.
#[derive(Debug, Clone)]
pub enum KeyboardEvent {
    /// A key was pressed.
    Press(KeyPressEvent),
    /// A key was released.
    Release(KeyReleaseEvent),
}

impl KeyboardEvent {
    /// Converts this keyboard event into an [`InputEvent`].
    pub fn into_input_event(self) -> InputEvent {
        match self {
            KeyboardEvent::Press(e) => InputEvent::KeyPress(e),
            KeyboardEvent::Release(e) => InputEvent::KeyRelease(e),
        }
    }
}
