//! Input event types consumed by headless components.
//!
//! The rendering layer owns the real event sources (a window, a DOM, a
//! terminal). It translates what it receives into these types and hands them
//! to a component's `event()` method. The component reports back through the
//! event itself: [`EventBase::accept`] marks it handled and
//! [`EventBase::prevent_default`] asks the host to skip its built-in action
//! (scrolling on Space, activating a default button on Enter, ...).
//!
//! ```ignore
//! use horizon_brain::events::{InputEvent, Key, KeyPressEvent, KeyboardModifiers};
//!
//! let mut event = InputEvent::KeyPress(KeyPressEvent::new(Key::ArrowDown, KeyboardModifiers::NONE));
//! accordion.event(&mut event);
//! if event.is_default_prevented() {
//!     // don't scroll the page
//! }
//! ```

/// Keyboard modifiers that may be held during input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held (Cmd on macOS).
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held (Windows key, Cmd on macOS).
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Alt modifier only.
    pub const ALT: Self = Self {
        shift: false,
        control: false,
        alt: true,
        meta: false,
    };

    /// Check if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MouseButton {
    /// Primary button (usually left).
    Left = 0,
    /// Secondary button (usually right).
    Right = 1,
    /// Middle button (scroll wheel click).
    Middle = 2,
    /// Additional button 1 (e.g., browser back).
    Button4 = 3,
    /// Additional button 2 (e.g., browser forward).
    Button5 = 4,
}

/// Keys that headless components react to.
///
/// Keys that no component interprets collapse into [`Key::Character`] for
/// printable input or [`Key::Unknown`] otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    // Navigation
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,

    // Activation
    Enter,
    NumpadEnter,
    Space,

    // Focus
    Tab,
    Escape,

    /// A printable character, lowercased for letters.
    Character(char),

    /// Unknown/unmapped key.
    Unknown(u16),
}

impl Key {
    /// Check if this key activates the focused control (Space or either Enter).
    pub fn is_activation(&self) -> bool {
        matches!(self, Key::Enter | Key::NumpadEnter | Key::Space)
    }
}

/// Where an input event originated inside the component's surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventTarget {
    /// A component surface (a trigger, the container itself).
    #[default]
    Surface,
    /// A text-entry field nested inside the component.
    ///
    /// Components leave these events alone so typing is never hijacked.
    TextEntry,
}

/// Common data for all input events.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventBase {
    accepted: bool,
    default_prevented: bool,
}

impl EventBase {
    /// Create a new event base.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the event has been accepted.
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Accept the event, preventing further propagation.
    pub fn accept(&mut self) {
        self.accepted = true;
    }

    /// Ask the host to skip its default action for this event.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Check if the host's default action was suppressed.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Key press event, sent when a key goes down.
#[derive(Debug, Clone)]
pub struct KeyPressEvent {
    /// Base event data.
    pub base: EventBase,
    /// The key that was pressed.
    pub key: Key,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
    /// Whether this is a key repeat event (key held down).
    pub is_repeat: bool,
    /// Where the event originated.
    pub target: EventTarget,
}

impl KeyPressEvent {
    /// Create a new key press event targeting a component surface.
    pub fn new(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self {
            base: EventBase::new(),
            key,
            modifiers,
            is_repeat: false,
            target: EventTarget::Surface,
        }
    }

    /// Set the event target.
    pub fn with_target(mut self, target: EventTarget) -> Self {
        self.target = target;
        self
    }

    /// Mark this event as an auto-repeat.
    pub fn with_repeat(mut self, is_repeat: bool) -> Self {
        self.is_repeat = is_repeat;
        self
    }
}

/// Key release event, sent when a key goes up.
#[derive(Debug, Clone)]
pub struct KeyReleaseEvent {
    /// Base event data.
    pub base: EventBase,
    /// The key that was released.
    pub key: Key,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
    /// Where the event originated.
    pub target: EventTarget,
}

impl KeyReleaseEvent {
    /// Create a new key release event targeting a component surface.
    pub fn new(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self {
            base: EventBase::new(),
            key,
            modifiers,
            target: EventTarget::Surface,
        }
    }

    /// Set the event target.
    pub fn with_target(mut self, target: EventTarget) -> Self {
        self.target = target;
        self
    }
}

/// Click event, sent when a mouse button is pressed and released over a surface.
#[derive(Debug, Clone, Copy)]
pub struct ClickEvent {
    /// Base event data.
    pub base: EventBase,
    /// The button that was clicked.
    pub button: MouseButton,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
}

impl ClickEvent {
    /// Create a new click event.
    pub fn new(button: MouseButton, modifiers: KeyboardModifiers) -> Self {
        Self {
            base: EventBase::new(),
            button,
            modifiers,
        }
    }

    /// A primary-button click with no modifiers.
    pub fn primary() -> Self {
        Self::new(MouseButton::Left, KeyboardModifiers::NONE)
    }
}

/// Reason for focus change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusReason {
    /// Focus changed due to mouse click.
    Mouse,
    /// Focus changed due to Tab key.
    Tab,
    /// Focus changed due to arrow/Home/End navigation inside a composite.
    Navigation,
    /// Focus changed programmatically.
    #[default]
    Other,
}

/// Focus in event, sent when a surface gains keyboard focus.
#[derive(Debug, Clone, Copy)]
pub struct FocusInEvent {
    /// Base event data.
    pub base: EventBase,
    /// The reason focus was gained.
    pub reason: FocusReason,
}

impl FocusInEvent {
    /// Create a new focus in event.
    pub fn new(reason: FocusReason) -> Self {
        Self {
            base: EventBase::new(),
            reason,
        }
    }
}

/// Focus out event, sent when a surface loses keyboard focus.
#[derive(Debug, Clone, Copy)]
pub struct FocusOutEvent {
    /// Base event data.
    pub base: EventBase,
    /// The reason focus was lost.
    pub reason: FocusReason,
}

impl FocusOutEvent {
    /// Create a new focus out event.
    pub fn new(reason: FocusReason) -> Self {
        Self {
            base: EventBase::new(),
            reason,
        }
    }
}

/// An input event delivered to a headless component.
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// A key went down.
    KeyPress(KeyPressEvent),
    /// A key went up.
    KeyRelease(KeyReleaseEvent),
    /// A mouse button was clicked.
    Click(ClickEvent),
    /// The surface gained focus.
    FocusIn(FocusInEvent),
    /// The surface lost focus.
    FocusOut(FocusOutEvent),
}

impl InputEvent {
    fn base(&self) -> &EventBase {
        match self {
            InputEvent::KeyPress(e) => &e.base,
            InputEvent::KeyRelease(e) => &e.base,
            InputEvent::Click(e) => &e.base,
            InputEvent::FocusIn(e) => &e.base,
            InputEvent::FocusOut(e) => &e.base,
        }
    }

    fn base_mut(&mut self) -> &mut EventBase {
        match self {
            InputEvent::KeyPress(e) => &mut e.base,
            InputEvent::KeyRelease(e) => &mut e.base,
            InputEvent::Click(e) => &mut e.base,
            InputEvent::FocusIn(e) => &mut e.base,
            InputEvent::FocusOut(e) => &mut e.base,
        }
    }

    /// Check if the event has been accepted.
    pub fn is_accepted(&self) -> bool {
        self.base().is_accepted()
    }

    /// Accept the event.
    pub fn accept(&mut self) {
        self.base_mut().accept();
    }

    /// Ask the host to skip its default action.
    pub fn prevent_default(&mut self) {
        self.base_mut().prevent_default();
    }

    /// Check if the host's default action was suppressed.
    pub fn is_default_prevented(&self) -> bool {
        self.base().is_default_prevented()
    }
}
