use std::fmt;

use crate::coords::Vec2;

/// Keyboard key identifier.
///
/// Only the keys a sprite game reacts to get their own variant; everything else
/// maps to `Key::Other` with the platform key code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    Other(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ButtonState {
    Pressed,
    Released,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Platform-agnostic input event.
///
/// Positions are in logical space (origin at the window center, +Y up), the
/// same space sprites are placed in.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key {
        key: Key,
        state: ButtonState,
        repeat: bool,
    },

    PointerMoved {
        position: Vec2,
    },

    PointerButton {
        button: MouseButton,
        state: ButtonState,
        position: Vec2,
    },

    /// Pointer left the window surface.
    PointerLeft,

    /// Window focus change.
    Focused(bool),
}

impl InputEvent {
    /// A fresh key or button press; repeats and releases are not.
    pub fn is_press(&self) -> bool {
        matches!(
            self,
            InputEvent::Key { state: ButtonState::Pressed, repeat: false, .. }
                | InputEvent::PointerButton { state: ButtonState::Pressed, .. }
        )
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
