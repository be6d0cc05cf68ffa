use std::collections::HashSet;

use crate::coords::Vec2;

use super::types::{ButtonState, InputEvent, Key, MouseButton};

/// Current input state of the window.
#[derive(Debug, Default)]
pub struct InputState {
    pub focused: bool,

    /// Pointer position in logical space.
    pub pointer: Option<Vec2>,

    pub keys_down: HashSet<Key>,
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies `ev`. Returns `false` for key repeats of an already held key.
    pub fn apply_event(&mut self, ev: &InputEvent) -> bool {
        match ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Releases are not delivered while unfocused.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
                true
            }

            InputEvent::PointerMoved { position } => {
                self.pointer = Some(*position);
                true
            }

            InputEvent::PointerLeft => {
                self.pointer = None;
                true
            }

            InputEvent::Key { key, state, .. } => match state {
                ButtonState::Pressed => self.keys_down.insert(*key),
                ButtonState::Released => self.keys_down.remove(key),
            },

            InputEvent::PointerButton { button, state, position } => {
                self.pointer = Some(*position);
                match state {
                    ButtonState::Pressed => self.buttons_down.insert(*button),
                    ButtonState::Released => self.buttons_down.remove(button),
                }
            }
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}
