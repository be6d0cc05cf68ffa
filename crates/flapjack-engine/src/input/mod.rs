//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The runtime translates platform events with [`platform::translate_window_event`].

pub mod platform;
mod state;
mod types;

pub use state::InputState;
pub use types::{ButtonState, InputEvent, Key, MouseButton};
