use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::coords::{Vec2, Viewport};
use crate::input::{ButtonState, InputEvent, InputState, Key, MouseButton};

/// Translates a winit `WindowEvent` into an engine `InputEvent`.
///
/// `window_size` is the drawable size in physical pixels; positions are mapped
/// into `viewport`'s logical space. Returns `None` for events the input
/// subsystem does not represent.
pub fn translate_window_event(
    viewport: Viewport,
    window_size: PhysicalSize<u32>,
    state: &InputState,
    event: &WindowEvent,
) -> Option<InputEvent> {
    match event {
        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),

        WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeft),

        WindowEvent::CursorMoved { position, .. } => Some(InputEvent::PointerMoved {
            position: to_logical(viewport, window_size, *position)?,
        }),

        WindowEvent::MouseInput { state: st, button, .. } => Some(InputEvent::PointerButton {
            button: map_mouse_button(*button),
            state: map_state(*st),
            // winit 0.30 has no cursor query; use the tracked position.
            position: state.pointer.unwrap_or_default(),
        }),

        WindowEvent::KeyboardInput { event, .. } => Some(InputEvent::Key {
            key: map_key(event.physical_key),
            state: map_state(event.state),
            repeat: event.repeat,
        }),

        _ => None,
    }
}

/// winit positions are top-left origin; logical space is centered, +Y up.
fn to_logical(
    viewport: Viewport,
    window_size: PhysicalSize<u32>,
    pos: PhysicalPosition<f64>,
) -> Option<Vec2> {
    if window_size.width == 0 || window_size.height == 0 {
        return None;
    }
    let window = Vec2::new(window_size.width as f32, window_size.height as f32);
    let bottom_left = Vec2::new(pos.x as f32, window.y - pos.y as f32);
    Some(viewport.window_to_logical(bottom_left, window))
}

fn map_state(st: ElementState) -> ButtonState {
    match st {
        ElementState::Pressed => ButtonState::Pressed,
        ElementState::Released => ButtonState::Released,
    }
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Other(3),
        WinitMouseButton::Forward => MouseButton::Other(4),
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(code) => match code {
            KeyCode::Escape => Key::Escape,
            KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
            KeyCode::Space => Key::Space,
            KeyCode::ArrowUp => Key::ArrowUp,
            KeyCode::ArrowDown => Key::ArrowDown,
            KeyCode::ArrowLeft => Key::ArrowLeft,
            KeyCode::ArrowRight => Key::ArrowRight,
            other => Key::Other(other as u32),
        },

        // NativeKeyCode is not a u32 in winit 0.30; preserve "unknown" without a stable numeric.
        PhysicalKey::Unidentified(_) => Key::Other(0),
    }
}
