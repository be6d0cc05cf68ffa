use anyhow::Result;

use crate::input::InputEvent;

use super::ctx::FrameCtx;
use super::GlowDevice;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by [`Runtime`](crate::window::Runtime).
///
/// Call order: `init` once the GL context exists, then any mix of `on_input`,
/// `update` (fixed rate) and `draw` (once per presented frame), and finally
/// `shutdown` while the context is still current.
pub trait App {
    /// Creates or allocates GPU resources.
    fn init(&mut self, gl: &GlowDevice) -> Result<()> {
        let _ = gl;
        Ok(())
    }

    /// Called for every translated input event. Escape is handled by the runtime.
    fn on_input(&mut self, event: &InputEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Advances the simulation by a fixed `dt` in seconds.
    fn update(&mut self, dt: f32) -> AppControl;

    /// Issues draw calls. The frame is already cleared and is presented afterwards.
    fn draw(&mut self, ctx: &mut FrameCtx<'_>) -> Result<()>;

    /// Frees every GPU resource the app owns.
    fn shutdown(&mut self, gl: &GlowDevice);
}
