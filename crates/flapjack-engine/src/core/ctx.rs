use winit::dpi::PhysicalSize;

use crate::coords::Viewport;
use crate::input::InputState;
use crate::time::FrameTime;

use super::GlowDevice;

/// Per-frame context passed to [`App::draw`](super::App::draw).
pub struct FrameCtx<'a> {
    pub gl: &'a GlowDevice,
    pub time: FrameTime,
    pub input: &'a InputState,

    /// Logical screen size sprites are laid out in.
    pub viewport: Viewport,

    /// Drawable size in physical pixels.
    pub window_size: PhysicalSize<u32>,
}
