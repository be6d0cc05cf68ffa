//! Core engine-facing contracts.
//!
//! Defines the interface between the runtime (platform loop) and the game, so
//! game code never sees winit or glutin directly.

mod app;
mod ctx;

use crate::device::GlowDevice;

pub use app::{App, AppControl};
pub use ctx::FrameCtx;
