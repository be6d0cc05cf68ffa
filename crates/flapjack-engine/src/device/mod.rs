//! GL device + window context management.
//!
//! This module is responsible for:
//! - the [`GpuApi`] seam every GPU resource talks through
//! - the `glow` implementation of that seam
//! - creating the window's OpenGL context and presenting frames

mod api;
mod context;
mod error;
mod glow_device;
mod init;
mod limits;
mod types;

#[cfg(test)]
pub(crate) mod recording;

pub use api::GpuApi;
pub use context::GlContext;
pub use error::{GpuError, GpuResult};
pub use glow_device::GlowDevice;
pub use init::GlInit;
pub use limits::{GpuLimits, report_limits};
pub use types::{
    BufferTarget, BufferUsage, ClearColor, MagFilter, MinFilter, Primitive, ScalarType,
    ShaderStage, TextureOptions, Wrap,
};
