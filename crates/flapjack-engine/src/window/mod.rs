//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the GL window, and drives a [`crate::core::App`].

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
