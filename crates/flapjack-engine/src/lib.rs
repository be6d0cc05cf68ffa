//! Flapjack engine crate.
//!
//! A batched 2D sprite renderer over OpenGL 3.3 (through `glow`): lazily
//! allocated GPU resources, a shader pipeline with a geometry stage, an atlas
//! box table built from a color mask, and the window runtime that drives it.

pub mod assets;
pub mod coords;
pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod render;
pub mod resource;
pub mod sprite;
pub mod time;
pub mod window;
