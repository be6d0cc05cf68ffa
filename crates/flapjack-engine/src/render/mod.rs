//! Batched sprite rendering.
//!
//! One [`SpriteRenderer`] draws a whole frame of sprites with a single point
//! draw call. Sprite artwork lives on one atlas texture; a [`BoxTable`] built
//! from a color mask of the same size locates each sprite on it.
//!
//! Convention:
//! - sprite positions are logical units, origin at the screen center, +Y up
//! - box coordinates are atlas pixels with +Y up

mod box_table;
mod config;
mod sprite_renderer;

pub use box_table::{AtlasBox, BoxTable};
pub use config::RendererConfig;
pub use sprite_renderer::{MAX_BOXES, SpriteInstance, SpriteRenderer};
