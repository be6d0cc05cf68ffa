//! Coordinate types shared by the renderer and game code.
//!
//! Logical space:
//! - origin at the window center
//! - +X right, +Y up
//! - one unit is one atlas pixel at zoom 1
//!
//! Shaders convert to NDC using the logical screen size uniform.

mod vec2;
mod viewport;

pub use vec2::Vec2;
pub use viewport::Viewport;
