//! Drawable sprites and the effects that animate them.

mod color;
mod effect;
#[allow(clippy::module_inception)]
mod sprite;

pub use color::{MaskColor, ParseMaskColorError};
pub use effect::{AfterFade, Effect, FADE_OUT_SECONDS, FadeOut};
pub use sprite::{Sprite, SpriteView};
