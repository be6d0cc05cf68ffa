use crate::coords::Viewport;
use crate::device::TextureOptions;

/// Sprite renderer settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RendererConfig {
    /// Logical screen size sent to the shaders; independent of the window size.
    pub logical_size: Viewport,

    /// Texture unit the atlas is bound to while drawing.
    pub texture_unit: u32,

    /// Atlas sampling. Pixel art wants nearest filtering without mipmaps.
    pub atlas: TextureOptions,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            logical_size: Viewport::default(),
            texture_unit: 0,
            atlas: TextureOptions::NEAREST,
        }
    }
}
