/// Initialization parameters for the GL layer.
///
/// Keep this structure stable and minimal. Add configuration flags only when a
/// concrete platform requirement exists.
#[derive(Debug, Clone)]
pub struct GlInit {
    /// Requested core-profile version. Geometry shaders need at least 3.2.
    pub version: (u8, u8),

    /// Synchronize buffer swaps with the display refresh.
    ///
    /// Not every platform honors this; failure to apply it is logged, not fatal.
    pub vsync: bool,

    /// Require an alpha channel in the default framebuffer.
    pub alpha: bool,
}

impl Default for GlInit {
    fn default() -> Self {
        Self {
            version: (3, 3),
            vsync: true,
            alpha: true,
        }
    }
}
