use super::Vec2;

/// Logical screen size.
///
/// Sprite positions live in a space centered on the window, `width` units wide
/// and `height` units tall, independent of the physical window size. Shaders
/// map it to NDC with `pos * 2 / size`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    #[inline]
    pub const fn size(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Physical window size for an integer `zoom`.
    #[inline]
    pub fn window_size(self, zoom: u32) -> (u32, u32) {
        (
            (self.width * zoom as f32).round() as u32,
            (self.height * zoom as f32).round() as u32,
        )
    }

    /// Maps a physical window position (origin bottom-left) into logical space.
    ///
    /// The window center becomes the origin; each axis is then scaled by
    /// logical / physical.
    pub fn window_to_logical(self, pos: Vec2, window: Vec2) -> Vec2 {
        let centered = pos - window / 2.0;
        Vec2::new(
            centered.x * self.width / window.x,
            centered.y * self.height / window.y,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(144.0, 256.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_portrait_logical_screen() {
        let v = Viewport::default();
        assert_eq!(v.size(), Vec2::new(144.0, 256.0));
        assert!(v.is_valid());
    }

    #[test]
    fn window_size_scales_by_zoom() {
        assert_eq!(Viewport::default().window_size(2), (288, 512));
    }

    #[test]
    fn window_center_maps_to_origin() {
        let v = Viewport::default();
        let window = Vec2::new(288.0, 512.0);
        assert_eq!(v.window_to_logical(Vec2::new(144.0, 256.0), window), Vec2::zero());
    }

    #[test]
    fn window_corners_map_to_half_extents() {
        let v = Viewport::default();
        let window = Vec2::new(288.0, 512.0);
        assert_eq!(v.window_to_logical(Vec2::zero(), window), Vec2::new(-72.0, -128.0));
        assert_eq!(v.window_to_logical(window, window), Vec2::new(72.0, 128.0));
    }

    #[test]
    fn invalid_sizes_are_rejected() {
        assert!(!Viewport::new(0.0, 10.0).is_valid());
        assert!(!Viewport::new(10.0, f32::NAN).is_valid());
    }
}
