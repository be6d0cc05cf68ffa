use crate::coords::Vec2;

use super::{AfterFade, Effect, FadeOut, MaskColor};

/// What the renderer reads from a sprite each frame.
///
/// A sprite with no mask color is never drawn.
pub trait SpriteView {
    fn mask_color(&self) -> Option<MaskColor>;

    /// Center position in logical space.
    fn position(&self) -> Vec2;

    /// Rotation in radians, counter-clockwise.
    fn angle(&self) -> f32 {
        0.0
    }

    fn alpha(&self) -> f32 {
        1.0
    }
}

impl<T: SpriteView + ?Sized> SpriteView for &T {
    #[inline]
    fn mask_color(&self) -> Option<MaskColor> {
        (**self).mask_color()
    }

    #[inline]
    fn position(&self) -> Vec2 {
        (**self).position()
    }

    #[inline]
    fn angle(&self) -> f32 {
        (**self).angle()
    }

    #[inline]
    fn alpha(&self) -> f32 {
        (**self).alpha()
    }
}

/// Plain sprite with optional time-driven effects.
pub struct Sprite {
    pub mask_color: Option<MaskColor>,
    pub position: Vec2,
    pub angle: f32,
    pub alpha: f32,
    effects: Vec<Box<dyn Effect>>,
    removed: bool,
}

impl Sprite {
    pub fn new(mask_color: Option<MaskColor>, position: Vec2) -> Self {
        Self {
            mask_color,
            position,
            angle: 0.0,
            alpha: 1.0,
            effects: Vec::new(),
            removed: false,
        }
    }

    /// A sprite with no mask color, used as an invisible marker.
    #[inline]
    pub fn marker(position: Vec2) -> Self {
        Self::new(None, position)
    }

    /// Attaches `effect`, applying a zero-length step so it takes hold immediately.
    pub fn add_effect(&mut self, mut effect: Box<dyn Effect>) {
        effect.update(&mut self.alpha, 0.0);
        self.effects.push(effect);
    }

    pub fn fade_out(&mut self, after: AfterFade) {
        self.add_effect(Box::new(FadeOut::new(after)));
    }

    /// Advances every effect by `dt` and drops the finished ones.
    ///
    /// Returns how many effects finished during this call.
    pub fn update(&mut self, dt: f32) -> usize {
        let mut finished = 0;
        for effect in &mut self.effects {
            if effect.update(&mut self.alpha, dt) {
                finished += 1;
                if effect.after() == AfterFade::Remove {
                    self.removed = true;
                }
            }
        }
        self.effects.retain(|e| !e.is_finished());
        finished
    }

    #[inline]
    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }

    #[inline]
    pub fn mark_to_remove(&mut self) {
        self.removed = true;
    }

    #[inline]
    pub fn is_removed(&self) -> bool {
        self.removed
    }
}

impl SpriteView for Sprite {
    #[inline]
    fn mask_color(&self) -> Option<MaskColor> {
        self.mask_color
    }

    #[inline]
    fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    fn angle(&self) -> f32 {
        self.angle
    }

    #[inline]
    fn alpha(&self) -> f32 {
        self.alpha
    }
}

impl core::fmt::Debug for Sprite {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Sprite")
            .field("mask_color", &self.mask_color)
            .field("position", &self.position)
            .field("angle", &self.angle)
            .field("alpha", &self.alpha)
            .field("effects", &self.effects.len())
            .field("removed", &self.removed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Option<MaskColor> {
        Some(MaskColor::new(255, 0, 0))
    }

    #[test]
    fn fade_starts_opaque() {
        let mut s = Sprite::new(red(), Vec2::zero());
        s.alpha = 0.4;
        s.fade_out(AfterFade::Keep);
        assert_eq!(s.alpha, 1.0);
        assert!(s.has_effects());
    }

    #[test]
    fn finished_fade_is_dropped_and_reported_once() {
        let mut s = Sprite::new(red(), Vec2::zero());
        s.fade_out(AfterFade::Keep);
        assert_eq!(s.update(0.1), 0);
        assert_eq!(s.update(0.1), 1);
        assert!(!s.has_effects());
        assert_eq!(s.update(0.1), 0);
        assert!(!s.is_removed());
    }

    #[test]
    fn remove_policy_marks_the_sprite() {
        let mut s = Sprite::new(red(), Vec2::zero());
        s.fade_out(AfterFade::Remove);
        s.update(0.25);
        assert!(s.is_removed());
        assert_eq!(s.alpha, 0.0);
    }

    #[test]
    fn references_are_views() {
        fn alpha_of(v: impl SpriteView) -> f32 {
            v.alpha()
        }
        let mut s = Sprite::marker(Vec2::new(1.0, 2.0));
        s.alpha = 0.5;
        assert_eq!(alpha_of(&s), 0.5);
        assert_eq!((&s).mask_color(), None);
        assert_eq!((&s).position(), Vec2::new(1.0, 2.0));
    }
}
