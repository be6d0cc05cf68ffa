/// Seconds a [`FadeOut`] takes to reach zero alpha.
pub const FADE_OUT_SECONDS: f32 = 0.2;

/// What happens to a sprite once its fade has finished.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum AfterFade {
    /// The sprite stays in place, fully transparent.
    #[default]
    Keep,
    /// The sprite is marked for removal.
    Remove,
}

/// Time-driven change to a sprite's drawn state.
pub trait Effect {
    /// Advances the effect by `dt` seconds, writing into `alpha`.
    ///
    /// Returns `true` on the update that finishes the effect; never again after.
    fn update(&mut self, alpha: &mut f32, dt: f32) -> bool;

    fn is_finished(&self) -> bool;

    /// Applied by the owning sprite when the effect finishes.
    fn after(&self) -> AfterFade {
        AfterFade::Keep
    }
}

/// Linear fade from opaque to transparent over [`FADE_OUT_SECONDS`].
#[derive(Debug, Clone)]
pub struct FadeOut {
    time: f32,
    finished: bool,
    after: AfterFade,
}

impl FadeOut {
    pub fn new(after: AfterFade) -> Self {
        Self {
            time: 0.0,
            finished: false,
            after,
        }
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.time
    }
}

impl Effect for FadeOut {
    fn update(&mut self, alpha: &mut f32, dt: f32) -> bool {
        if self.finished {
            return false;
        }
        self.time += dt;
        *alpha = (1.0 - self.time / FADE_OUT_SECONDS).max(0.0);
        if self.time >= FADE_OUT_SECONDS {
            self.finished = true;
            return true;
        }
        false
    }

    #[inline]
    fn is_finished(&self) -> bool {
        self.finished
    }

    #[inline]
    fn after(&self) -> AfterFade {
        self.after
    }
}
