//! The demo scene: a scrolling floor, pillar pairs and a "tap to start" sign.

use flapjack_engine::coords::{Vec2, Viewport};
use flapjack_engine::sprite::{AfterFade, Sprite};

use crate::atlas::{
    BACKGROUND, FLOOR, LOWER_PILLAR, PILLAR_HEIGHT, PILLAR_WIDTH, TAP_TO_START, UPPER_PILLAR,
};

/// Logical units everything scrolls per update tick.
const SCROLL_PER_TICK: f32 = 1.0;

const FLOOR_Y: f32 = -103.0;
const NOTCH_HEIGHT: f32 = 52.0;
const PILLAR_PAIRS: usize = 2;
const PILLAR_GAP: f32 = 90.0;
const FIRST_PILLAR_X: f32 = 120.0;
/// Vertical notch offsets, cycled as pillars wrap around.
const NOTCH_OFFSETS: [f32; 6] = [-20.0, 12.0, 30.0, -6.0, 0.0, 24.0];

/// Ground strip. Its artwork repeats every 7 units, so it only ever shifts
/// within `[-3, 4)` to look endless.
#[derive(Debug)]
pub struct Floor {
    pub sprite: Sprite,
    pub moving: bool,
    tick: f32,
}

impl Floor {
    fn new() -> Self {
        Self {
            sprite: Sprite::new(Some(FLOOR), Vec2::new(0.0, FLOOR_Y)),
            moving: true,
            tick: 0.0,
        }
    }

    fn update(&mut self, dt: f32) {
        if self.moving {
            self.tick = (self.tick + SCROLL_PER_TICK) % 14.0;
        }
        self.sprite.position.x = (-self.tick).rem_euclid(7.0) - 3.0;
        self.sprite.update(dt);
    }
}

#[derive(Debug)]
struct PillarPair {
    upper: Sprite,
    lower: Sprite,
    /// World x of the pair's center.
    x: f32,
    offset: f32,
}

impl PillarPair {
    fn place(&mut self, view_x: f32) {
        let x = self.x - view_x;
        self.upper.position = Vec2::new(x, (PILLAR_HEIGHT + NOTCH_HEIGHT) / 2.0 + self.offset);
        self.lower.position = Vec2::new(x, -(PILLAR_HEIGHT + NOTCH_HEIGHT) / 2.0 + self.offset);
    }
}

pub struct Scene {
    viewport: Viewport,
    background: Sprite,
    pillars: Vec<PillarPair>,
    pub floor: Floor,
    tap_to_start: Option<Sprite>,
    /// Colorless anchor for a score display; never drawn.
    score_anchor: Sprite,

    started: bool,
    view_x: f32,
    next_offset: usize,
}

impl Scene {
    pub fn new(viewport: Viewport) -> Self {
        let mut scene = Self {
            viewport,
            background: Sprite::new(Some(BACKGROUND), Vec2::zero()),
            pillars: Vec::with_capacity(PILLAR_PAIRS),
            floor: Floor::new(),
            tap_to_start: Some(Sprite::new(Some(TAP_TO_START), Vec2::new(0.0, -10.0))),
            score_anchor: Sprite::marker(Vec2::new(0.0, viewport.height / 2.0 - 30.0)),
            started: false,
            view_x: 0.0,
            next_offset: 0,
        };
        for i in 0..PILLAR_PAIRS {
            let offset = scene.take_offset();
            let mut pair = PillarPair {
                upper: Sprite::new(Some(UPPER_PILLAR), Vec2::zero()),
                lower: Sprite::new(Some(LOWER_PILLAR), Vec2::zero()),
                x: FIRST_PILLAR_X + i as f32 * PILLAR_GAP,
                offset,
            };
            pair.place(0.0);
            scene.pillars.push(pair);
        }
        scene
    }

    #[inline]
    pub fn started(&self) -> bool {
        self.started
    }

    /// Any key or click: starts scrolling and fades the sign out.
    pub fn press(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        if let Some(sign) = &mut self.tap_to_start {
            sign.fade_out(AfterFade::Remove);
        }
        log::info!("started");
    }

    pub fn update(&mut self, dt: f32) {
        self.floor.update(dt);

        if self.started {
            self.view_x += SCROLL_PER_TICK;
        }
        let left_edge = self.view_x - self.viewport.width / 2.0;
        for i in 0..self.pillars.len() {
            if self.pillars[i].x + PILLAR_WIDTH / 2.0 < left_edge {
                let offset = self.take_offset();
                let pair = &mut self.pillars[i];
                pair.x += PILLAR_GAP * PILLAR_PAIRS as f32;
                pair.offset = offset;
            }
            self.pillars[i].place(self.view_x);
        }

        if let Some(sign) = &mut self.tap_to_start {
            sign.update(dt);
            if sign.is_removed() {
                self.tap_to_start = None;
            }
        }
    }

    /// Sprites in draw order, back to front.
    pub fn sprites(&self) -> Vec<&Sprite> {
        let mut out = Vec::with_capacity(3 + 2 * self.pillars.len());
        out.push(&self.background);
        out.extend(self.pillars.iter().map(|p| &p.upper));
        out.extend(self.pillars.iter().map(|p| &p.lower));
        out.push(&self.floor.sprite);
        out.extend(self.tap_to_start.as_ref());
        out.push(&self.score_anchor);
        out
    }

    fn take_offset(&mut self) -> f32 {
        let offset = NOTCH_OFFSETS[self.next_offset % NOTCH_OFFSETS.len()];
        self.next_offset += 1;
        offset
    }
}

#[cfg(test)]
mod tests {
    use flapjack_engine::sprite::SpriteView;

    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn scene() -> Scene {
        Scene::new(Viewport::default())
    }

    #[test]
    fn floor_scrolls_within_one_stripe_period() {
        let mut s = scene();
        let mut xs = Vec::new();
        for _ in 0..14 {
            s.update(DT);
            xs.push(s.floor.sprite.position.x);
        }
        assert_eq!(xs[..7], [3.0, 2.0, 1.0, 0.0, -1.0, -2.0, -3.0]);
        assert_eq!(xs[7..], xs[..7]);
    }

    #[test]
    fn stopped_floor_stays_put() {
        let mut s = scene();
        s.update(DT);
        s.floor.moving = false;
        let x = s.floor.sprite.position.x;
        s.update(DT);
        assert_eq!(s.floor.sprite.position.x, x);
    }

    #[test]
    fn pillars_wait_for_start() {
        let mut s = scene();
        let before = s.pillars[0].upper.position;
        s.update(DT);
        assert_eq!(s.pillars[0].upper.position, before);

        s.press();
        s.update(DT);
        assert_eq!(s.pillars[0].upper.position.x, before.x - SCROLL_PER_TICK);
    }

    #[test]
    fn pillars_wrap_around() {
        let mut s = scene();
        s.press();
        let first_x = s.pillars[0].x;
        // Scroll until the first pair has fully left the screen.
        let ticks = (first_x + PILLAR_WIDTH / 2.0 + s.viewport.width / 2.0) as usize + 2;
        for _ in 0..ticks {
            s.update(DT);
        }
        assert_eq!(s.pillars[0].x, first_x + PILLAR_GAP * PILLAR_PAIRS as f32);
        assert_eq!(s.pillars[0].offset, NOTCH_OFFSETS[PILLAR_PAIRS]);
    }

    #[test]
    fn notch_separates_pair() {
        let s = scene();
        let p = &s.pillars[0];
        let gap = (p.upper.position.y - PILLAR_HEIGHT / 2.0) - (p.lower.position.y + PILLAR_HEIGHT / 2.0);
        assert!((gap - NOTCH_HEIGHT).abs() < 1e-4);
    }

    #[test]
    fn sign_fades_then_disappears() {
        let mut s = scene();
        let count = s.sprites().len();
        s.press();
        s.press();
        s.update(0.1);
        let sign_alpha = s.tap_to_start.as_ref().unwrap().alpha();
        assert!((sign_alpha - 0.5).abs() < 1e-5);

        s.update(0.1);
        s.update(0.1);
        assert!(s.tap_to_start.is_none());
        assert_eq!(s.sprites().len(), count - 1);
    }

    #[test]
    fn sprites_include_an_undrawn_marker() {
        let s = scene();
        let sprites = s.sprites();
        assert_eq!(sprites.iter().filter(|sp| sp.mask_color().is_none()).count(), 1);
        assert_eq!(sprites[0].mask_color(), Some(BACKGROUND));
    }
}
