//! Procedural atlas and mask used when no PNGs are given.
//!
//! Both images share one layout: each sprite owns a rectangle, painted with
//! artwork on the atlas and with the sprite's key color on the mask.

use flapjack_engine::sprite::MaskColor;
use image::{Rgba, RgbaImage};

pub const BACKGROUND: MaskColor = MaskColor::new(0x70, 0xc5, 0xce);
pub const FLOOR: MaskColor = MaskColor::new(0xde, 0xd8, 0x95);
pub const UPPER_PILLAR: MaskColor = MaskColor::new(0x73, 0xbf, 0x2e);
pub const LOWER_PILLAR: MaskColor = MaskColor::new(0x55, 0x80, 0x22);
pub const TAP_TO_START: MaskColor = MaskColor::new(0xff, 0x29, 0x0d);

pub const ATLAS_WIDTH: u32 = 256;
pub const ATLAS_HEIGHT: u32 = 320;

/// Sprite region in image coordinates (top-left origin).
#[derive(Debug, Copy, Clone)]
struct Region {
    color: MaskColor,
    x: u32,
    y: u32,
    w: u32,
    h: u32,
}

impl Region {
    fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.x + self.w && y >= self.y && y < self.y + self.h
    }
}

const REGIONS: [Region; 5] = [
    Region { color: BACKGROUND, x: 0, y: 0, w: 144, h: 256 },
    Region { color: UPPER_PILLAR, x: 144, y: 0, w: 26, h: 160 },
    Region { color: LOWER_PILLAR, x: 170, y: 0, w: 26, h: 160 },
    Region { color: TAP_TO_START, x: 196, y: 0, w: 56, h: 40 },
    Region { color: FLOOR, x: 0, y: 256, w: 168, h: 56 },
];

/// Height of each pillar sprite in logical units.
pub const PILLAR_HEIGHT: f32 = 160.0;
pub const PILLAR_WIDTH: f32 = 26.0;

fn rgba(c: MaskColor, a: u8) -> Rgba<u8> {
    let [r, g, b] = c.rgb();
    Rgba([r, g, b, a])
}

fn shade(c: MaskColor, f: f32) -> Rgba<u8> {
    let [r, g, b] = c.rgb();
    let s = |v: u8| (v as f32 * f).clamp(0.0, 255.0) as u8;
    Rgba([s(r), s(g), s(b), 255])
}

/// Key-color mask: every region filled with its color, the rest transparent.
pub fn mask() -> RgbaImage {
    RgbaImage::from_fn(ATLAS_WIDTH, ATLAS_HEIGHT, |x, y| {
        match REGIONS.iter().find(|r| r.contains(x, y)) {
            Some(r) => rgba(r.color, 255),
            None => Rgba([0, 0, 0, 0]),
        }
    })
}

/// Artwork for every region.
pub fn atlas() -> RgbaImage {
    RgbaImage::from_fn(ATLAS_WIDTH, ATLAS_HEIGHT, |x, y| {
        let Some(r) = REGIONS.iter().find(|r| r.contains(x, y)) else {
            return Rgba([0, 0, 0, 0]);
        };
        let (lx, ly) = (x - r.x, y - r.y);
        match r.color {
            BACKGROUND => {
                // Skyline in the lower third.
                let skyline = 190 + ((lx / 9) * 7 % 23);
                if ly > skyline { shade(BACKGROUND, 0.85) } else { rgba(BACKGROUND, 255) }
            }
            UPPER_PILLAR | LOWER_PILLAR => {
                let edge = lx < 2 || lx + 2 >= r.w;
                let cap = if r.color == UPPER_PILLAR { ly + 12 >= r.h } else { ly < 12 };
                match (edge, cap) {
                    (true, _) => shade(r.color, 0.5),
                    (false, true) => shade(r.color, 1.2),
                    _ => rgba(r.color, 255),
                }
            }
            TAP_TO_START => {
                let border = lx < 2 || ly < 2 || lx + 2 >= r.w || ly + 2 >= r.h;
                if border { Rgba([255, 255, 255, 255]) } else { rgba(r.color, 230) }
            }
            FLOOR => {
                // Diagonal stripes repeating every 7 px so scrolling by 7 is seamless.
                if ly < 4 {
                    shade(UPPER_PILLAR, 0.9)
                } else if (lx + ly) % 7 < 3 {
                    shade(FLOOR, 0.9)
                } else {
                    rgba(FLOOR, 255)
                }
            }
            _ => rgba(r.color, 255),
        }
    })
}

#[cfg(test)]
mod tests {
    use flapjack_engine::render::BoxTable;

    use super::*;

    #[test]
    fn mask_yields_one_box_per_region() {
        let table = BoxTable::build(&mask());
        assert_eq!(table.len(), REGIONS.len());
        for r in REGIONS {
            let b = table.get(r.color).unwrap();
            assert_eq!(b.max_x - b.min_x + 1.0, r.w as f32);
            assert_eq!(b.max_y - b.min_y + 1.0, r.h as f32);
        }
    }

    #[test]
    fn atlas_and_mask_agree_on_coverage() {
        let (a, m) = (atlas(), mask());
        assert_eq!(a.dimensions(), m.dimensions());
        for (x, y, p) in m.enumerate_pixels() {
            assert_eq!(p.0[3] == 0, a.get_pixel(x, y).0[3] == 0, "pixel ({x}, {y})");
        }
    }

    #[test]
    fn regions_do_not_overlap() {
        for (i, a) in REGIONS.iter().enumerate() {
            for b in &REGIONS[i + 1..] {
                let apart = a.x + a.w <= b.x || b.x + b.w <= a.x || a.y + a.h <= b.y || b.y + b.h <= a.y;
                assert!(apart, "{} overlaps {}", a.color, b.color);
            }
        }
    }
}
