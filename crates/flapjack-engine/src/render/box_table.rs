use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use image::{DynamicImage, RgbaImage};

use crate::sprite::MaskColor;

/// Bounding box of one mask color, in atlas pixels with +Y up.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct AtlasBox {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl AtlasBox {
    fn at(x: f32, y: f32) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    fn include(&mut self, x: f32, y: f32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.min_x <= x && x <= self.max_x && self.min_y <= y && y <= self.max_y
    }
}

/// Mask color to atlas region lookup, built once from a mask image.
///
/// Every opaque mask pixel `(x, y)` is recorded at `(x, height - y)` so boxes
/// share the +Y up convention of the shaders. Colors get indices in
/// first-seen order (row-major scan); the index is what the GPU sees.
#[derive(Debug, Clone, Default)]
pub struct BoxTable {
    boxes: Vec<AtlasBox>,
    index: HashMap<MaskColor, usize>,
    mask_size: (u32, u32),
}

impl BoxTable {
    pub fn build(mask: &RgbaImage) -> Self {
        let height = mask.height();
        let mut boxes: Vec<AtlasBox> = Vec::new();
        let mut index: HashMap<MaskColor, usize> = HashMap::new();

        for (x, y, pixel) in mask.enumerate_pixels() {
            if pixel.0[3] == 0 {
                continue;
            }
            let px = x as f32;
            let py = (height - y) as f32;
            let color = MaskColor::from_pixel(pixel);
            match index.get(&color) {
                Some(&i) => boxes[i].include(px, py),
                None => {
                    index.insert(color, boxes.len());
                    boxes.push(AtlasBox::at(px, py));
                }
            }
        }

        log::debug!(
            "box table: {} colors from {}x{} mask",
            boxes.len(),
            mask.width(),
            height
        );

        Self {
            boxes,
            index,
            mask_size: mask.dimensions(),
        }
    }

    /// Converts `mask` to RGBA8 first if needed.
    pub fn from_image(mask: &DynamicImage) -> Self {
        match mask.as_rgba8() {
            Some(rgba) => Self::build(rgba),
            None => Self::build(&mask.to_rgba8()),
        }
    }

    #[inline]
    pub fn index_of(&self, color: MaskColor) -> Option<usize> {
        self.index.get(&color).copied()
    }

    #[inline]
    pub fn get(&self, color: MaskColor) -> Option<&AtlasBox> {
        self.index_of(color).map(|i| &self.boxes[i])
    }

    /// Boxes in index order.
    #[inline]
    pub fn boxes(&self) -> &[AtlasBox] {
        &self.boxes
    }

    /// Boxes flattened to `vec4` components for uniform upload.
    #[inline]
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.boxes)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    #[inline]
    pub fn mask_size(&self) -> (u32, u32) {
        self.mask_size
    }
}
