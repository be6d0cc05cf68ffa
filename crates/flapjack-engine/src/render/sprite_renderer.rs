use bytemuck::{Pod, Zeroable};
use image::DynamicImage;

use crate::device::{GpuApi, GpuError, GpuResult, Primitive, ScalarType, ShaderStage};
use crate::resource::{
    AttributeDecl, Buffer, GpuResource, Program, ShaderSource, Texture, TextureUnit,
};
use crate::sprite::SpriteView;

use super::{BoxTable, RendererConfig};

/// Size of the `boxes` uniform array in the sprite geometry shader.
pub const MAX_BOXES: usize = 64;

const SPRITE_ATTRIBUTE: &str = "sprite";
const ALPHA_ATTRIBUTE: &str = "alphaIn";
const BOXES_UNIFORM: &str = "boxes";
const SCREEN_SIZE_UNIFORM: &str = "screenSize";
const SAMPLER_UNIFORM: &str = "textureSampler";

/// Per-sprite record of the `sprite` attribute.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    pub x: f32,
    pub y: f32,
    pub angle: f32,
    /// Box table index, sent as a float and truncated in the shader.
    pub box_index: f32,
}

/// Draws every sprite of a frame with a single point-list draw call.
///
/// Each sprite becomes one point; the geometry stage expands it into a rotated
/// quad sized and textured from its atlas box. All sprites share one atlas.
///
/// Owns all of its GPU resources. Construction makes no GPU calls; everything
/// is allocated on the first draw. Call [`free`](Self::free) before the context
/// goes away.
pub struct SpriteRenderer<G: GpuApi> {
    program: Program<G>,
    boxes: BoxTable,
    atlas: Texture<G>,
    instances: Buffer<G>,
    alphas: Buffer<G>,
    unit: TextureUnit,
    config: RendererConfig,

    // CPU staging reused across frames.
    instance_data: Vec<SpriteInstance>,
    alpha_data: Vec<f32>,
    warned_dropped: bool,
}

impl<G: GpuApi> SpriteRenderer<G> {
    /// Builds a renderer from decoded atlas and mask images.
    pub fn new(
        shaders: Vec<ShaderSource>,
        atlas: DynamicImage,
        mask: &DynamicImage,
        config: RendererConfig,
    ) -> GpuResult<Self> {
        let boxes = BoxTable::from_image(mask);
        if boxes.len() > MAX_BOXES {
            return Err(GpuError::TooManyBoxes {
                count: boxes.len(),
                max: MAX_BOXES,
            });
        }
        if (atlas.width(), atlas.height()) != boxes.mask_size() {
            log::warn!(
                "atlas is {}x{} but mask is {}x{}; sprites will sample the wrong region",
                atlas.width(),
                atlas.height(),
                boxes.mask_size().0,
                boxes.mask_size().1,
            );
        }

        let program = Program::new(
            shaders,
            vec![
                AttributeDecl::new(SPRITE_ATTRIBUTE, 4, ScalarType::Float),
                AttributeDecl::new(ALPHA_ATTRIBUTE, 1, ScalarType::Float),
            ],
        )
        .with_uniforms([BOXES_UNIFORM, SCREEN_SIZE_UNIFORM, SAMPLER_UNIFORM]);

        Ok(Self {
            program,
            boxes,
            atlas: Texture::new(atlas, config.atlas),
            instances: Buffer::dynamic(),
            alphas: Buffer::dynamic(),
            unit: TextureUnit(config.texture_unit),
            config,
            instance_data: Vec::new(),
            alpha_data: Vec::new(),
            warned_dropped: false,
        })
    }

    #[inline]
    pub fn box_table(&self) -> &BoxTable {
        &self.boxes
    }

    #[inline]
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Allocates every GPU resource now instead of on the first draw.
    ///
    /// Surfaces shader and attribute errors at startup.
    pub fn prepare(&mut self, gl: &G) -> GpuResult<()> {
        self.program.handle(gl)?;
        self.atlas.handle(gl)?;
        self.instances.handle(gl)?;
        self.alphas.handle(gl)?;
        Ok(())
    }

    /// Draws `sprites` in order and returns how many were drawn.
    ///
    /// Sprites without a mask color, or whose color is not in the box table,
    /// are skipped.
    pub fn draw_sprites<I>(&mut self, gl: &G, sprites: I) -> GpuResult<usize>
    where
        I: IntoIterator,
        I::Item: SpriteView,
    {
        self.pack(sprites);
        let count = self.instance_data.len();

        let Self {
            program,
            boxes,
            atlas,
            instances,
            alphas,
            unit,
            config,
            instance_data,
            alpha_data,
            ..
        } = self;

        program.scoped_draw(
            gl,
            |scope| {
                instances.set_data(gl, instance_data.as_slice())?;
                alphas.set_data(gl, alpha_data.as_slice())?;
                scope.set_buffer(SPRITE_ATTRIBUTE, instances)?;
                scope.set_buffer(ALPHA_ATTRIBUTE, alphas)
            },
            |scope| {
                scope.set_uniform_vec4_array(BOXES_UNIFORM, boxes.as_floats())?;
                let size = config.logical_size;
                scope.set_uniform_vec2(SCREEN_SIZE_UNIFORM, size.width, size.height)?;
                scope.bind_texture(*unit, SAMPLER_UNIFORM, atlas)?;
                scope.draw(Primitive::Points, count);
                Ok(count)
            },
            |_| {},
        )
    }

    /// Releases every GPU resource. Safe to call more than once.
    pub fn free(&mut self, gl: &G) {
        self.program.free(gl);
        self.atlas.free(gl);
        self.instances.free(gl);
        self.alphas.free(gl);
    }

    /// Fills the staging vectors from `sprites`.
    fn pack<I>(&mut self, sprites: I)
    where
        I: IntoIterator,
        I::Item: SpriteView,
    {
        self.instance_data.clear();
        self.alpha_data.clear();
        let mut dropped = 0usize;

        for sprite in sprites {
            let Some(index) = sprite.mask_color().and_then(|c| self.boxes.index_of(c)) else {
                dropped += 1;
                continue;
            };
            let pos = sprite.position();
            self.instance_data.push(SpriteInstance {
                x: pos.x,
                y: pos.y,
                angle: sprite.angle(),
                box_index: index as f32,
            });
            self.alpha_data.push(sprite.alpha());
        }

        if dropped > 0 && !self.warned_dropped {
            self.warned_dropped = true;
            log::debug!("skipping {dropped} sprite(s) without a known mask color");
        }
    }
}

impl ShaderSource {
    /// The built-in sprite pipeline: vertex, geometry and fragment stages.
    pub fn sprite_set() -> Vec<ShaderSource> {
        vec![
            ShaderSource::new(ShaderStage::Vertex, include_str!("shaders/sprite.vert.glsl")),
            ShaderSource::new(ShaderStage::Geometry, include_str!("shaders/sprite.geom.glsl")),
            ShaderSource::new(ShaderStage::Fragment, include_str!("shaders/sprite.frag.glsl")),
        ]
    }
}
