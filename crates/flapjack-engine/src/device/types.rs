//! Backend-neutral enums for the handful of GL state values the renderer uses.

use core::fmt;

/// Programmable pipeline stage.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Geometry,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Geometry => "geometry",
            ShaderStage::Fragment => "fragment",
        };
        f.write_str(name)
    }
}

/// Binding point a buffer is attached to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BufferTarget {
    /// Vertex attribute source (`ARRAY_BUFFER`).
    Vertex,
    /// Element indices (`ELEMENT_ARRAY_BUFFER`).
    Index,
}

/// Upload frequency hint passed along with buffer data.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum BufferUsage {
    /// Written once, drawn many times.
    #[default]
    Static,
    /// Rewritten often (typically every frame).
    Dynamic,
    /// Written once, drawn a few times.
    Stream,
}

/// Primitive assembly mode for non-indexed draws.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Primitive {
    Points,
    Lines,
    Triangles,
    TriangleStrip,
}

/// Component type of a vertex attribute as stored in its buffer.
///
/// Every type is fed to the shader as float (no normalization).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ScalarType {
    Float,
    Int,
    UnsignedInt,
    UnsignedByte,
}

impl ScalarType {
    /// Size of one component in bytes.
    #[inline]
    pub const fn size(self) -> usize {
        match self {
            ScalarType::Float | ScalarType::Int | ScalarType::UnsignedInt => 4,
            ScalarType::UnsignedByte => 1,
        }
    }
}

/// Texture magnification filter.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MagFilter {
    Nearest,
    Linear,
}

/// Texture minification filter.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MinFilter {
    Nearest,
    Linear,
    NearestMipmapNearest,
    LinearMipmapNearest,
    NearestMipmapLinear,
    LinearMipmapLinear,
}

impl MinFilter {
    /// Returns true if sampling with this filter reads mip levels.
    #[inline]
    pub const fn uses_mipmaps(self) -> bool {
        !matches!(self, MinFilter::Nearest | MinFilter::Linear)
    }
}

/// Texture coordinate wrap mode (applied to both S and T).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Wrap {
    #[default]
    Repeat,
    ClampToEdge,
    MirroredRepeat,
}

/// Sampling configuration of a 2D texture.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureOptions {
    pub mag: MagFilter,
    pub min: MinFilter,
    pub wrap: Wrap,
}

impl TextureOptions {
    /// Unfiltered sampling; pixel art atlases use this.
    pub const NEAREST: Self = Self {
        mag: MagFilter::Nearest,
        min: MinFilter::Nearest,
        wrap: Wrap::Repeat,
    };
}

impl Default for TextureOptions {
    /// Trilinear sampling with repeat wrapping.
    fn default() -> Self {
        Self {
            mag: MagFilter::Linear,
            min: MinFilter::LinearMipmapLinear,
            wrap: Wrap::Repeat,
        }
    }
}

/// Straight-alpha RGBA clear color.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClearColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ClearColor {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn white() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }
}

impl Default for ClearColor {
    fn default() -> Self {
        Self::white()
    }
}
