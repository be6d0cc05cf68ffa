use core::fmt::Debug;

use super::{
    BufferTarget, BufferUsage, ClearColor, GpuLimits, Primitive, ScalarType, ShaderStage,
    TextureOptions,
};

/// The subset of OpenGL the renderer is built on.
///
/// Every call mutates or reads the context's global binding state; nothing here
/// remembers what was bound before. Handles are plain copyable values and are
/// always passed explicitly.
///
/// Implementations must only be used on the thread that owns the current context.
pub trait GpuApi {
    type Buffer: Copy + Eq + Debug;
    type Texture: Copy + Eq + Debug;
    type Shader: Copy + Eq + Debug;
    type Program: Copy + Eq + Debug;
    type VertexArray: Copy + Eq + Debug;
    type UniformLocation: Clone + Debug;

    // ── buffers ───────────────────────────────────────────────────────────

    fn create_buffer(&self) -> Result<Self::Buffer, String>;
    fn delete_buffer(&self, buffer: Self::Buffer);
    fn bind_buffer(&self, target: BufferTarget, buffer: Option<Self::Buffer>);
    /// Replaces the whole data store of the buffer bound to `target`.
    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage);

    // ── textures ──────────────────────────────────────────────────────────

    fn create_texture(&self) -> Result<Self::Texture, String>;
    fn delete_texture(&self, texture: Self::Texture);
    /// Selects texture unit `unit` (`TEXTURE0 + unit`).
    fn active_texture(&self, unit: u32);
    fn bind_texture(&self, texture: Option<Self::Texture>);
    /// Uploads level 0 of the bound 2D texture from tightly packed RGBA8 rows.
    fn tex_image_rgba8(&self, width: u32, height: u32, pixels: &[u8]);
    fn set_texture_options(&self, options: TextureOptions);
    fn generate_mipmap(&self);

    // ── shaders and programs ──────────────────────────────────────────────

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String>;
    fn shader_source(&self, shader: Self::Shader, source: &str);
    fn compile_shader(&self, shader: Self::Shader);
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&self, shader: Self::Shader);

    fn create_program(&self) -> Result<Self::Program, String>;
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn link_program(&self, program: Self::Program);
    fn program_link_status(&self, program: Self::Program) -> bool;
    fn validate_program(&self, program: Self::Program);
    fn program_validate_status(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn delete_program(&self, program: Self::Program);
    fn use_program(&self, program: Option<Self::Program>);

    /// Location of an active vertex input, `None` if the program has no such input.
    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32>;
    fn uniform_location(&self, program: Self::Program, name: &str)
    -> Option<Self::UniformLocation>;

    fn uniform_1_i32(&self, location: &Self::UniformLocation, value: i32);
    fn uniform_2_f32(&self, location: &Self::UniformLocation, x: f32, y: f32);
    /// Uploads `values.len() / 4` consecutive `vec4`s starting at `location`.
    fn uniform_4_f32_slice(&self, location: &Self::UniformLocation, values: &[f32]);

    // ── vertex layout ─────────────────────────────────────────────────────

    fn create_vertex_array(&self) -> Result<Self::VertexArray, String>;
    fn delete_vertex_array(&self, vertex_array: Self::VertexArray);
    fn bind_vertex_array(&self, vertex_array: Option<Self::VertexArray>);
    fn enable_vertex_attrib(&self, location: u32);
    fn disable_vertex_attrib(&self, location: u32);
    /// Points `location` at the bound vertex buffer: tightly packed, offset 0,
    /// not normalized.
    fn vertex_attrib_pointer(&self, location: u32, components: i32, scalar: ScalarType);

    fn draw_arrays(&self, primitive: Primitive, first: i32, count: i32);

    // ── frame state ───────────────────────────────────────────────────────

    /// Fixed state for 2D compositing: no depth test, straight-alpha blending.
    fn init_state(&self);
    fn set_viewport(&self, width: i32, height: i32);
    fn clear(&self, color: ClearColor);
    fn limits(&self) -> GpuLimits;
}
