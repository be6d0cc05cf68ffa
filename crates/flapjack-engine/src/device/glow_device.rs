//! `GpuApi` over a `glow` OpenGL 3.3 core context.
//!
//! Every `unsafe` block below relies on the single invariant established by
//! [`GlowDevice::new`]: the wrapped context is current on the calling thread.

use glow::HasContext;

use super::{
    BufferTarget, BufferUsage, ClearColor, GpuApi, GpuLimits, MagFilter, MinFilter, Primitive,
    ScalarType, ShaderStage, TextureOptions, Wrap,
};

/// OpenGL device backed by `glow`.
pub struct GlowDevice {
    gl: glow::Context,
}

impl GlowDevice {
    /// Wraps a loaded `glow` context.
    ///
    /// # Safety
    /// The context must be current on this thread whenever a method of the
    /// returned device is called, and must outlive every handle it creates.
    pub unsafe fn new(gl: glow::Context) -> Self {
        Self { gl }
    }

    /// Escape hatch for state the renderer does not model.
    pub fn raw(&self) -> &glow::Context {
        &self.gl
    }
}

impl GpuApi for GlowDevice {
    type Buffer = <glow::Context as HasContext>::Buffer;
    type Texture = <glow::Context as HasContext>::Texture;
    type Shader = <glow::Context as HasContext>::Shader;
    type Program = <glow::Context as HasContext>::Program;
    type VertexArray = <glow::Context as HasContext>::VertexArray;
    type UniformLocation = <glow::Context as HasContext>::UniformLocation;

    fn create_buffer(&self) -> Result<Self::Buffer, String> {
        unsafe { self.gl.create_buffer() }
    }

    fn delete_buffer(&self, buffer: Self::Buffer) {
        unsafe { self.gl.delete_buffer(buffer) }
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<Self::Buffer>) {
        unsafe { self.gl.bind_buffer(buffer_target(target), buffer) }
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage) {
        unsafe {
            self.gl
                .buffer_data_u8_slice(buffer_target(target), data, buffer_usage(usage))
        }
    }

    fn create_texture(&self) -> Result<Self::Texture, String> {
        unsafe { self.gl.create_texture() }
    }

    fn delete_texture(&self, texture: Self::Texture) {
        unsafe { self.gl.delete_texture(texture) }
    }

    fn active_texture(&self, unit: u32) {
        unsafe { self.gl.active_texture(glow::TEXTURE0 + unit) }
    }

    fn bind_texture(&self, texture: Option<Self::Texture>) {
        unsafe { self.gl.bind_texture(glow::TEXTURE_2D, texture) }
    }

    fn tex_image_rgba8(&self, width: u32, height: u32, pixels: &[u8]) {
        unsafe {
            // Rows are tightly packed.
            self.gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(pixels)),
            );
        }
    }

    fn set_texture_options(&self, options: TextureOptions) {
        let wrap = wrap_mode(options.wrap) as i32;
        unsafe {
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, wrap);
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, wrap);
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                mag_filter(options.mag) as i32,
            );
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                min_filter(options.min) as i32,
            );
        }
    }

    fn generate_mipmap(&self) {
        unsafe { self.gl.generate_mipmap(glow::TEXTURE_2D) }
    }

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String> {
        unsafe { self.gl.create_shader(shader_stage(stage)) }
    }

    fn shader_source(&self, shader: Self::Shader, source: &str) {
        unsafe { self.gl.shader_source(shader, source) }
    }

    fn compile_shader(&self, shader: Self::Shader) {
        unsafe { self.gl.compile_shader(shader) }
    }

    fn shader_compile_status(&self, shader: Self::Shader) -> bool {
        unsafe { self.gl.get_shader_compile_status(shader) }
    }

    fn shader_info_log(&self, shader: Self::Shader) -> String {
        unsafe { self.gl.get_shader_info_log(shader) }
    }

    fn delete_shader(&self, shader: Self::Shader) {
        unsafe { self.gl.delete_shader(shader) }
    }

    fn create_program(&self) -> Result<Self::Program, String> {
        unsafe { self.gl.create_program() }
    }

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { self.gl.attach_shader(program, shader) }
    }

    fn link_program(&self, program: Self::Program) {
        unsafe { self.gl.link_program(program) }
    }

    fn program_link_status(&self, program: Self::Program) -> bool {
        unsafe { self.gl.get_program_link_status(program) }
    }

    fn validate_program(&self, program: Self::Program) {
        unsafe { self.gl.validate_program(program) }
    }

    fn program_validate_status(&self, program: Self::Program) -> bool {
        unsafe { self.gl.get_program_parameter_i32(program, glow::VALIDATE_STATUS) != 0 }
    }

    fn program_info_log(&self, program: Self::Program) -> String {
        unsafe { self.gl.get_program_info_log(program) }
    }

    fn delete_program(&self, program: Self::Program) {
        unsafe { self.gl.delete_program(program) }
    }

    fn use_program(&self, program: Option<Self::Program>) {
        unsafe { self.gl.use_program(program) }
    }

    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32> {
        unsafe { self.gl.get_attrib_location(program, name) }
    }

    fn uniform_location(
        &self,
        program: Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation> {
        unsafe { self.gl.get_uniform_location(program, name) }
    }

    fn uniform_1_i32(&self, location: &Self::UniformLocation, value: i32) {
        unsafe { self.gl.uniform_1_i32(Some(location), value) }
    }

    fn uniform_2_f32(&self, location: &Self::UniformLocation, x: f32, y: f32) {
        unsafe { self.gl.uniform_2_f32(Some(location), x, y) }
    }

    fn uniform_4_f32_slice(&self, location: &Self::UniformLocation, values: &[f32]) {
        unsafe { self.gl.uniform_4_f32_slice(Some(location), values) }
    }

    fn create_vertex_array(&self) -> Result<Self::VertexArray, String> {
        unsafe { self.gl.create_vertex_array() }
    }

    fn delete_vertex_array(&self, vertex_array: Self::VertexArray) {
        unsafe { self.gl.delete_vertex_array(vertex_array) }
    }

    fn bind_vertex_array(&self, vertex_array: Option<Self::VertexArray>) {
        unsafe { self.gl.bind_vertex_array(vertex_array) }
    }

    fn enable_vertex_attrib(&self, location: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(location) }
    }

    fn disable_vertex_attrib(&self, location: u32) {
        unsafe { self.gl.disable_vertex_attrib_array(location) }
    }

    fn vertex_attrib_pointer(&self, location: u32, components: i32, scalar: ScalarType) {
        unsafe {
            self.gl
                .vertex_attrib_pointer_f32(location, components, scalar_type(scalar), false, 0, 0)
        }
    }

    fn draw_arrays(&self, primitive: Primitive, first: i32, count: i32) {
        unsafe { self.gl.draw_arrays(primitive_mode(primitive), first, count) }
    }

    fn init_state(&self) {
        unsafe {
            self.gl.disable(glow::DEPTH_TEST);
            self.gl.enable(glow::BLEND);
            self.gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
        }
    }

    fn set_viewport(&self, width: i32, height: i32) {
        unsafe { self.gl.viewport(0, 0, width, height) }
    }

    fn clear(&self, color: ClearColor) {
        unsafe {
            self.gl.clear_color(color.r, color.g, color.b, color.a);
            self.gl.clear(glow::COLOR_BUFFER_BIT);
        }
    }

    fn limits(&self) -> GpuLimits {
        unsafe {
            GpuLimits {
                max_vertex_uniform_blocks: self.gl.get_parameter_i32(glow::MAX_VERTEX_UNIFORM_BLOCKS),
                max_geometry_uniform_blocks: self
                    .gl
                    .get_parameter_i32(glow::MAX_GEOMETRY_UNIFORM_BLOCKS),
                max_fragment_uniform_blocks: self
                    .gl
                    .get_parameter_i32(glow::MAX_FRAGMENT_UNIFORM_BLOCKS),
                max_texture_image_units: self.gl.get_parameter_i32(glow::MAX_TEXTURE_IMAGE_UNITS),
            }
        }
    }
}

// ── enum mapping ──────────────────────────────────────────────────────────

fn buffer_target(target: BufferTarget) -> u32 {
    match target {
        BufferTarget::Vertex => glow::ARRAY_BUFFER,
        BufferTarget::Index => glow::ELEMENT_ARRAY_BUFFER,
    }
}

fn buffer_usage(usage: BufferUsage) -> u32 {
    match usage {
        BufferUsage::Static => glow::STATIC_DRAW,
        BufferUsage::Dynamic => glow::DYNAMIC_DRAW,
        BufferUsage::Stream => glow::STREAM_DRAW,
    }
}

fn shader_stage(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Geometry => glow::GEOMETRY_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

fn primitive_mode(primitive: Primitive) -> u32 {
    match primitive {
        Primitive::Points => glow::POINTS,
        Primitive::Lines => glow::LINES,
        Primitive::Triangles => glow::TRIANGLES,
        Primitive::TriangleStrip => glow::TRIANGLE_STRIP,
    }
}

fn scalar_type(scalar: ScalarType) -> u32 {
    match scalar {
        ScalarType::Float => glow::FLOAT,
        ScalarType::Int => glow::INT,
        ScalarType::UnsignedInt => glow::UNSIGNED_INT,
        ScalarType::UnsignedByte => glow::UNSIGNED_BYTE,
    }
}

fn mag_filter(filter: MagFilter) -> u32 {
    match filter {
        MagFilter::Nearest => glow::NEAREST,
        MagFilter::Linear => glow::LINEAR,
    }
}

fn min_filter(filter: MinFilter) -> u32 {
    match filter {
        MinFilter::Nearest => glow::NEAREST,
        MinFilter::Linear => glow::LINEAR,
        MinFilter::NearestMipmapNearest => glow::NEAREST_MIPMAP_NEAREST,
        MinFilter::LinearMipmapNearest => glow::LINEAR_MIPMAP_NEAREST,
        MinFilter::NearestMipmapLinear => glow::NEAREST_MIPMAP_LINEAR,
        MinFilter::LinearMipmapLinear => glow::LINEAR_MIPMAP_LINEAR,
    }
}

fn wrap_mode(wrap: Wrap) -> u32 {
    match wrap {
        Wrap::Repeat => glow::REPEAT,
        Wrap::ClampToEdge => glow::CLAMP_TO_EDGE,
        Wrap::MirroredRepeat => glow::MIRRORED_REPEAT,
    }
}
