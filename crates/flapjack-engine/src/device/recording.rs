//! In-memory `GpuApi` that records every call. Test-only.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use super::{
    BufferTarget, BufferUsage, ClearColor, GpuApi, GpuLimits, Primitive, ScalarType, ShaderStage,
    TextureOptions,
};

/// One recorded GL call. Handles are the integers handed out by [`RecordingGpu`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    CreateBuffer(u32),
    DeleteBuffer(u32),
    BindBuffer(BufferTarget, Option<u32>),
    BufferData { target: BufferTarget, data: Vec<u8>, usage: BufferUsage },
    CreateTexture(u32),
    DeleteTexture(u32),
    ActiveTexture(u32),
    BindTexture(Option<u32>),
    TexImage { width: u32, height: u32, len: usize },
    TextureOptions(TextureOptions),
    GenerateMipmap,
    CreateShader(u32, ShaderStage),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader(u32, u32),
    LinkProgram(u32),
    ValidateProgram(u32),
    DeleteProgram(u32),
    UseProgram(Option<u32>),
    Uniform1i(String, i32),
    Uniform2f(String, f32, f32),
    Uniform4fv(String, Vec<f32>),
    CreateVertexArray(u32),
    DeleteVertexArray(u32),
    BindVertexArray(Option<u32>),
    EnableAttrib(u32),
    DisableAttrib(u32),
    AttribPointer { location: u32, components: i32, scalar: ScalarType },
    DrawArrays(Primitive, i32, i32),
    InitState,
    Viewport(i32, i32),
    Clear(ClearColor),
}

/// Fake GL context.
///
/// The "linked program" exposes the attribute and uniform names configured with
/// [`with_attributes`](Self::with_attributes) / [`with_uniforms`](Self::with_uniforms);
/// attribute locations are assigned in declaration order.
#[derive(Default)]
pub(crate) struct RecordingGpu {
    next_handle: Cell<u32>,
    calls: RefCell<Vec<Call>>,
    attributes: Vec<String>,
    uniforms: HashSet<String>,
    shader_stages: RefCell<Vec<(u32, ShaderStage)>>,
    fail_compile: Option<ShaderStage>,
    fail_link: bool,
    fail_validate: bool,
    refuse_textures: Cell<bool>,
}

impl RecordingGpu {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_attributes(mut self, names: &[&str]) -> Self {
        self.attributes = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub(crate) fn with_uniforms(mut self, names: &[&str]) -> Self {
        self.uniforms = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub(crate) fn failing_compile(mut self, stage: ShaderStage) -> Self {
        self.fail_compile = Some(stage);
        self
    }

    pub(crate) fn failing_link(mut self) -> Self {
        self.fail_link = true;
        self
    }

    pub(crate) fn failing_validate(mut self) -> Self {
        self.fail_validate = true;
        self
    }

    /// Makes `create_texture` fail until switched back off.
    pub(crate) fn refuse_textures(&self, refuse: bool) {
        self.refuse_textures.set(refuse);
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub(crate) fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn fresh(&self) -> u32 {
        let h = self.next_handle.get() + 1;
        self.next_handle.set(h);
        h
    }
}

impl GpuApi for RecordingGpu {
    type Buffer = u32;
    type Texture = u32;
    type Shader = u32;
    type Program = u32;
    type VertexArray = u32;
    type UniformLocation = String;

    fn create_buffer(&self) -> Result<u32, String> {
        let h = self.fresh();
        self.record(Call::CreateBuffer(h));
        Ok(h)
    }

    fn delete_buffer(&self, buffer: u32) {
        self.record(Call::DeleteBuffer(buffer));
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<u32>) {
        self.record(Call::BindBuffer(target, buffer));
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage) {
        self.record(Call::BufferData { target, data: data.to_vec(), usage });
    }

    fn create_texture(&self) -> Result<u32, String> {
        if self.refuse_textures.get() {
            return Err("out of texture names".to_string());
        }
        let h = self.fresh();
        self.record(Call::CreateTexture(h));
        Ok(h)
    }

    fn delete_texture(&self, texture: u32) {
        self.record(Call::DeleteTexture(texture));
    }

    fn active_texture(&self, unit: u32) {
        self.record(Call::ActiveTexture(unit));
    }

    fn bind_texture(&self, texture: Option<u32>) {
        self.record(Call::BindTexture(texture));
    }

    fn tex_image_rgba8(&self, width: u32, height: u32, pixels: &[u8]) {
        self.record(Call::TexImage { width, height, len: pixels.len() });
    }

    fn set_texture_options(&self, options: TextureOptions) {
        self.record(Call::TextureOptions(options));
    }

    fn generate_mipmap(&self) {
        self.record(Call::GenerateMipmap);
    }

    fn create_shader(&self, stage: ShaderStage) -> Result<u32, String> {
        let h = self.fresh();
        self.shader_stages.borrow_mut().push((h, stage));
        self.record(Call::CreateShader(h, stage));
        Ok(h)
    }

    fn shader_source(&self, _shader: u32, _source: &str) {}

    fn compile_shader(&self, shader: u32) {
        self.record(Call::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        let stage = self
            .shader_stages
            .borrow()
            .iter()
            .find(|(h, _)| *h == shader)
            .map(|(_, s)| *s);
        stage.is_none() || stage != self.fail_compile
    }

    fn shader_info_log(&self, shader: u32) -> String {
        if self.shader_compile_status(shader) {
            String::new()
        } else {
            "0:1(1): error: syntax error".to_string()
        }
    }

    fn delete_shader(&self, shader: u32) {
        self.record(Call::DeleteShader(shader));
    }

    fn create_program(&self) -> Result<u32, String> {
        let h = self.fresh();
        self.record(Call::CreateProgram(h));
        Ok(h)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.record(Call::AttachShader(program, shader));
    }

    fn link_program(&self, program: u32) {
        self.record(Call::LinkProgram(program));
    }

    fn program_link_status(&self, _program: u32) -> bool {
        !self.fail_link
    }

    fn validate_program(&self, program: u32) {
        self.record(Call::ValidateProgram(program));
    }

    fn program_validate_status(&self, _program: u32) -> bool {
        !self.fail_validate
    }

    fn program_info_log(&self, _program: u32) -> String {
        if self.fail_link || self.fail_validate {
            "program log".to_string()
        } else {
            String::new()
        }
    }

    fn delete_program(&self, program: u32) {
        self.record(Call::DeleteProgram(program));
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(Call::UseProgram(program));
    }

    fn attrib_location(&self, _program: u32, name: &str) -> Option<u32> {
        self.attributes
            .iter()
            .position(|a| a == name)
            .map(|i| i as u32)
    }

    fn uniform_location(&self, _program: u32, name: &str) -> Option<String> {
        self.uniforms.contains(name).then(|| name.to_string())
    }

    fn uniform_1_i32(&self, location: &String, value: i32) {
        self.record(Call::Uniform1i(location.clone(), value));
    }

    fn uniform_2_f32(&self, location: &String, x: f32, y: f32) {
        self.record(Call::Uniform2f(location.clone(), x, y));
    }

    fn uniform_4_f32_slice(&self, location: &String, values: &[f32]) {
        self.record(Call::Uniform4fv(location.clone(), values.to_vec()));
    }

    fn create_vertex_array(&self) -> Result<u32, String> {
        let h = self.fresh();
        self.record(Call::CreateVertexArray(h));
        Ok(h)
    }

    fn delete_vertex_array(&self, vertex_array: u32) {
        self.record(Call::DeleteVertexArray(vertex_array));
    }

    fn bind_vertex_array(&self, vertex_array: Option<u32>) {
        self.record(Call::BindVertexArray(vertex_array));
    }

    fn enable_vertex_attrib(&self, location: u32) {
        self.record(Call::EnableAttrib(location));
    }

    fn disable_vertex_attrib(&self, location: u32) {
        self.record(Call::DisableAttrib(location));
    }

    fn vertex_attrib_pointer(&self, location: u32, components: i32, scalar: ScalarType) {
        self.record(Call::AttribPointer { location, components, scalar });
    }

    fn draw_arrays(&self, primitive: Primitive, first: i32, count: i32) {
        self.record(Call::DrawArrays(primitive, first, count));
    }

    fn init_state(&self) {
        self.record(Call::InitState);
    }

    fn set_viewport(&self, width: i32, height: i32) {
        self.record(Call::Viewport(width, height));
    }

    fn clear(&self, color: ClearColor) {
        self.record(Call::Clear(color));
    }

    fn limits(&self) -> GpuLimits {
        GpuLimits {
            max_vertex_uniform_blocks: 12,
            max_geometry_uniform_blocks: 12,
            max_fragment_uniform_blocks: 12,
            max_texture_image_units: 16,
        }
    }
}
