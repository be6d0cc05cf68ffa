use std::borrow::Cow;
use std::collections::HashMap;

use crate::device::{GpuApi, GpuError, GpuResult, Primitive, ScalarType, ShaderStage};

use super::{Buffer, DrawScope, GpuResource, ResourceSlot};

/// GLSL source for one pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub stage: ShaderStage,
    pub source: Cow<'static, str>,
}

impl ShaderSource {
    #[inline]
    pub fn new(stage: ShaderStage, source: impl Into<Cow<'static, str>>) -> Self {
        Self {
            stage,
            source: source.into(),
        }
    }
}

/// A vertex input the program must expose, and how its buffer is laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDecl {
    pub name: Cow<'static, str>,
    pub components: i32,
    pub scalar: ScalarType,
}

impl AttributeDecl {
    #[inline]
    pub fn new(name: impl Into<Cow<'static, str>>, components: i32, scalar: ScalarType) -> Self {
        Self {
            name: name.into(),
            components,
            scalar,
        }
    }
}

/// A resolved attribute location plus its buffer layout.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexSlot {
    pub location: u32,
    pub components: i32,
    pub scalar: ScalarType,
}

impl VertexSlot {
    /// Sources this slot from `buffer`: tightly packed, offset 0, not normalized.
    pub fn set_buffer<G: GpuApi>(&self, gl: &G, buffer: &mut Buffer<G>) -> GpuResult<()> {
        let handle = buffer.handle(gl)?;
        gl.bind_buffer(buffer.target(), Some(handle));
        gl.vertex_attrib_pointer(self.location, self.components, self.scalar);
        Ok(())
    }
}

/// Linked shader program plus the vertex array that feeds it.
///
/// Allocation compiles and links every stage, validates the program, creates
/// the vertex array and resolves every declared attribute and uniform. Any
/// missing name is an error. Sources are dropped once allocation succeeds.
pub struct Program<G: GpuApi> {
    slot: ResourceSlot<G::Program>,
    sources: Option<Vec<ShaderSource>>,
    attributes: Vec<AttributeDecl>,
    declared_uniforms: Vec<Cow<'static, str>>,

    vertex_array: Option<G::VertexArray>,
    /// Resolved in declaration order at allocation.
    slots: Vec<(Cow<'static, str>, VertexSlot)>,
    attrib_cache: HashMap<String, u32>,
    uniform_cache: HashMap<String, G::UniformLocation>,
}

impl<G: GpuApi> Program<G> {
    pub fn new(sources: Vec<ShaderSource>, attributes: Vec<AttributeDecl>) -> Self {
        Self {
            slot: ResourceSlot::new("shader program"),
            sources: Some(sources),
            attributes,
            declared_uniforms: Vec::new(),
            vertex_array: None,
            slots: Vec::new(),
            attrib_cache: HashMap::new(),
            uniform_cache: HashMap::new(),
        }
    }

    /// Uniforms resolved at allocation; a missing one fails allocation.
    pub fn with_uniforms<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        self.declared_uniforms = names.into_iter().map(Into::into).collect();
        self
    }

    #[inline]
    pub fn attributes(&self) -> &[AttributeDecl] {
        &self.attributes
    }

    /// Resolved attribute slots, empty until allocated.
    #[inline]
    pub fn slots(&self) -> impl Iterator<Item = (&str, VertexSlot)> {
        self.slots.iter().map(|(n, s)| (n.as_ref(), *s))
    }

    #[inline]
    pub(crate) fn vertex_array(&self) -> Option<G::VertexArray> {
        self.vertex_array
    }

    /// Location of a uniform, memoized.
    pub fn get_uniform_location(&mut self, gl: &G, name: &str) -> GpuResult<G::UniformLocation> {
        let program = self.handle(gl)?;
        if let Some(location) = self.uniform_cache.get(name) {
            return Ok(location.clone());
        }
        let location = gl
            .uniform_location(program, name)
            .ok_or_else(|| GpuError::UniformNotFound(name.to_string()))?;
        self.uniform_cache.insert(name.to_string(), location.clone());
        Ok(location)
    }

    /// Location of a vertex input, memoized.
    pub fn get_attrib_location(&mut self, gl: &G, name: &str) -> GpuResult<u32> {
        let program = self.handle(gl)?;
        if let Some(slot) = self.slot_for(name) {
            return Ok(slot.location);
        }
        if let Some(&location) = self.attrib_cache.get(name) {
            return Ok(location);
        }
        let location = gl
            .attrib_location(program, name)
            .ok_or_else(|| GpuError::AttributeNotFound(name.to_string()))?;
        self.attrib_cache.insert(name.to_string(), location);
        Ok(location)
    }

    /// Sources the declared attribute `name` from `buffer`.
    pub fn set_buffer(&mut self, gl: &G, name: &str, buffer: &mut Buffer<G>) -> GpuResult<()> {
        self.handle(gl)?;
        let slot = self
            .slot_for(name)
            .ok_or_else(|| GpuError::AttributeNotFound(name.to_string()))?;
        slot.set_buffer(gl, buffer)
    }

    /// Non-indexed draw of `count` vertices starting at 0.
    ///
    /// Counts beyond `i32::MAX` are clamped to it.
    pub fn draw(&self, gl: &G, primitive: Primitive, count: usize) {
        let count = i32::try_from(count).unwrap_or_else(|_| {
            log::error!("draw of {count} vertices exceeds the GL limit; clamped to {}", i32::MAX);
            i32::MAX
        });
        gl.draw_arrays(primitive, 0, count);
    }

    /// Runs `prepare` then `draw` with the program active, its vertex array bound
    /// and every declared attribute enabled; `finish` runs afterwards.
    ///
    /// Attributes are disabled and the program deactivated when the scope ends,
    /// whether the closures succeed, fail, or unwind. `finish` is skipped only on
    /// unwind. The first error from `prepare`/`draw` is returned.
    pub fn scoped_draw<R, P, D, F>(
        &mut self,
        gl: &G,
        prepare: P,
        draw: D,
        finish: F,
    ) -> GpuResult<R>
    where
        P: FnOnce(&mut DrawScope<'_, G>) -> GpuResult<()>,
        D: FnOnce(&mut DrawScope<'_, G>) -> GpuResult<R>,
        F: FnOnce(&mut DrawScope<'_, G>),
    {
        let handle = self.handle(gl)?;
        let mut scope = DrawScope::enter(gl, self, handle);
        let result = prepare(&mut scope).and_then(|()| draw(&mut scope));
        finish(&mut scope);
        result
    }

    pub(crate) fn slot_for(&self, name: &str) -> Option<VertexSlot> {
        self.slots
            .iter()
            .find(|(n, _)| n.as_ref() == name)
            .map(|(_, s)| *s)
    }

    /// Compile, link, validate, then build the vertex layout.
    fn build(&mut self, gl: &G, program: G::Program, sources: &[ShaderSource]) -> GpuResult<()> {
        let mut shaders = Vec::with_capacity(sources.len());
        let attached = attach_stages(gl, program, sources, &mut shaders);
        if attached.is_ok() {
            gl.link_program(program);
        }
        // Stage objects are only needed until link.
        for shader in shaders {
            gl.delete_shader(shader);
        }
        attached?;

        if !gl.program_link_status(program) {
            let log = gl.program_info_log(program);
            log::error!("program info log:\n{log}");
            return Err(GpuError::Link { log });
        }

        gl.validate_program(program);
        if !gl.program_validate_status(program) {
            let log = gl.program_info_log(program);
            log::error!("program info log:\n{log}");
            return Err(GpuError::Validate { log });
        }

        let vertex_array = gl.create_vertex_array().map_err(|reason| GpuError::Create {
            what: "vertex array",
            reason,
        })?;
        self.vertex_array = Some(vertex_array);
        gl.bind_vertex_array(Some(vertex_array));

        for decl in &self.attributes {
            let location = gl
                .attrib_location(program, &decl.name)
                .ok_or_else(|| GpuError::AttributeNotFound(decl.name.to_string()))?;
            self.slots.push((
                decl.name.clone(),
                VertexSlot {
                    location,
                    components: decl.components,
                    scalar: decl.scalar,
                },
            ));
        }

        for name in &self.declared_uniforms {
            let location = gl
                .uniform_location(program, name)
                .ok_or_else(|| GpuError::UniformNotFound(name.to_string()))?;
            self.uniform_cache.insert(name.to_string(), location);
        }

        gl.bind_vertex_array(None);
        gl.use_program(None);
        Ok(())
    }

    fn reset_layout(&mut self, gl: &G) {
        if let Some(vertex_array) = self.vertex_array.take() {
            gl.delete_vertex_array(vertex_array);
        }
        self.slots.clear();
        self.attrib_cache.clear();
        self.uniform_cache.clear();
    }
}

impl<G: GpuApi> GpuResource<G> for Program<G> {
    type Handle = G::Program;

    fn slot(&self) -> &ResourceSlot<G::Program> {
        &self.slot
    }

    fn slot_mut(&mut self) -> &mut ResourceSlot<G::Program> {
        &mut self.slot
    }

    fn allocate(&mut self, gl: &G) -> GpuResult<G::Program> {
        let sources = self
            .sources
            .take()
            .ok_or(GpuError::Consumed { what: "shader program" })?;

        let program = gl.create_program().map_err(|reason| GpuError::Create {
            what: "shader program",
            reason,
        })?;

        match self.build(gl, program, &sources) {
            Ok(()) => Ok(program),
            Err(e) => {
                gl.bind_vertex_array(None);
                self.reset_layout(gl);
                gl.delete_program(program);
                // Keep the sources so a failed allocation can be inspected or retried.
                self.sources = Some(sources);
                Err(e)
            }
        }
    }

    fn deallocate(&mut self, gl: &G, handle: G::Program) {
        self.reset_layout(gl);
        gl.delete_program(handle);
    }
}

/// Compiles each stage and attaches it. Created shaders are pushed to `shaders`
/// even when a later stage fails, so the caller can delete them.
fn attach_stages<G: GpuApi>(
    gl: &G,
    program: G::Program,
    sources: &[ShaderSource],
    shaders: &mut Vec<G::Shader>,
) -> GpuResult<()> {
    for src in sources {
        let shader = compile_stage(gl, src)?;
        shaders.push(shader);
        gl.attach_shader(program, shader);
    }
    Ok(())
}

fn compile_stage<G: GpuApi>(gl: &G, src: &ShaderSource) -> GpuResult<G::Shader> {
    let shader = gl.create_shader(src.stage).map_err(|reason| GpuError::Create {
        what: "shader",
        reason,
    })?;
    gl.shader_source(shader, &src.source);
    gl.compile_shader(shader);

    let ok = gl.shader_compile_status(shader);
    let log = gl.shader_info_log(shader);
    if !ok {
        gl.delete_shader(shader);
        log::error!("{} shader failed to compile:\n{log}", src.stage);
        return Err(GpuError::ShaderCompile {
            stage: src.stage,
            log,
        });
    }
    if !log.trim().is_empty() {
        log::debug!("{} shader compile info:\n{log}", src.stage);
    }
    Ok(shader)
}
