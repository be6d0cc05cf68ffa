use crate::device::{GpuApi, GpuResult, Primitive};

use super::{Buffer, GpuResource, Program, Texture, TextureUnit};

/// The program is active, its vertex array bound and every declared attribute
/// enabled for as long as this guard lives.
///
/// Created by [`Program::scoped_draw`]. Dropping it disables the attributes,
/// unbinds the vertex array and deactivates the program.
pub struct DrawScope<'a, G: GpuApi> {
    gl: &'a G,
    program: &'a mut Program<G>,
}

impl<'a, G: GpuApi> DrawScope<'a, G> {
    pub(crate) fn enter(gl: &'a G, program: &'a mut Program<G>, handle: G::Program) -> Self {
        gl.use_program(Some(handle));
        gl.bind_vertex_array(program.vertex_array());
        for (_, slot) in program.slots() {
            gl.enable_vertex_attrib(slot.location);
        }
        Self { gl, program }
    }

    #[inline]
    pub fn gl(&self) -> &'a G {
        self.gl
    }

    /// Sources attribute `name` from `buffer`.
    pub fn set_buffer(&mut self, name: &str, buffer: &mut Buffer<G>) -> GpuResult<()> {
        self.program.set_buffer(self.gl, name, buffer)
    }

    #[inline]
    pub fn draw(&self, primitive: Primitive, count: usize) {
        self.program.draw(self.gl, primitive, count);
    }

    pub fn uniform_location(&mut self, name: &str) -> GpuResult<G::UniformLocation> {
        self.program.get_uniform_location(self.gl, name)
    }

    pub fn set_uniform_i32(&mut self, name: &str, value: i32) -> GpuResult<()> {
        let location = self.uniform_location(name)?;
        self.gl.uniform_1_i32(&location, value);
        Ok(())
    }

    pub fn set_uniform_vec2(&mut self, name: &str, x: f32, y: f32) -> GpuResult<()> {
        let location = self.uniform_location(name)?;
        self.gl.uniform_2_f32(&location, x, y);
        Ok(())
    }

    /// Uploads `values` as consecutive `vec4`s; its length must be a multiple of 4.
    pub fn set_uniform_vec4_array(&mut self, name: &str, values: &[f32]) -> GpuResult<()> {
        debug_assert!(values.len() % 4 == 0, "vec4 array of {} floats", values.len());
        let location = self.uniform_location(name)?;
        self.gl.uniform_4_f32_slice(&location, values);
        Ok(())
    }

    /// Binds `texture` to `unit` and points sampler uniform `sampler` at it.
    pub fn bind_texture(
        &mut self,
        unit: TextureUnit,
        sampler: &str,
        texture: &mut Texture<G>,
    ) -> GpuResult<()> {
        // Allocation binds on the current unit; select ours afterwards.
        let handle = texture.handle(self.gl)?;
        self.gl.active_texture(unit.index());
        self.gl.bind_texture(Some(handle));
        self.set_uniform_i32(sampler, unit.index() as i32)
    }
}

impl<G: GpuApi> Drop for DrawScope<'_, G> {
    fn drop(&mut self) {
        for (_, slot) in self.program.slots() {
            self.gl.disable_vertex_attrib(slot.location);
        }
        self.gl.bind_vertex_array(None);
        self.gl.use_program(None);
    }
}

#[cfg(test)]
mod tests {
    use image::{DynamicImage, RgbaImage};

    use crate::device::recording::{Call, RecordingGpu};
    use crate::device::{GpuError, ScalarType, ShaderStage, TextureOptions};
    use crate::resource::{AttributeDecl, ShaderSource};

    use super::*;

    fn program() -> Program<RecordingGpu> {
        Program::new(
            vec![
                ShaderSource::new(ShaderStage::Vertex, ""),
                ShaderSource::new(ShaderStage::Fragment, ""),
            ],
            vec![
                AttributeDecl::new("a", 2, ScalarType::Float),
                AttributeDecl::new("b", 1, ScalarType::Float),
            ],
        )
    }

    fn gpu() -> RecordingGpu {
        RecordingGpu::new()
            .with_attributes(&["a", "b"])
            .with_uniforms(&["tint", "sampler"])
    }

    #[test]
    fn enable_and_disable_are_symmetric() {
        let gl = gpu();
        let mut p = program();
        p.handle(&gl).unwrap();
        gl.clear_calls();

        p.scoped_draw(&gl, |_| Ok(()), |s| Ok(s.draw(Primitive::Points, 3)), |_| {})
            .unwrap();

        let calls = gl.calls();
        let handle = p.handle(&gl).unwrap();
        assert_eq!(calls.first(), Some(&Call::UseProgram(Some(handle))));
        assert_eq!(calls.last(), Some(&Call::UseProgram(None)));
        assert_eq!(gl.count(|c| matches!(c, Call::EnableAttrib(_))), 2);
        assert_eq!(gl.count(|c| matches!(c, Call::DisableAttrib(_))), 2);
        assert!(calls.contains(&Call::DrawArrays(Primitive::Points, 0, 3)));
        p.free(&gl);
    }

    #[test]
    fn scope_is_closed_when_draw_fails() {
        let gl = gpu();
        let mut p = program();
        p.handle(&gl).unwrap();
        gl.clear_calls();

        let mut finished = false;
        let result: GpuResult<()> = p.scoped_draw(
            &gl,
            |_| Ok(()),
            |s| s.set_uniform_i32("missing", 1),
            |_| finished = true,
        );

        assert!(matches!(result, Err(GpuError::UniformNotFound(n)) if n == "missing"));
        assert!(finished);
        assert_eq!(gl.count(|c| matches!(c, Call::DisableAttrib(_))), 2);
        assert_eq!(gl.calls().last(), Some(&Call::UseProgram(None)));
        p.free(&gl);
    }

    #[test]
    fn draw_is_skipped_when_prepare_fails() {
        let gl = gpu();
        let mut p = program();
        let mut b: Buffer<RecordingGpu> = Buffer::dynamic();

        let result = p.scoped_draw(
            &gl,
            |s| s.set_buffer("c", &mut b),
            |s| Ok(s.draw(Primitive::Points, 1)),
            |_| {},
        );

        assert!(matches!(result, Err(GpuError::AttributeNotFound(n)) if n == "c"));
        assert_eq!(gl.count(|c| matches!(c, Call::DrawArrays(..))), 0);
        p.free(&gl);
        b.free(&gl);
    }

    #[test]
    fn uniforms_are_forwarded_by_location() {
        let gl = gpu();
        let mut p = program();
        p.scoped_draw(
            &gl,
            |_| Ok(()),
            |s| {
                s.set_uniform_vec2("tint", 1.0, 2.0)?;
                s.set_uniform_vec4_array("tint", &[0.0, 1.0, 2.0, 3.0])
            },
            |_| {},
        )
        .unwrap();

        let calls = gl.calls();
        assert!(calls.contains(&Call::Uniform2f("tint".into(), 1.0, 2.0)));
        assert!(calls.contains(&Call::Uniform4fv("tint".into(), vec![0.0, 1.0, 2.0, 3.0])));
        p.free(&gl);
    }

    #[test]
    fn bind_texture_selects_unit_and_sets_sampler() {
        let gl = gpu();
        let mut p = program();
        let mut t: Texture<RecordingGpu> =
            Texture::new(DynamicImage::ImageRgba8(RgbaImage::new(1, 1)), TextureOptions::NEAREST);

        p.scoped_draw(
            &gl,
            |s| s.bind_texture(TextureUnit(2), "sampler", &mut t),
            |_| Ok(()),
            |_| {},
        )
        .unwrap();

        let calls = gl.calls();
        let unit = calls.iter().position(|c| *c == Call::ActiveTexture(2)).unwrap();
        let upload = calls.iter().position(|c| matches!(c, Call::TexImage { .. })).unwrap();
        assert!(upload < unit);
        assert!(calls.contains(&Call::Uniform1i("sampler".into(), 2)));
        p.free(&gl);
        t.free(&gl);
    }
}
