use super::GpuApi;

/// Implementation limits relevant to the sprite pipeline.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct GpuLimits {
    pub max_vertex_uniform_blocks: i32,
    pub max_geometry_uniform_blocks: i32,
    pub max_fragment_uniform_blocks: i32,
    pub max_texture_image_units: i32,
}

/// Queries the context limits and logs them at info level.
pub fn report_limits<G: GpuApi>(gl: &G) -> GpuLimits {
    let limits = gl.limits();
    log::info!(
        "GL limits: vertex uniform blocks={}, geometry uniform blocks={}, \
         fragment uniform blocks={}, texture image units={}",
        limits.max_vertex_uniform_blocks,
        limits.max_geometry_uniform_blocks,
        limits.max_fragment_uniform_blocks,
        limits.max_texture_image_units,
    );
    limits
}
