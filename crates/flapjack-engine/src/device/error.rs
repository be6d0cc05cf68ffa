use thiserror::Error;

use super::ShaderStage;

/// Failures raised while creating or using GPU resources.
///
/// Everything here is fatal at startup; once a renderer is allocated the
/// per-frame path is not expected to produce any of these.
#[derive(Debug, Error)]
pub enum GpuError {
    /// A shader stage failed to compile. `log` is the driver's info log.
    #[error("GLSL compile error in {stage} stage:\n{log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("program link failed:\n{log}")]
    Link { log: String },

    #[error("program validation failed:\n{log}")]
    Validate { log: String },

    /// A declared vertex attribute is not an active input of the linked program.
    #[error("attribute not found: {0}")]
    AttributeNotFound(String),

    #[error("uniform not found: {0}")]
    UniformNotFound(String),

    /// The driver refused to create an object.
    #[error("failed to create {what}: {reason}")]
    Create { what: &'static str, reason: String },

    /// The CPU-side source of a resource was released by its first allocation,
    /// so it cannot be allocated again after `free`.
    #[error("{what} source data was consumed by a previous allocation")]
    Consumed { what: &'static str },

    #[error("box table holds {count} colors but the sprite shader supports at most {max}")]
    TooManyBoxes { count: usize, max: usize },
}

pub type GpuResult<T> = Result<T, GpuError>;
