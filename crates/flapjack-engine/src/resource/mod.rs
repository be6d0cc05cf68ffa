//! GPU resources with an explicit, lazy lifecycle.
//!
//! Nothing here touches the GPU at construction. Each resource allocates on its
//! first [`GpuResource::handle`] call and must be released with
//! [`GpuResource::free`] while the context is still current.

mod buffer;
mod program;
mod scope;
mod slot;
mod texture;

pub use buffer::Buffer;
pub use program::{AttributeDecl, Program, ShaderSource, VertexSlot};
pub use scope::DrawScope;
pub use slot::{GpuResource, ResourceSlot};
pub use texture::{Texture, TextureUnit};
