use bytemuck::Pod;

use crate::device::{BufferTarget, BufferUsage, GpuApi, GpuError, GpuResult};

use super::{GpuResource, ResourceSlot};

/// GPU buffer holding vertex attribute or index data.
///
/// Data given at construction is staged on the CPU and uploaded once, when the
/// buffer is first allocated; the staging copy is dropped afterwards. Buffers
/// can be refilled at any time with [`set_data`](Self::set_data).
///
/// Every operation binds the buffer to its target. Callers must not rely on a
/// previous binding surviving a call.
pub struct Buffer<G: GpuApi> {
    slot: ResourceSlot<G::Buffer>,
    target: BufferTarget,
    usage: BufferUsage,
    staging: Option<Vec<u8>>,
    len: usize,
}

impl<G: GpuApi> Buffer<G> {
    /// Vertex attribute buffer initialized from `data`.
    pub fn vertex<T: Pod>(data: &[T], usage: BufferUsage) -> Self {
        Self::with_data(BufferTarget::Vertex, data, usage)
    }

    /// Index buffer initialized from `data` (`u16` or `u32` elements).
    pub fn index<T: Pod>(data: &[T], usage: BufferUsage) -> Self {
        Self::with_data(BufferTarget::Index, data, usage)
    }

    /// Empty vertex buffer meant to be refilled every frame.
    pub fn dynamic() -> Self {
        Self {
            slot: ResourceSlot::new("dynamic buffer"),
            target: BufferTarget::Vertex,
            usage: BufferUsage::Dynamic,
            staging: None,
            len: 0,
        }
    }

    fn with_data<T: Pod>(target: BufferTarget, data: &[T], usage: BufferUsage) -> Self {
        Self {
            slot: ResourceSlot::new(match target {
                BufferTarget::Vertex => "vertex buffer",
                BufferTarget::Index => "index buffer",
            }),
            target,
            usage,
            staging: Some(bytemuck::cast_slice(data).to_vec()),
            len: data.len(),
        }
    }

    /// Replaces the buffer contents, allocating the buffer first if needed.
    ///
    /// The handle is kept; only the data store is respecified.
    pub fn set_data<T: Pod>(&mut self, gl: &G, data: &[T]) -> GpuResult<()> {
        let handle = self.handle(gl)?;
        gl.bind_buffer(self.target, Some(handle));
        gl.buffer_data(self.target, bytemuck::cast_slice(data), self.usage);
        self.len = data.len();
        Ok(())
    }

    /// Number of elements last given to the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn target(&self) -> BufferTarget {
        self.target
    }

    #[inline]
    pub fn usage(&self) -> BufferUsage {
        self.usage
    }
}

impl<G: GpuApi> GpuResource<G> for Buffer<G> {
    type Handle = G::Buffer;

    fn slot(&self) -> &ResourceSlot<G::Buffer> {
        &self.slot
    }

    fn slot_mut(&mut self) -> &mut ResourceSlot<G::Buffer> {
        &mut self.slot
    }

    fn allocate(&mut self, gl: &G) -> GpuResult<G::Buffer> {
        let handle = gl.create_buffer().map_err(|reason| GpuError::Create {
            what: self.slot.what(),
            reason,
        })?;
        gl.bind_buffer(self.target, Some(handle));
        if let Some(data) = self.staging.take() {
            gl.buffer_data(self.target, &data, self.usage);
        }
        Ok(handle)
    }

    fn deallocate(&mut self, gl: &G, handle: G::Buffer) {
        gl.delete_buffer(handle);
        // The next allocation starts with an empty data store.
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::recording::{Call, RecordingGpu};

    fn uploads(gl: &RecordingGpu) -> Vec<(BufferTarget, Vec<u8>, BufferUsage)> {
        gl.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::BufferData { target, data, usage } => Some((target, data, usage)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn construction_makes_no_gpu_calls() {
        let gl = RecordingGpu::new();
        let mut b: Buffer<RecordingGpu> = Buffer::vertex(&[1.0f32, 2.0], BufferUsage::Static);
        assert!(gl.calls().is_empty());
        assert_eq!(b.len(), 2);
        b.free(&gl);
    }

    #[test]
    fn static_data_is_uploaded_once_at_allocation() {
        let gl = RecordingGpu::new();
        let mut b: Buffer<RecordingGpu> = Buffer::vertex(&[1.0f32, 2.0], BufferUsage::Static);
        let h1 = b.handle(&gl).unwrap();
        let h2 = b.handle(&gl).unwrap();
        assert_eq!(h1, h2);

        let up = uploads(&gl);
        assert_eq!(up.len(), 1);
        assert_eq!(up[0].0, BufferTarget::Vertex);
        assert_eq!(up[0].1, bytemuck::cast_slice::<f32, u8>(&[1.0, 2.0]).to_vec());
        assert_eq!(up[0].2, BufferUsage::Static);
        b.free(&gl);
    }

    #[test]
    fn index_buffer_binds_index_target() {
        let gl = RecordingGpu::new();
        let mut b: Buffer<RecordingGpu> = Buffer::index(&[0u16, 1, 2], BufferUsage::Static);
        let h = b.handle(&gl).unwrap();
        assert!(gl.calls().contains(&Call::BindBuffer(BufferTarget::Index, Some(h))));
        b.free(&gl);
    }

    #[test]
    fn set_data_allocates_lazily_and_keeps_handle() {
        let gl = RecordingGpu::new();
        let mut b: Buffer<RecordingGpu> = Buffer::dynamic();
        b.set_data(&gl, &[1.0f32]).unwrap();
        let h = b.handle(&gl).unwrap();
        b.set_data(&gl, &[2.0f32, 3.0]).unwrap();

        assert_eq!(gl.count(|c| matches!(c, Call::CreateBuffer(_))), 1);
        assert_eq!(b.handle(&gl).unwrap(), h);
        assert_eq!(b.len(), 2);

        let up = uploads(&gl);
        assert_eq!(up.len(), 2);
        assert!(up.iter().all(|(_, _, usage)| *usage == BufferUsage::Dynamic));
        b.free(&gl);
    }

    #[test]
    fn set_data_rebinds_every_call() {
        let gl = RecordingGpu::new();
        let mut b: Buffer<RecordingGpu> = Buffer::dynamic();
        b.set_data(&gl, &[1.0f32]).unwrap();
        b.set_data(&gl, &[1.0f32]).unwrap();
        let binds = gl.count(|c| matches!(c, Call::BindBuffer(BufferTarget::Vertex, Some(_))));
        // allocation + two uploads
        assert_eq!(binds, 3);
        b.free(&gl);
    }

    #[test]
    fn zero_length_upload_is_allowed() {
        let gl = RecordingGpu::new();
        let mut b: Buffer<RecordingGpu> = Buffer::dynamic();
        b.set_data::<f32>(&gl, &[]).unwrap();
        assert!(b.is_empty());
        assert_eq!(uploads(&gl), vec![(BufferTarget::Vertex, vec![], BufferUsage::Dynamic)]);
        b.free(&gl);
    }

    #[test]
    fn free_deletes_the_handle_once() {
        let gl = RecordingGpu::new();
        let mut b: Buffer<RecordingGpu> = Buffer::dynamic();
        let h = b.handle(&gl).unwrap();
        b.free(&gl);
        b.free(&gl);
        assert_eq!(gl.count(|c| *c == Call::DeleteBuffer(h)), 1);
    }

    #[test]
    fn reallocation_after_free_creates_an_empty_buffer() {
        let gl = RecordingGpu::new();
        let mut b: Buffer<RecordingGpu> =
            Buffer::vertex(&[1.0f32, 2.0, 3.0], BufferUsage::Static);
        let first = b.handle(&gl).unwrap();
        assert_eq!(b.len(), 3);
        b.free(&gl);
        assert!(b.is_empty());
        gl.clear_calls();

        let second = b.handle(&gl).unwrap();
        assert_ne!(first, second);
        assert!(uploads(&gl).is_empty());
        assert_eq!(b.len(), 0);
        b.free(&gl);
    }
}
