use core::fmt::Debug;

use crate::device::{GpuApi, GpuResult};

/// Storage for a lazily allocated GPU handle.
///
/// States: unallocated (`None`) and allocated (`Some`). Dropping a slot that is
/// still allocated logs an error: the GL object leaks because teardown needs a
/// current context, which `Drop` cannot provide.
#[derive(Debug)]
pub struct ResourceSlot<H> {
    handle: Option<H>,
    what: &'static str,
}

impl<H: Copy> ResourceSlot<H> {
    /// Creates an unallocated slot. `what` names the resource in diagnostics.
    #[inline]
    pub const fn new(what: &'static str) -> Self {
        Self { handle: None, what }
    }

    #[inline]
    pub fn get(&self) -> Option<H> {
        self.handle
    }

    #[inline]
    pub fn is_allocated(&self) -> bool {
        self.handle.is_some()
    }

    #[inline]
    pub fn what(&self) -> &'static str {
        self.what
    }

    #[inline]
    fn set(&mut self, handle: H) {
        debug_assert!(self.handle.is_none(), "{} allocated twice", self.what);
        self.handle = Some(handle);
    }

    #[inline]
    fn take(&mut self) -> Option<H> {
        self.handle.take()
    }
}

impl<H> Drop for ResourceSlot<H> {
    fn drop(&mut self) {
        if self.handle.is_some() {
            log::error!("{} has not been freed; its GPU object leaks", self.what);
        }
    }
}

/// A GPU object with an explicit allocate/free lifecycle.
///
/// Implementors provide `allocate`/`deallocate`; callers use [`handle`](Self::handle),
/// which allocates on first access and memoizes, and [`free`](Self::free), which is
/// idempotent. After `free`, the next `handle` allocates again.
pub trait GpuResource<G: GpuApi> {
    type Handle: Copy + Debug;

    fn slot(&self) -> &ResourceSlot<Self::Handle>;
    fn slot_mut(&mut self) -> &mut ResourceSlot<Self::Handle>;

    /// Creates the GPU object. Called at most once per allocated period.
    fn allocate(&mut self, gl: &G) -> GpuResult<Self::Handle>;

    /// Destroys the GPU object created by `allocate`.
    fn deallocate(&mut self, gl: &G, handle: Self::Handle);

    /// Returns the handle, allocating it first if needed.
    fn handle(&mut self, gl: &G) -> GpuResult<Self::Handle> {
        if let Some(handle) = self.slot().get() {
            return Ok(handle);
        }
        let handle = self.allocate(gl)?;
        log::debug!("allocated {} {:?}", self.slot().what(), handle);
        self.slot_mut().set(handle);
        Ok(handle)
    }

    /// Releases the GPU object. No-op if unallocated.
    fn free(&mut self, gl: &G) {
        let Some(handle) = self.slot_mut().take() else {
            return;
        };
        log::debug!("freeing {} {:?}", self.slot().what(), handle);
        self.deallocate(gl, handle);
    }

    #[inline]
    fn is_allocated(&self) -> bool {
        self.slot().is_allocated()
    }
}
