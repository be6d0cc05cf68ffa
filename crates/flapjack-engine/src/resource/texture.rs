use image::DynamicImage;

use crate::device::{GpuApi, GpuError, GpuResult, TextureOptions};

use super::{GpuResource, ResourceSlot};

/// 2D texture built from an already decoded image.
///
/// The image is converted to RGBA8 and released by the first allocation. The
/// texture cannot be allocated a second time after `free`.
pub struct Texture<G: GpuApi> {
    slot: ResourceSlot<G::Texture>,
    image: Option<DynamicImage>,
    options: TextureOptions,
    width: u32,
    height: u32,
}

impl<G: GpuApi> Texture<G> {
    pub fn new(image: DynamicImage, options: TextureOptions) -> Self {
        Self {
            slot: ResourceSlot::new("texture"),
            width: image.width(),
            height: image.height(),
            image: Some(image),
            options,
        }
    }

    /// Size of the source image in pixels.
    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn options(&self) -> TextureOptions {
        self.options
    }
}

impl<G: GpuApi> GpuResource<G> for Texture<G> {
    type Handle = G::Texture;

    fn slot(&self) -> &ResourceSlot<G::Texture> {
        &self.slot
    }

    fn slot_mut(&mut self) -> &mut ResourceSlot<G::Texture> {
        &mut self.slot
    }

    fn allocate(&mut self, gl: &G) -> GpuResult<G::Texture> {
        if self.image.is_none() {
            return Err(GpuError::Consumed { what: "texture" });
        }
        // The image is only released once the texture object exists.
        let handle = gl.create_texture().map_err(|reason| GpuError::Create {
            what: "texture",
            reason,
        })?;
        let Some(image) = self.image.take() else {
            gl.delete_texture(handle);
            return Err(GpuError::Consumed { what: "texture" });
        };
        let rgba = image.into_rgba8();

        gl.bind_texture(Some(handle));
        gl.tex_image_rgba8(rgba.width(), rgba.height(), rgba.as_raw());
        gl.set_texture_options(self.options);
        if self.options.min.uses_mipmaps() {
            gl.generate_mipmap();
        }
        Ok(handle)
    }

    fn deallocate(&mut self, gl: &G, handle: G::Texture) {
        gl.delete_texture(handle);
    }
}

/// A texture image unit (`TEXTURE0 + n`).
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct TextureUnit(pub u32);

impl TextureUnit {
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}
