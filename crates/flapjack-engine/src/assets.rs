//! Loading images and shader sources from disk.

use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageError};
use thiserror::Error;

use crate::device::ShaderStage;
use crate::resource::ShaderSource;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image {}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: ImageError,
    },
}

/// Reads and decodes an image; the format is guessed from its contents.
pub fn load_image(path: impl AsRef<Path>) -> Result<DynamicImage, AssetError> {
    let path = path.as_ref();
    let reader = image::ImageReader::open(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = reader.with_guessed_format().map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let image = reader.decode().map_err(|source| AssetError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("loaded {} ({}x{})", path.display(), image.width(), image.height());
    Ok(image)
}

/// Reads a GLSL file for `stage`.
pub fn load_shader(path: impl AsRef<Path>, stage: ShaderStage) -> Result<ShaderSource, AssetError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(ShaderSource::new(stage, source))
}
