//! PNG decode/encode at the edge of the pixel engines.

use std::path::Path;

use image::ImageFormat;

use crate::error::{Error, Result};
use crate::raster::RasterImage;

/// Load an image file as RGBA8.
///
/// Formats without an alpha channel are given a fully opaque one.
///
/// # Errors
///
/// Returns [`Error::MissingInput`] if `path` does not exist, or
/// [`Error::Image`] if it cannot be decoded.
pub fn decode(path: &Path) -> Result<RasterImage> {
    if !path.exists() {
        return Err(Error::MissingInput(path.to_path_buf()));
    }
    let img = image::open(path)?.to_rgba8();
    tracing::debug!(path = %path.display(), width = img.width(), height = img.height(), "decoded");
    RasterImage::from_rgba(img)
}

/// Write an image as PNG, creating missing parent directories.
///
/// # Errors
///
/// Returns [`Error::UnsupportedFormat`] unless `path` has a `.png`
/// extension, or an I/O or encoding error if writing fails.
pub fn encode(image: &RasterImage, path: &Path) -> Result<()> {
    let format =
        ImageFormat::from_path(path).map_err(|e| Error::UnsupportedFormat(e.to_string()))?;
    if format != ImageFormat::Png {
        return Err(Error::UnsupportedFormat(format!(
            "{format:?} (output must be PNG)"
        )));
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    image.to_rgba()?.save_with_format(path, ImageFormat::Png)?;
    tracing::debug!(path = %path.display(), "encoded");
    Ok(())
}
