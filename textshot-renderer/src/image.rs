//! Raster loading.
//!
//! Decodes existing images into a [`PixelGrid`] so they can be trimmed.

use std::path::Path;

use textshot_core::PixelGrid;

use crate::error::{RenderError, RenderResult};

/// Decode an image (PNG, JPEG, ...) from raw bytes into RGBA8.
///
/// # Errors
///
/// Returns an error if the bytes cannot be decoded.
pub fn load_grid_from_bytes(data: &[u8]) -> RenderResult<PixelGrid> {
    let img = image::load_from_memory(data)
        .map_err(|e| RenderError::Resource(format!("Failed to decode image: {e}")))?;

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(PixelGrid::new(width, height, rgba.into_raw())?)
}

/// Read and decode an image file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded.
pub fn load_grid_from_path(path: impl AsRef<Path>) -> RenderResult<PixelGrid> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    tracing::debug!("Read {} ({} bytes)", path.display(), bytes.len());
    load_grid_from_bytes(&bytes)
}
