//! PNG export.
//!
//! Encodes a [`PixelGrid`] as PNG bytes, a `data:` URL, or a file on disk.

use std::path::Path;

use base64::Engine;
use image::ImageEncoder;
use textshot_core::PixelGrid;

use crate::error::{RenderError, RenderResult};

/// File name used for screenshot downloads.
pub const DEFAULT_FILE_NAME: &str = "screenshot.png";

/// MIME type of exported screenshots.
pub const PNG_MIME: &str = "image/png";

/// Encode `grid` as PNG bytes.
///
/// # Errors
///
/// Returns an error if the grid is empty or encoding fails.
pub fn encode_png(grid: &PixelGrid) -> RenderResult<Vec<u8>> {
    if grid.is_empty() {
        return Err(RenderError::Export(
            "Cannot encode a zero-sized image".to_string(),
        ));
    }

    let mut buf = std::io::Cursor::new(Vec::new());
    image::codecs::png::PngEncoder::new(&mut buf)
        .write_image(
            grid.as_bytes(),
            grid.width(),
            grid.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| RenderError::Export(format!("PNG encoding failed: {e}")))?;

    let png = buf.into_inner();
    tracing::debug!(
        "Encoded {}x{} PNG ({} bytes)",
        grid.width(),
        grid.height(),
        png.len()
    );
    Ok(png)
}

/// Wrap PNG bytes in a `data:image/png;base64,` URL.
#[must_use]
pub fn to_data_url(png: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(png);
    format!("data:{PNG_MIME};base64,{encoded}")
}

/// Encode `grid` as PNG and write it to `path`.
///
/// # Errors
///
/// Returns an error if encoding or writing fails.
pub fn save_png(grid: &PixelGrid, path: impl AsRef<Path>) -> RenderResult<()> {
    let path = path.as_ref();
    let png = encode_png(grid)?;
    std::fs::write(path, &png)?;
    tracing::info!("Saved {} ({} bytes)", path.display(), png.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_magic_bytes() {
        let grid = PixelGrid::filled(3, 2, [255, 0, 0, 255]).expect("grid");
        let png = encode_png(&grid).expect("png");
        assert_eq!(&png[0..4], &[137, 80, 78, 71]);
    }

    #[test]
    fn test_empty_grid_fails() {
        assert!(matches!(
            encode_png(&PixelGrid::empty()),
            Err(RenderError::Export(_))
        ));
    }

    #[test]
    fn test_data_url_prefix() {
        let grid = PixelGrid::filled(1, 1, [0, 0, 0, 255]).expect("grid");
        let url = to_data_url(&encode_png(&grid).expect("png"));
        assert!(url.starts_with("data:image/png;base64,iVBORw0KGgo"));
    }

    #[test]
    fn test_save_png_writes_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(DEFAULT_FILE_NAME);
        let grid = PixelGrid::filled(2, 2, [1, 2, 3, 4]).expect("grid");

        save_png(&grid, &path).expect("save");
        let bytes = std::fs::read(&path).expect("read back");
        assert_eq!(&bytes[0..4], &[137, 80, 78, 71]);
    }
}
