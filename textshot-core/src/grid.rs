//! Dense RGBA8 pixel grids.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::trim::BoundingBox;

/// A single straight-alpha RGBA pixel.
pub type Rgba = [u8; 4];

/// Bytes per pixel.
const CHANNELS: usize = 4;

/// A row-major RGBA8 raster.
///
/// Deserialization goes through [`PixelGrid::new`], so a decoded grid always
/// has a buffer of exactly `width * height * 4` bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPixelGrid")]
pub struct PixelGrid {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

/// Unvalidated wire form of [`PixelGrid`].
#[derive(Deserialize)]
struct RawPixelGrid {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl TryFrom<RawPixelGrid> for PixelGrid {
    type Error = CoreError;

    fn try_from(raw: RawPixelGrid) -> CoreResult<Self> {
        Self::new(raw.width, raw.height, raw.data)
    }
}

impl PixelGrid {
    /// Create a grid from raw row-major RGBA bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if `data.len() != width * height * 4`.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> CoreResult<Self> {
        let expected = buffer_len(width, height)?;
        if data.len() != expected {
            return Err(CoreError::BufferSize {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create a grid with every pixel set to `pixel`.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions overflow the addressable size.
    pub fn filled(width: u32, height: u32, pixel: Rgba) -> CoreResult<Self> {
        let len = buffer_len(width, height)?;
        let data = pixel.iter().copied().cycle().take(len).collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create a zero-sized grid.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            data: Vec::new(),
        }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)` in pixels.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Whether the grid has no pixels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Get the pixel at `(x, y)`, or `None` if out of bounds.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let offset = self.offset(x, y)?;
        let mut px = [0; CHANNELS];
        px.copy_from_slice(&self.data[offset..offset + CHANNELS]);
        Some(px)
    }

    /// Set the pixel at `(x, y)`. Returns `false` if out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: Rgba) -> bool {
        match self.offset(x, y) {
            Some(offset) => {
                self.data[offset..offset + CHANNELS].copy_from_slice(&pixel);
                true
            }
            None => false,
        }
    }

    /// Iterate over rows as byte slices of `width * 4` bytes.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        // chunks_exact panics on 0; an empty grid has no rows anyway.
        let row_len = (self.width as usize * CHANNELS).max(1);
        self.data.chunks_exact(row_len)
    }

    /// Copy the inclusive rectangle `bounds` into a new grid.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CropOutOfBounds`] if `bounds` is inverted or
    /// reaches past the grid.
    pub fn crop(&self, bounds: &BoundingBox) -> CoreResult<Self> {
        if bounds.left > bounds.right
            || bounds.top > bounds.bottom
            || bounds.right >= self.width
            || bounds.bottom >= self.height
        {
            return Err(CoreError::CropOutOfBounds {
                left: bounds.left,
                top: bounds.top,
                right: bounds.right,
                bottom: bounds.bottom,
                width: self.width,
                height: self.height,
            });
        }

        let width = bounds.width();
        let height = bounds.height();
        let row_bytes = width as usize * CHANNELS;
        let mut data = Vec::with_capacity(row_bytes * height as usize);

        for row in self
            .rows()
            .skip(bounds.top as usize)
            .take(height as usize)
        {
            let start = bounds.left as usize * CHANNELS;
            data.extend_from_slice(&row[start..start + row_bytes]);
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Raw row-major RGBA bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the grid, returning its raw bytes.
    #[must_use]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * CHANNELS)
    }
}

fn buffer_len(width: u32, height: u32) -> CoreResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or(CoreError::DimensionsTooLarge(width, height))
}
