//! Content trimming.
//!
//! Shrinks a rendered raster to the bounding box of its visible content plus a
//! small margin. A pixel counts as background when it is fully transparent, or
//! when a background color is declared and the pixel's RGB lies within
//! [`TrimOptions::tolerance`] of it (Manhattan distance). Without a declared
//! (or with a transparent) background, every non-transparent pixel is content.
//!
//! Trimming never fails: a zero-sized grid or a grid with no content is
//! returned unchanged.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::grid::PixelGrid;

/// Maximum summed RGB difference at which a pixel still matches the background.
///
/// Absorbs anti-aliasing noise around glyph edges.
pub const DEFAULT_TOLERANCE: u32 = 12;

/// Margin in pixels kept around the content bounding box.
pub const DEFAULT_PADDING: u32 = 2;

/// Inclusive pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Leftmost column.
    pub left: u32,
    /// Topmost row.
    pub top: u32,
    /// Rightmost column (inclusive).
    pub right: u32,
    /// Bottom row (inclusive).
    pub bottom: u32,
}

impl BoundingBox {
    /// Box covering a single pixel.
    #[must_use]
    pub fn point(x: u32, y: u32) -> Self {
        Self {
            left: x,
            top: y,
            right: x,
            bottom: y,
        }
    }

    /// Width in pixels. An inverted box (`right < left`) counts as one column.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left).saturating_add(1)
    }

    /// Height in pixels. An inverted box (`bottom < top`) counts as one row.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top).saturating_add(1)
    }

    /// Grow the box to include `(x, y)`.
    pub fn include(&mut self, x: u32, y: u32) {
        self.left = self.left.min(x);
        self.right = self.right.max(x);
        self.top = self.top.min(y);
        self.bottom = self.bottom.max(y);
    }

    /// Expand by `padding` on every side, clamped to a `width`×`height` grid.
    ///
    /// A zero `width` or `height` clamps that axis to column or row 0.
    #[must_use]
    pub fn padded(&self, padding: u32, width: u32, height: u32) -> Self {
        let max_x = width.saturating_sub(1);
        let max_y = height.saturating_sub(1);
        Self {
            left: self.left.saturating_sub(padding).min(max_x),
            top: self.top.saturating_sub(padding).min(max_y),
            right: self.right.saturating_add(padding).min(max_x),
            bottom: self.bottom.saturating_add(padding).min(max_y),
        }
    }
}

/// Tunables for content trimming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimOptions {
    /// Background match tolerance (summed absolute RGB difference).
    pub tolerance: u32,
    /// Margin kept around the content.
    pub padding: u32,
}

impl Default for TrimOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            padding: DEFAULT_PADDING,
        }
    }
}

/// Locate the tight bounding box of all content pixels.
///
/// Returns `None` for an empty grid or when every pixel is background. The
/// result does not include padding.
#[must_use]
pub fn find_content_bounds(
    grid: &PixelGrid,
    background: Option<Color>,
    options: &TrimOptions,
) -> Option<BoundingBox> {
    if grid.is_empty() {
        return None;
    }

    // A transparent declared background behaves like no background at all.
    let opaque_background = background.filter(|bg| !bg.is_transparent());

    let mut bounds: Option<BoundingBox> = None;
    for (y, row) in (0u32..).zip(grid.rows()) {
        for (x, px) in (0u32..).zip(row.chunks_exact(4)) {
            if px[3] == 0 {
                continue;
            }
            if let Some(bg) = opaque_background {
                if bg.manhattan_distance([px[0], px[1], px[2], px[3]]) <= options.tolerance {
                    continue;
                }
            }
            match bounds.as_mut() {
                Some(b) => b.include(x, y),
                None => bounds = Some(BoundingBox::point(x, y)),
            }
        }
    }

    bounds
}

/// Trims rasters down to their visible content.
#[derive(Debug, Clone, Default)]
pub struct ContentTrimmer {
    options: TrimOptions,
}

impl ContentTrimmer {
    /// Create a trimmer with the given options.
    #[must_use]
    pub fn new(options: TrimOptions) -> Self {
        Self { options }
    }

    /// The options this trimmer uses.
    #[must_use]
    pub fn options(&self) -> &TrimOptions {
        &self.options
    }

    /// Crop `grid` to its content plus padding.
    ///
    /// Returns the input borrowed when there is nothing to trim (empty grid or
    /// no content), and a newly allocated grid otherwise.
    #[must_use]
    pub fn trim<'a>(&self, grid: &'a PixelGrid, background: Option<Color>) -> Cow<'a, PixelGrid> {
        let (width, height) = grid.dimensions();

        let Some(bounds) = find_content_bounds(grid, background, &self.options) else {
            tracing::debug!(width, height, "No content found, leaving grid untrimmed");
            return Cow::Borrowed(grid);
        };

        let padded = bounds.padded(self.options.padding, width, height);
        tracing::debug!(
            "Trimmed {width}x{height} to {}x{} at ({}, {})",
            padded.width(),
            padded.height(),
            padded.left,
            padded.top
        );

        match grid.crop(&padded) {
            Ok(cropped) => Cow::Owned(cropped),
            Err(e) => {
                tracing::warn!("Leaving grid untrimmed: {e}");
                Cow::Borrowed(grid)
            }
        }
    }
}

/// Trim with [`DEFAULT_TOLERANCE`] and [`DEFAULT_PADDING`].
#[must_use]
pub fn trim_to_content(grid: &PixelGrid, background: Option<Color>) -> Cow<'_, PixelGrid> {
    ContentTrimmer::default().trim(grid, background)
}
