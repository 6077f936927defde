//! SVG intermediate representation for a styled text block.
//!
//! The block is laid out the way the preview shows it: one line per `\n`, a
//! fixed inner padding, and an optional background rectangle behind the text.

use std::fmt::Write;

use textshot_core::RenderConfig;

use crate::error::{RenderError, RenderResult};

/// Average glyph advance as a fraction of the font size.
const ADVANCE_RATIO: f32 = 0.625;

/// Line height as a multiple of the font size.
const LINE_HEIGHT_RATIO: f32 = 1.25;

/// Largest surface edge the renderer will allocate.
pub const MAX_DIMENSION: u32 = 16_384;

/// Geometry of a text block.
///
/// [`TextLayout::new`] produces an estimate from character counts. A backend
/// that can shape text widens it with [`TextLayout::fit_ink`] so that no glyph
/// falls outside the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    /// Lines of text, in order.
    pub lines: Vec<String>,
    /// Font size in pixels.
    pub font_size: f32,
    /// Inner padding in pixels.
    pub padding: f32,
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
}

impl TextLayout {
    /// Lay out `text` using the font size and padding from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface would exceed [`MAX_DIMENSION`].
    #[allow(clippy::cast_precision_loss)]
    pub fn new(text: &str, config: &RenderConfig) -> RenderResult<Self> {
        let font_size = config.font_size_px;
        let padding = config.padding_px.max(0.0);
        let lines: Vec<String> = text
            .split('\n')
            .map(|l| l.trim_end_matches('\r').to_string())
            .collect();

        let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let content_w = longest as f32 * font_size * ADVANCE_RATIO;
        let content_h = lines.len() as f32 * font_size * LINE_HEIGHT_RATIO;

        let (width, height) =
            surface_size(content_w + padding * 2.0, content_h + padding * 2.0)?;

        Ok(Self {
            lines,
            font_size,
            padding,
            width,
            height,
        })
    }

    /// Grow the surface so that ink reaching `right`, `bottom` still has the
    /// inner padding after it. Never shrinks.
    ///
    /// # Errors
    ///
    /// Returns an error if the grown surface would exceed [`MAX_DIMENSION`].
    #[allow(clippy::cast_precision_loss)]
    pub fn fit_ink(&mut self, right: f32, bottom: f32) -> RenderResult<()> {
        let width = (right + self.padding).max(self.width as f32);
        let height = (bottom + self.padding).max(self.height as f32);
        let (width, height) = surface_size(width, height)?;
        if (width, height) != (self.width, self.height) {
            tracing::debug!(
                "Widened layout from {}x{} to {width}x{height} to fit shaped text",
                self.width,
                self.height
            );
        }
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Baseline y coordinate of line `index`.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn baseline(&self, index: usize) -> f32 {
        self.padding + index as f32 * self.font_size * LINE_HEIGHT_RATIO + self.font_size
    }
}

/// Round a surface up to whole pixels and enforce [`MAX_DIMENSION`].
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn surface_size(width: f32, height: f32) -> RenderResult<(u32, u32)> {
    let width = width.ceil().max(1.0);
    let height = height.ceil().max(1.0);
    if width > MAX_DIMENSION as f32 || height > MAX_DIMENSION as f32 {
        return Err(RenderError::Layout(format!(
            "Text block of {width}x{height} exceeds {MAX_DIMENSION}px"
        )));
    }
    Ok((width as u32, height as u32))
}

/// An SVG document ready for rasterization.
#[derive(Debug, Clone)]
pub struct SvgDocument {
    /// Serialized SVG markup.
    pub markup: String,
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
}

impl SvgDocument {
    /// Build the SVG for `text` styled by `config`, sized by the estimated
    /// layout.
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot be laid out.
    pub fn build(text: &str, config: &RenderConfig) -> RenderResult<Self> {
        let layout = TextLayout::new(text, config)?;
        Ok(Self::from_layout(&layout, config))
    }

    /// Build the SVG for an existing layout, background included.
    #[must_use]
    pub fn from_layout(layout: &TextLayout, config: &RenderConfig) -> Self {
        Self::write(layout, config, config.background_enabled)
    }

    /// Build the text of `layout` alone, for measuring its ink.
    #[must_use]
    pub fn text_only(layout: &TextLayout, config: &RenderConfig) -> Self {
        Self::write(layout, config, false)
    }

    fn write(layout: &TextLayout, config: &RenderConfig, background: bool) -> Self {
        let (width, height) = (layout.width, layout.height);
        let text_len: usize = layout.lines.iter().map(String::len).sum();

        let mut svg = String::with_capacity(512 + text_len);
        let _ = write!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
        );

        if background {
            let fill = escape_xml(&config.background_color);
            let _ = write!(
                svg,
                "<rect width=\"100%\" height=\"100%\" fill=\"{fill}\"/>"
            );
        }

        let fill = config.text_fill();
        let font_size = layout.font_size;
        for (idx, line) in layout.lines.iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let escaped = escape_xml(line);
            let y = layout.baseline(idx);
            let _ = write!(
                svg,
                "<text x=\"{}\" y=\"{y}\" font-size=\"{font_size}\" fill=\"{fill}\" font-family=\"sans-serif\" xml:space=\"preserve\">{escaped}</text>",
                layout.padding,
            );
        }

        svg.push_str("</svg>");
        tracing::trace!("Built {width}x{height} SVG with {} lines", layout.lines.len());

        Self {
            markup: svg,
            width,
            height,
        }
    }
}

/// Escape special XML characters.
fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
