//! Render configuration.
//!
//! Everything that influences how preview text is drawn and exported lives in a
//! single [`RenderConfig`] value that callers pass into render and export
//! calls. Nothing is read back out of rendered output.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::{parse_color, Color};
use crate::error::{CoreError, CoreResult};

/// Configuration for rendering and exporting preview text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Font size in CSS pixels.
    pub font_size_px: f32,
    /// Whether the background fill is drawn.
    pub background_enabled: bool,
    /// Background fill as a CSS color string.
    pub background_color: String,
    /// Text fill as a CSS color string.
    pub text_color: String,
    /// Inner padding around the text block in pixels.
    pub padding_px: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_size_px: 16.0,
            background_enabled: false,
            background_color: "rgb(255, 255, 255)".to_string(),
            text_color: "rgb(17, 17, 17)".to_string(),
            padding_px: 4.0,
        }
    }
}

impl RenderConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn from_json_file(path: impl AsRef<Path>) -> CoreResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse a configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not valid JSON for this type, or if
    /// `font_size_px` is not a finite positive number.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        if !config.font_size_px.is_finite() || config.font_size_px <= 0.0 {
            return Err(CoreError::InvalidConfig(format!(
                "font_size_px must be a positive number, got {}",
                config.font_size_px
            )));
        }
        Ok(config)
    }

    /// Set the font size.
    ///
    /// Non-finite or non-positive sizes are ignored. Returns whether the size
    /// was applied.
    pub fn set_font_size(&mut self, px: f32) -> bool {
        if !px.is_finite() || px <= 0.0 {
            tracing::warn!("Ignoring invalid font size: {px}");
            return false;
        }
        self.font_size_px = px;
        true
    }

    /// Builder-style [`set_font_size`](Self::set_font_size).
    #[must_use]
    pub fn with_font_size(mut self, px: f32) -> Self {
        self.set_font_size(px);
        self
    }

    /// Enable or disable the background fill.
    pub fn set_background(&mut self, enabled: bool) {
        self.background_enabled = enabled;
    }

    /// Builder-style [`set_background`](Self::set_background).
    #[must_use]
    pub fn with_background(mut self, enabled: bool) -> Self {
        self.background_enabled = enabled;
        self
    }

    /// Set the background fill color.
    #[must_use]
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = color.into();
        self
    }

    /// The background a renderer should fill with and the trimmer should match.
    ///
    /// `None` when the background is disabled or its color does not parse.
    #[must_use]
    pub fn declared_background(&self) -> Option<Color> {
        if !self.background_enabled {
            return None;
        }
        let parsed = parse_color(Some(&self.background_color));
        if parsed.is_none() {
            tracing::warn!(
                "Unrecognized background color '{}', treating as transparent",
                self.background_color
            );
        }
        parsed
    }

    /// The text fill color, falling back to the default when unparseable.
    #[must_use]
    pub fn text_fill(&self) -> Color {
        parse_color(Some(&self.text_color)).unwrap_or(Color::rgb(17, 17, 17))
    }
}
