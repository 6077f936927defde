//! Screenshot pipeline: render, trim, encode.

use std::path::{Path, PathBuf};

use textshot_core::{export_text, ContentTrimmer, PixelGrid, RenderConfig, TrimOptions};

use crate::error::RenderResult;
use crate::export::{encode_png, to_data_url, DEFAULT_FILE_NAME};
use crate::Renderer;

/// An encoded, trimmed screenshot.
#[derive(Debug, Clone)]
pub struct Screenshot {
    grid: PixelGrid,
    png: Vec<u8>,
    file_name: String,
}

impl Screenshot {
    /// The trimmed pixels.
    #[must_use]
    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    /// PNG-encoded bytes.
    #[must_use]
    pub fn png(&self) -> &[u8] {
        &self.png
    }

    /// Consume the screenshot, returning the PNG bytes.
    #[must_use]
    pub fn into_png(self) -> Vec<u8> {
        self.png
    }

    /// `(width, height)` of the trimmed image.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.grid.dimensions()
    }

    /// Suggested download file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The PNG as a `data:` URL.
    #[must_use]
    pub fn data_url(&self) -> String {
        to_data_url(&self.png)
    }

    /// Write the PNG to `path`, or to `path/<file_name>` if `path` is a directory.
    ///
    /// Returns the path written.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> RenderResult<PathBuf> {
        let path = path.as_ref();
        let target = if path.is_dir() {
            path.join(&self.file_name)
        } else {
            path.to_path_buf()
        };
        std::fs::write(&target, &self.png)?;
        tracing::info!("Saved screenshot to {}", target.display());
        Ok(target)
    }
}

/// Captures text as a trimmed PNG.
pub struct Screenshotter<R> {
    renderer: R,
    trimmer: Option<ContentTrimmer>,
    file_name: String,
}

impl<R: Renderer> Screenshotter<R> {
    /// Create a screenshotter with default trim options.
    #[must_use]
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            trimmer: Some(ContentTrimmer::default()),
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }

    /// Use custom trim tolerance/padding.
    #[must_use]
    pub fn with_trim_options(mut self, options: TrimOptions) -> Self {
        self.trimmer = Some(ContentTrimmer::new(options));
        self
    }

    /// Export the full rendered surface without trimming.
    #[must_use]
    pub fn without_trim(mut self) -> Self {
        self.trimmer = None;
        self
    }

    /// Use a different download file name.
    #[must_use]
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    /// The underlying renderer.
    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Render, trim and encode `text`.
    ///
    /// Returns `Ok(None)` when `text` is blank.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or encoding fails.
    pub async fn capture(
        &self,
        text: &str,
        config: &RenderConfig,
    ) -> RenderResult<Option<Screenshot>> {
        let Some(text) = export_text(text) else {
            tracing::debug!("Blank text, skipping screenshot");
            return Ok(None);
        };

        let rendered = match self.renderer.render(text, config).await {
            Ok(grid) => grid,
            Err(e) => {
                tracing::error!("Render failed: {e}");
                return Err(e);
            }
        };

        let grid = match &self.trimmer {
            Some(trimmer) => trimmer
                .trim(&rendered, config.declared_background())
                .into_owned(),
            None => rendered,
        };

        let png = encode_png(&grid)?;
        Ok(Some(Screenshot {
            grid,
            png,
            file_name: self.file_name.clone(),
        }))
    }
}
