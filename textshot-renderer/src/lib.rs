//! # textshot Renderer
//!
//! Turns preview text into pixels and pixels into PNG screenshots.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────┐   ┌──────────────┐   ┌─────────────┐   ┌──────────┐
//! │ text +   │──▶│ Renderer     │──▶│ Content     │──▶│ PNG      │
//! │ config   │   │ (SVG→pixels) │   │ Trimmer     │   │ Exporter │
//! └──────────┘   └──────────────┘   └─────────────┘   └──────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod export;
pub mod image;
#[cfg(feature = "svg")]
pub mod raster;
pub mod screenshot;
pub mod svg;

pub use error::{RenderError, RenderResult};
pub use export::{encode_png, save_png, to_data_url, DEFAULT_FILE_NAME};
pub use crate::image::{load_grid_from_bytes, load_grid_from_path};
#[cfg(feature = "svg")]
pub use raster::SvgRenderer;
pub use screenshot::{Screenshot, Screenshotter};
pub use svg::{SvgDocument, TextLayout};

use async_trait::async_trait;
use textshot_core::{PixelGrid, RenderConfig};

/// Rasterizes a block of text into an RGBA grid.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Render `text` styled by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot be laid out or rasterized.
    async fn render(&self, text: &str, config: &RenderConfig) -> RenderResult<PixelGrid>;
}
