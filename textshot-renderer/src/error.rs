//! Renderer error types.

use textshot_core::CoreError;
use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while rendering, encoding or decoding.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Text layout produced an unusable surface.
    #[error("Layout failed: {0}")]
    Layout(String),

    /// SVG parsing or rasterization failed.
    #[error("Rasterization failed: {0}")]
    Rasterize(String),

    /// The blocking render task panicked or was cancelled.
    #[error("Render task failed: {0}")]
    Task(String),

    /// Export/encoding failed.
    #[error("Export failed: {0}")]
    Export(String),

    /// Resource loading or decoding failed.
    #[error("Failed to load resource: {0}")]
    Resource(String),

    /// Invalid pixel data.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// File system error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
