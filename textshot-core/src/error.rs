//! Error types for core operations.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Pixel buffer length does not match `width * height * 4`.
    #[error("Pixel buffer size mismatch for {width}x{height}: expected {expected} bytes, got {actual}")]
    BufferSize {
        /// Grid width in pixels.
        width: u32,
        /// Grid height in pixels.
        height: u32,
        /// Expected buffer length.
        expected: usize,
        /// Actual buffer length.
        actual: usize,
    },

    /// Crop rectangle is inverted or extends past the grid.
    #[error("Crop ({left}, {top})-({right}, {bottom}) outside {width}x{height} grid")]
    CropOutOfBounds {
        /// Leftmost requested column.
        left: u32,
        /// Topmost requested row.
        top: u32,
        /// Rightmost requested column.
        right: u32,
        /// Bottom requested row.
        bottom: u32,
        /// Grid width in pixels.
        width: u32,
        /// Grid height in pixels.
        height: u32,
    },

    /// Grid dimensions overflow the addressable buffer size.
    #[error("Grid dimensions too large: {0}x{1}")]
    DimensionsTooLarge(u32, u32),

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Reading a configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
