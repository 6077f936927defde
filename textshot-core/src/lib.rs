//! # textshot Core
//!
//! Pure, synchronous building blocks for turning rendered text into a tightly
//! cropped screenshot.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                textshot-core                │
//! ├──────────────────────┬──────────────────────┤
//! │  Color Parser        │  Content Trimmer     │
//! │  - rgb()/rgba()      │  - Bounding box scan │
//! │  - transparent       │  - Tolerance match   │
//! ├──────────────────────┴──────────────────────┤
//! │  PixelGrid (RGBA8)   │  RenderConfig        │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod color;
pub mod config;
pub mod error;
pub mod grid;
pub mod preview;
pub mod trim;

pub use color::{parse_color, Color};
pub use config::RenderConfig;
pub use error::{CoreError, CoreResult};
pub use grid::{PixelGrid, Rgba};
pub use preview::{display_text, export_text, PLACEHOLDER_TEXT};
pub use trim::{
    find_content_bounds, trim_to_content, BoundingBox, ContentTrimmer, TrimOptions,
    DEFAULT_PADDING, DEFAULT_TOLERANCE,
};

/// textshot core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
