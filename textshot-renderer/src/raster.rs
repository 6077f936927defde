//! SVG rasterization backend built on usvg/resvg/tiny-skia.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use textshot_core::{PixelGrid, RenderConfig};
use usvg::fontdb;

use crate::error::{RenderError, RenderResult};
use crate::svg::{SvgDocument, TextLayout};
use crate::Renderer;

/// Families tried for the generic `sans-serif` when the database default
/// ("Arial") is not installed.
const SANS_SERIF_FALLBACKS: &[&str] = &[
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
    "Helvetica",
    "FreeSans",
];

/// Renders text through an SVG intermediate.
///
/// Each render parses the text once to measure its shaped ink, widens the
/// layout to fit, then rasterizes the final document.
#[derive(Clone)]
pub struct SvgRenderer {
    fontdb: Arc<fontdb::Database>,
}

impl SvgRenderer {
    /// Create a renderer using the system fonts.
    #[must_use]
    pub fn new() -> Self {
        Self::with_font_dirs(&[])
    }

    /// Create a renderer using the system fonts plus every font in `dirs`.
    ///
    /// The generic `sans-serif` family is pointed at an installed face when
    /// the database default is missing.
    #[must_use]
    pub fn with_font_dirs(dirs: &[PathBuf]) -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        for dir in dirs {
            db.load_fonts_dir(dir);
        }
        tracing::debug!("Loaded {} font faces", db.len());
        resolve_sans_serif(&mut db);
        Self::with_fontdb(Arc::new(db))
    }

    /// Create a renderer from an existing font database.
    #[must_use]
    pub fn with_fontdb(fontdb: Arc<fontdb::Database>) -> Self {
        Self { fontdb }
    }

    /// Number of font faces available to the renderer.
    #[must_use]
    pub fn font_face_count(&self) -> usize {
        self.fontdb.len()
    }

    /// Render synchronously on the current thread.
    ///
    /// # Errors
    ///
    /// Returns an error if layout or rasterization fails.
    pub fn render_blocking(&self, text: &str, config: &RenderConfig) -> RenderResult<PixelGrid> {
        let doc = self.document(text, config)?;
        rasterize_svg(&doc.markup, Arc::clone(&self.fontdb))
    }

    /// Lay out `text` against the shaped glyphs and build the final SVG.
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot be laid out or measured.
    pub fn document(&self, text: &str, config: &RenderConfig) -> RenderResult<SvgDocument> {
        let mut layout = TextLayout::new(text, config)?;
        let measure = SvgDocument::text_only(&layout, config);
        let tree = parse_svg(&measure.markup, Arc::clone(&self.fontdb))?;

        // Text that found no face is dropped by usvg and leaves no children.
        let root = tree.root();
        if root.has_children() {
            let ink = root.abs_bounding_box();
            layout.fit_ink(ink.right(), ink.bottom())?;
        } else if layout.lines.iter().any(|l| !l.trim().is_empty()) {
            tracing::warn!("No font face resolved for text, rendering without glyphs");
        }

        Ok(SvgDocument::from_layout(&layout, config))
    }
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SvgRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SvgRenderer")
            .field("font_faces", &self.fontdb.len())
            .finish()
    }
}

#[async_trait]
impl Renderer for SvgRenderer {
    async fn render(&self, text: &str, config: &RenderConfig) -> RenderResult<PixelGrid> {
        let renderer = self.clone();
        let text = text.to_owned();
        let config = config.clone();

        tokio::task::spawn_blocking(move || renderer.render_blocking(&text, &config))
            .await
            .map_err(|e| RenderError::Task(e.to_string()))?
    }
}

/// Point the generic `sans-serif` family at an installed face.
///
/// Keeps the database default when it resolves. Otherwise tries
/// [`SANS_SERIF_FALLBACKS`], then the first loaded face.
pub fn resolve_sans_serif(db: &mut fontdb::Database) {
    if has_family(db, fontdb::Family::SansSerif) {
        return;
    }

    let fallback = SANS_SERIF_FALLBACKS
        .iter()
        .copied()
        .find(|name| has_family(db, fontdb::Family::Name(name)))
        .map(str::to_owned)
        .or_else(|| {
            db.faces()
                .find_map(|face| face.families.first().map(|(name, _)| name.clone()))
        });

    match fallback {
        Some(name) => {
            tracing::debug!("Using '{name}' for sans-serif");
            db.set_sans_serif_family(name);
        }
        None => tracing::warn!("No font faces loaded, text will not render"),
    }
}

fn has_family(db: &fontdb::Database, family: fontdb::Family<'_>) -> bool {
    let families = [family];
    db.query(&fontdb::Query {
        families: &families,
        ..fontdb::Query::default()
    })
    .is_some()
}

fn parse_svg(markup: &str, fontdb: Arc<fontdb::Database>) -> RenderResult<usvg::Tree> {
    let mut opt = usvg::Options::default();
    opt.fontdb = fontdb;

    usvg::Tree::from_str(markup, &opt)
        .map_err(|e| RenderError::Rasterize(format!("SVG parsing failed: {e}")))
}

/// Rasterize SVG markup into a straight-alpha RGBA grid.
///
/// # Errors
///
/// Returns an error if the SVG cannot be parsed or the surface cannot be
/// allocated.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn rasterize_svg(markup: &str, fontdb: Arc<fontdb::Database>) -> RenderResult<PixelGrid> {
    let tree = parse_svg(markup, fontdb)?;

    let px_w = (tree.size().width().ceil() as u32).max(1);
    let px_h = (tree.size().height().ceil() as u32).max(1);

    let mut pixmap = tiny_skia::Pixmap::new(px_w, px_h)
        .ok_or_else(|| RenderError::Rasterize(format!("Failed to create {px_w}x{px_h} pixmap")))?;

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    // tiny-skia stores premultiplied alpha; the grid is straight alpha.
    let mut data = Vec::with_capacity(pixmap.data().len());
    for px in pixmap.pixels() {
        let c = px.demultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    tracing::debug!("Rasterized SVG to {px_w}x{px_h}");
    Ok(PixelGrid::new(px_w, px_h, data)?)
}
