//! Integration tests for the screenshot pipeline (textshot-renderer).
//!
//! Exercises render → trim → encode with both a scripted renderer and the
//! SVG backend. Tests that assert on glyph pixels skip themselves on machines
//! without system fonts.

use async_trait::async_trait;
use textshot_core::{Color, PixelGrid, RenderConfig, TrimOptions};
use textshot_renderer::{
    load_grid_from_bytes, RenderResult, Renderer, Screenshotter, SvgRenderer, TextLayout,
};

/// Paints a background-colored surface with a dark block where the text goes,
/// plus a ring of near-background anti-aliasing noise around it.
struct ScriptedRenderer;

#[async_trait]
impl Renderer for ScriptedRenderer {
    async fn render(&self, _text: &str, config: &RenderConfig) -> RenderResult<PixelGrid> {
        let bg = config
            .declared_background()
            .map_or([0, 0, 0, 0], |c| [c.r, c.g, c.b, 255]);
        let mut grid = PixelGrid::filled(60, 40, bg)?;
        for y in 15..20 {
            for x in 20..30 {
                grid.set_pixel(x, y, [17, 17, 17, 255]);
            }
        }
        if bg[3] == 255 {
            // Within tolerance of the background: must not widen the crop.
            let noise = [
                bg[0].saturating_sub(4),
                bg[1].saturating_sub(4),
                bg[2].saturating_sub(4),
                255,
            ];
            grid.set_pixel(5, 5, noise);
            grid.set_pixel(55, 35, noise);
        }
        Ok(grid)
    }
}

// ==========================================================================
// Scripted renderer
// ==========================================================================

#[tokio::test]
async fn test_opaque_background_ignores_antialias_noise() {
    let config = RenderConfig::default()
        .with_background(true)
        .with_background_color("rgb(240, 240, 240)");

    let shot = Screenshotter::new(ScriptedRenderer)
        .capture("text", &config)
        .await
        .expect("capture")
        .expect("screenshot");

    // 10x5 block + 2px padding each side
    assert_eq!(shot.dimensions(), (14, 9));
    assert_eq!(shot.grid().pixel(0, 0), Some([240, 240, 240, 255]));
    assert_eq!(shot.grid().pixel(2, 2), Some([17, 17, 17, 255]));
}

#[tokio::test]
async fn test_transparent_background_trims_to_text() {
    let shot = Screenshotter::new(ScriptedRenderer)
        .capture("text", &RenderConfig::default())
        .await
        .expect("capture")
        .expect("screenshot");

    assert_eq!(shot.dimensions(), (14, 9));
    assert_eq!(shot.grid().pixel(0, 0), Some([0, 0, 0, 0]));
}

#[tokio::test]
async fn test_custom_padding() {
    let shot = Screenshotter::new(ScriptedRenderer)
        .with_trim_options(TrimOptions {
            padding: 5,
            ..TrimOptions::default()
        })
        .capture("text", &RenderConfig::default())
        .await
        .expect("capture")
        .expect("screenshot");

    assert_eq!(shot.dimensions(), (20, 15));
}

#[tokio::test]
async fn test_png_round_trips_trimmed_pixels() {
    let shot = Screenshotter::new(ScriptedRenderer)
        .capture("text", &RenderConfig::default())
        .await
        .expect("capture")
        .expect("screenshot");

    let decoded = load_grid_from_bytes(shot.png()).expect("decode");
    assert_eq!(&decoded, shot.grid());
}

// ==========================================================================
// SVG backend
// ==========================================================================

#[tokio::test]
async fn test_svg_capture_stays_within_layout() {
    let config = RenderConfig::default()
        .with_background(true)
        .with_background_color("rgb(255, 255, 255)");
    let renderer = SvgRenderer::new();
    let doc = renderer
        .document("Hello, world", &config)
        .expect("document");
    let estimate = TextLayout::new("Hello, world", &config).expect("layout");
    assert!(doc.width >= estimate.width && doc.height >= estimate.height);

    let shot = Screenshotter::new(renderer)
        .capture("  Hello, world \n", &config)
        .await
        .expect("capture")
        .expect("screenshot");

    let (w, h) = shot.dimensions();
    assert!(w >= 1 && w <= doc.width);
    assert!(h >= 1 && h <= doc.height);
    // Corners are padding, which matches the background within tolerance.
    let corner = shot.grid().pixel(0, 0).expect("corner");
    assert_eq!(corner[3], 255);
    assert!(Color::rgb(255, 255, 255).manhattan_distance(corner) <= 12);
}

/// Rightmost column, bottom row and count of non-transparent pixels.
fn ink_extent(grid: &PixelGrid) -> Option<(u32, u32, usize)> {
    let mut right = None;
    let mut bottom = 0;
    let mut count = 0;
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            if grid.pixel(x, y).is_some_and(|px| px[3] > 0) {
                right = Some(right.map_or(x, |r: u32| r.max(x)));
                bottom = bottom.max(y);
                count += 1;
            }
        }
    }
    right.map(|r| (r, bottom, count))
}

#[test]
fn test_svg_glyphs_are_drawn_inside_surface() {
    let renderer = SvgRenderer::new();
    if renderer.font_face_count() == 0 {
        eprintln!("skipping: no system fonts installed");
        return;
    }
    let config = RenderConfig::default();

    // Wide glyphs overrun the per-character estimate.
    for text in ["Hello", "WWWWWWWWWW", "MMMMMMMM", "gjpqy\nWWW"] {
        let grid = renderer.render_blocking(text, &config).expect("render");
        let (right, bottom, count) = ink_extent(&grid).expect("glyph ink");

        assert!(count > 10, "{text:?}: only {count} ink pixels");
        assert!(
            right + 1 < grid.width(),
            "{text:?}: ink reaches column {right} of {}",
            grid.width()
        );
        assert!(
            bottom + 1 < grid.height(),
            "{text:?}: ink reaches row {bottom} of {}",
            grid.height()
        );
    }
}

#[tokio::test]
async fn test_svg_capture_keeps_glyph_ink() {
    let renderer = SvgRenderer::new();
    if renderer.font_face_count() == 0 {
        eprintln!("skipping: no system fonts installed");
        return;
    }
    let config = RenderConfig::default()
        .with_background(true)
        .with_background_color("rgb(255, 255, 255)");

    let shot = Screenshotter::new(renderer)
        .capture("WWWWWWWWWW", &config)
        .await
        .expect("capture")
        .expect("screenshot");

    let text = config.text_fill();
    let dark = shot
        .grid()
        .rows()
        .flat_map(|row| row.chunks_exact(4))
        .filter(|px| text.manhattan_distance([px[0], px[1], px[2], px[3]]) < 200)
        .count();
    assert!(dark > 0, "trimmed screenshot holds no text pixels");
    // Ten wide glyphs overrun the estimated content width.
    let estimate = TextLayout::new("WWWWWWWWWW", &config).expect("layout");
    let content_width = estimate.width - 2 * 4;
    assert!(shot.dimensions().0 > content_width);
}

#[tokio::test]
async fn test_svg_background_is_declared_color() {
    let config = RenderConfig::default()
        .with_background(true)
        .with_background_color("rgba(10, 20, 30, 1)");
    let bg = config.declared_background().expect("background");
    assert_eq!(bg, Color::rgb(10, 20, 30));

    let grid = SvgRenderer::new()
        .render("x", &config)
        .await
        .expect("render");
    assert_eq!(grid.pixel(0, 0), Some([10, 20, 30, 255]));
}
