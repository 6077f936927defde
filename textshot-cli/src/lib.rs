//! # textshot CLI
//!
//! Argument parsing and command execution for the `textshot` binary.
//!
//! Render configuration is layered: built-in defaults, then an optional JSON
//! config file, then command-line flags (which may also come from `TEXTSHOT_*`
//! environment variables).

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use textshot_core::{
    parse_color, ContentTrimmer, RenderConfig, TrimOptions, DEFAULT_PADDING, DEFAULT_TOLERANCE,
};
use textshot_renderer::{
    load_grid_from_path, save_png, Screenshotter, SvgRenderer, DEFAULT_FILE_NAME,
};

/// Render text to trimmed PNG screenshots.
#[derive(Debug, Parser)]
#[command(name = "textshot", version, about)]
pub struct Cli {
    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render text to a PNG cropped to its content.
    Render(RenderArgs),
    /// Crop an existing image to its content.
    Trim(TrimArgs),
}

/// Trim tolerance and padding flags.
#[derive(Debug, Clone, Args)]
pub struct TrimFlags {
    /// Max summed RGB difference still counted as background.
    #[arg(long, env = "TEXTSHOT_TOLERANCE", default_value_t = DEFAULT_TOLERANCE)]
    pub tolerance: u32,

    /// Margin in pixels kept around the content.
    #[arg(long, env = "TEXTSHOT_PADDING", default_value_t = DEFAULT_PADDING)]
    pub padding: u32,
}

impl TrimFlags {
    /// Convert to trimmer options.
    #[must_use]
    pub fn options(&self) -> TrimOptions {
        TrimOptions {
            tolerance: self.tolerance,
            padding: self.padding,
        }
    }
}

/// Arguments for `textshot render`.
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Text to render. Read from stdin when omitted.
    pub text: Option<String>,

    /// JSON render configuration file.
    #[arg(long, env = "TEXTSHOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Font size in pixels.
    #[arg(long, env = "TEXTSHOT_FONT_SIZE")]
    pub font_size: Option<f32>,

    /// Draw the background fill.
    #[arg(long)]
    pub background: bool,

    /// Background fill, e.g. `rgb(255, 255, 255)`.
    #[arg(long, env = "TEXTSHOT_BACKGROUND_COLOR")]
    pub background_color: Option<String>,

    /// Text fill, e.g. `rgb(17, 17, 17)`.
    #[arg(long, env = "TEXTSHOT_TEXT_COLOR")]
    pub text_color: Option<String>,

    /// Extra directory to load fonts from. May be repeated.
    #[arg(long = "font-dir")]
    pub font_dirs: Vec<PathBuf>,

    /// Output file, or a directory to write `screenshot.png` into.
    #[arg(short, long, default_value = DEFAULT_FILE_NAME)]
    pub output: PathBuf,

    /// Print a `data:` URL to stdout instead of writing a file.
    #[arg(long)]
    pub data_url: bool,

    /// Keep the full rendered surface.
    #[arg(long)]
    pub no_trim: bool,

    /// Trim tolerance and padding.
    #[command(flatten)]
    pub trim: TrimFlags,
}

impl RenderArgs {
    /// Layer defaults, the config file and flags into a [`RenderConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded.
    pub fn resolve_config(&self) -> anyhow::Result<RenderConfig> {
        let mut config = match &self.config {
            Some(path) => RenderConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => RenderConfig::default(),
        };

        if let Some(px) = self.font_size {
            config.set_font_size(px);
        }
        if self.background {
            config.set_background(true);
        }
        if let Some(color) = &self.background_color {
            config.background_color.clone_from(color);
        }
        if let Some(color) = &self.text_color {
            config.text_color.clone_from(color);
        }

        Ok(config)
    }

    /// The text to render, from the argument or stdin.
    ///
    /// # Errors
    ///
    /// Returns an error if stdin cannot be read.
    pub fn read_text(&self) -> anyhow::Result<String> {
        if let Some(text) = &self.text {
            return Ok(text.clone());
        }
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read text from stdin")?;
        Ok(buf)
    }
}

/// Arguments for `textshot trim`.
#[derive(Debug, Args)]
pub struct TrimArgs {
    /// Image to trim.
    pub input: PathBuf,

    /// Background to match; fully transparent pixels are matched when omitted.
    #[arg(long, env = "TEXTSHOT_BACKGROUND_COLOR")]
    pub background_color: Option<String>,

    /// Output file. Defaults to `<input>-trimmed.png`.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Trim tolerance and padding.
    #[command(flatten)]
    pub trim: TrimFlags,
}

/// Default output path for `textshot trim`: `<stem>-trimmed.png` beside `input`.
#[must_use]
pub fn default_trim_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "image".into(), |s| s.to_string_lossy());
    input.with_file_name(format!("{stem}-trimmed.png"))
}

/// Run a parsed command line.
///
/// # Errors
///
/// Returns an error if the command fails.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Render(args) => {
            if let Some(path) = run_render(&args).await? {
                tracing::info!("Wrote {}", path.display());
            }
        }
        Command::Trim(args) => {
            let path = run_trim(&args)?;
            tracing::info!("Wrote {}", path.display());
        }
    }
    Ok(())
}

/// Execute `textshot render`.
///
/// Returns the path written, or `None` when the text was blank or the
/// screenshot was printed as a data URL.
///
/// # Errors
///
/// Returns an error if configuration, rendering or writing fails.
pub async fn run_render(args: &RenderArgs) -> anyhow::Result<Option<PathBuf>> {
    let config = args.resolve_config()?;
    let text = args.read_text()?;
    tracing::debug!(?config, "Rendering {} bytes of text", text.len());

    let mut shooter = Screenshotter::new(SvgRenderer::with_font_dirs(&args.font_dirs))
        .with_trim_options(args.trim.options());
    if args.no_trim {
        shooter = shooter.without_trim();
    }

    let Some(shot) = shooter
        .capture(&text, &config)
        .await
        .context("Failed to render screenshot")?
    else {
        tracing::warn!("Nothing to render: input text is blank");
        return Ok(None);
    };

    let (width, height) = shot.dimensions();
    tracing::info!("Captured {width}x{height} screenshot");

    if args.data_url {
        println!("{}", shot.data_url());
        return Ok(None);
    }

    let path = shot
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    Ok(Some(path))
}

/// Execute `textshot trim`. Returns the path written.
///
/// # Errors
///
/// Returns an error if the input cannot be decoded or the output written.
pub fn run_trim(args: &TrimArgs) -> anyhow::Result<PathBuf> {
    let grid = load_grid_from_path(&args.input)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;

    let background = parse_color(args.background_color.as_deref());
    if args.background_color.is_some() && background.is_none() {
        tracing::warn!("Unrecognized background color, matching transparent pixels only");
    }

    let trimmed = ContentTrimmer::new(args.trim.options()).trim(&grid, background);
    let (w, h) = grid.dimensions();
    let (tw, th) = trimmed.dimensions();
    tracing::info!("Trimmed {w}x{h} to {tw}x{th}");

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_trim_output(&args.input));
    save_png(&trimmed, &output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    Ok(output)
}
