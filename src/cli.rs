//! Command-line interface implementation

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use crate::config::ScalerConfig;
use crate::convert::{pack_image, unpack_image};
use crate::parallel::scale_parallel;
use crate::pixel::ChannelLayout;
use crate::scaler::Scaler;

/// Exit codes
const EXIT_SUCCESS: u8 = 0;
const EXIT_ERROR: u8 = 1;
const EXIT_INVALID_ARGS: u8 = 2;

/// xBRZ - scale pixel art images by rule-based edge analysis
#[derive(Parser)]
#[command(name = "xbrz")]
#[command(about = "xBRZ - scale pixel art images by rule-based edge analysis")]
#[command(version)]
pub struct Cli {
    /// Input image file (any format the image crate can decode)
    pub input: PathBuf,

    /// Output image file; format chosen by extension
    pub output: PathBuf,

    /// Integer scale factor
    #[arg(short, long, default_value = "2", value_parser = clap::value_parser!(u8).range(2..=5))]
    pub factor: u8,

    /// Equal-color tolerance (perceptual distance under which colors merge)
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Weight of the luma component in color comparison
    #[arg(long)]
    pub luminance_weight: Option<f64>,

    /// Gradient ratio above which an edge direction counts as dominant
    #[arg(long)]
    pub dominant_threshold: Option<f64>,

    /// Direction ratio above which a line counts as steep/shallow
    #[arg(long)]
    pub steep_threshold: Option<f64>,

    /// Packed channel layout used internally
    #[arg(long, value_enum, default_value_t = ChannelLayout::Argb)]
    pub layout: ChannelLayout,

    /// Read base configuration from a TOML file (flags override it)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Scale row bands on all cores instead of a single thread
    #[arg(long)]
    pub parallel: bool,
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let cfg = match build_config(&cli) {
        Ok(cfg) => cfg,
        Err(message) => {
            eprintln!("Error: {}", message);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let scaler = match Scaler::new(cli.factor as usize, cfg) {
        Ok(scaler) => scaler,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let img = match image::open(&cli.input) {
        Ok(img) => img.to_rgba8(),
        Err(e) => {
            eprintln!("Error: Cannot open input file '{}': {}", cli.input.display(), e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let (width, height) = img.dimensions();
    let factor = scaler.factor();
    let src = pack_image(&img, cfg.channel_layout);
    let mut dst = vec![0u32; src.len() * factor * factor];

    let result = if cli.parallel {
        scale_parallel(&scaler, &src, width as usize, height as usize, &mut dst)
    } else {
        scaler.scale_image(&src, width as usize, height as usize, &mut dst)
    };
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_ERROR);
    }

    let scaled = match unpack_image(&dst, width * factor as u32, height * factor as u32, cfg.channel_layout)
    {
        Ok(scaled) => scaled,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if let Err(e) = scaled.save(&cli.output) {
        eprintln!("Error: Cannot write output file '{}': {}", cli.output.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }

    ExitCode::from(EXIT_SUCCESS)
}

/// Resolve the effective config: file base (if given), then flag overrides.
fn build_config(cli: &Cli) -> Result<ScalerConfig, String> {
    let mut cfg = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("Cannot read config file '{}': {}", path.display(), e))?;
            toml::from_str(&text)
                .map_err(|e| format!("Cannot parse config file '{}': {}", path.display(), e))?
        }
        None => ScalerConfig::default(),
    };

    if let Some(tolerance) = cli.tolerance {
        cfg.equal_color_tolerance = tolerance;
    }
    if let Some(weight) = cli.luminance_weight {
        cfg.luminance_weight = weight;
    }
    if let Some(dominant) = cli.dominant_threshold {
        cfg.dominant_direction_threshold = dominant;
    }
    if let Some(steep) = cli.steep_threshold {
        cfg.steep_direction_threshold = steep;
    }
    cfg.channel_layout = cli.layout;

    Ok(cfg)
}
