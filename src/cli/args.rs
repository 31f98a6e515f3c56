use clap::Parser;
use std::path::PathBuf;

use spectrapro::{BandTriplet, OutputFormat, Pipeline, ProcessingParams, Rgb};

use super::errors::AppError;

#[derive(Parser, Debug)]
#[command(name = "spectrapro", version, about = "SPECTRAPRO CLI")]
pub struct CliArgs {
    /// Input raster file (single file mode)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Input directory containing raster files (batch mode)
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Output filename (single file mode)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output directory for batch processing (batch mode)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// JSON preset with processing parameters; flags below override its fields
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Pipeline to run (false-color or water)
    #[arg(short, long, value_enum)]
    pub pipeline: Option<Pipeline>,

    /// Output format (tiff or jpeg)
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Bands mapped to R,G,B for false-color, e.g. "7,3,2"
    #[arg(long)]
    pub bands: Option<BandTriplet>,

    /// NDWI threshold; pixels strictly above it are water (typically -0.5 to 0.8)
    #[arg(short, long, allow_hyphen_values = true)]
    pub threshold: Option<f64>,

    /// Water highlight colour as "R,G,B"
    #[arg(long, value_parser = parse_rgb)]
    pub highlight: Option<Rgb>,

    /// Write a world file and .prj next to georeferenced outputs
    #[arg(long, default_value_t = false)]
    pub world_file: bool,

    /// Enable logging (RUST_LOG overrides the default debug filter)
    #[arg(long, default_value_t = false)]
    pub log: bool,

    /// Batch mode: continue with other files when one fails
    #[arg(long, default_value_t = false)]
    pub batch: bool,
}

pub fn parse_rgb(s: &str) -> Result<Rgb, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected R,G,B, got '{}'", s));
    }
    let mut rgb = [0u8; 3];
    for (slot, part) in rgb.iter_mut().zip(&parts) {
        *slot = part
            .parse::<u8>()
            .map_err(|_| format!("colour component '{}' is not in 0..=255", part))?;
    }
    Ok(rgb)
}

impl CliArgs {
    /// Resolve processing parameters: preset (or defaults), then flag overrides.
    pub fn params(&self) -> Result<ProcessingParams, AppError> {
        let mut params = match &self.config {
            Some(path) => ProcessingParams::from_json_file(path)?,
            None => ProcessingParams::default(),
        };
        if let Some(pipeline) = self.pipeline {
            params.pipeline = pipeline;
        }
        if let Some(format) = self.format {
            params.format = format;
        }
        if let Some(bands) = self.bands {
            params.bands = bands;
        }
        if let Some(threshold) = self.threshold {
            params.threshold = threshold;
        }
        if let Some(highlight) = self.highlight {
            params.highlight = highlight;
        }
        params.world_file |= self.world_file;
        params.validate()?;
        Ok(params)
    }
}
