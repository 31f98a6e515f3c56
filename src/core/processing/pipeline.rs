use tracing::{info, warn};

use crate::core::processing::composite::build_composite;
use crate::core::processing::index::compute_ndwi;
use crate::core::processing::mask::{composite_mask, threshold_mask};
use crate::core::processing::normalize::{read_checked, require_bands};
use crate::core::processing::stretch::natural_color_background;
use crate::error::Result;
use crate::raster::BandReader;
use crate::types::{BandTriplet, OutputImage, Rgb, WaterSummary};

/// 1-based band layout read by the water pipeline (OLI-style sensors).
pub const BLUE_BAND: usize = 2;
pub const GREEN_BAND: usize = 3;
pub const RED_BAND: usize = 4;
pub const NIR_BAND: usize = 5;
pub const WATER_REQUIRED_BANDS: usize = 5;

/// Output of the water detection pipeline
#[derive(Debug, Clone)]
pub struct WaterDetection {
    pub image: OutputImage,
    pub summary: WaterSummary,
}

pub fn false_color_pipeline<R: BandReader + ?Sized>(
    raster: &R,
    bands: BandTriplet,
) -> Result<OutputImage> {
    let (rows, cols) = raster.dimensions();
    info!(
        "False-color pipeline: {}x{} raster, {} bands",
        cols,
        rows,
        raster.band_count()
    );
    build_composite(raster, bands)
}

/// NDWI water detection over a contrast-stretched natural-color background.
///
/// Pixels with NDWI strictly above `threshold` are painted with `highlight`.
/// The threshold is used as given; any real value is accepted.
pub fn water_detection_pipeline<R: BandReader + ?Sized>(
    raster: &R,
    threshold: f64,
    highlight: Rgb,
) -> Result<WaterDetection> {
    require_bands(raster, WATER_REQUIRED_BANDS)?;
    let (rows, cols) = raster.dimensions();
    info!(
        "Water detection pipeline: {}x{} raster, threshold={}",
        cols, rows, threshold
    );

    let blue = read_checked(raster, BLUE_BAND)?;
    let green = read_checked(raster, GREEN_BAND)?;
    let red = read_checked(raster, RED_BAND)?;
    let nir = read_checked(raster, NIR_BAND)?;

    let ndwi = compute_ndwi(&green, &nir)?;
    let mask = threshold_mask(&ndwi, threshold);
    let summary = WaterSummary::from_mask(&mask);
    info!(
        "Water pixels: {} of {} ({:.2}%)",
        summary.water_pixels,
        summary.total_pixels,
        summary.fraction() * 100.0
    );

    let background = natural_color_background(&red, &green, &blue)
        .inspect_err(|e| warn!("natural-color background failed: {}", e))?;
    let image = composite_mask(&background, &mask, highlight)?;

    Ok(WaterDetection { image, summary })
}
