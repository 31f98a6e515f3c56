//! High-level, ergonomic library API: the false-color and water detection
//! operations over any `BandReader`, file-to-buffer and file-to-file helpers, and
//! a batch helper for directories. Prefer these entrypoints over the low-level
//! processing modules when integrating SPECTRAPRO.
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::core::params::ProcessingParams;
use crate::core::processing::pipeline::{false_color_pipeline, water_detection_pipeline};
use crate::core::processing::save::save_image;
use crate::error::{Error, Result};
use crate::io::gdal::GdalRasterReader;
use crate::io::writers::metadata::OutputMetadata;
use crate::raster::BandReader;
use crate::types::{BandTriplet, DEFAULT_HIGHLIGHT, OutputImage, Pipeline, Rgb, WaterSummary};

/// File extensions picked up by directory batch processing
pub const RASTER_EXTENSIONS: &[&str] = &["tif", "tiff", "img", "jp2", "vrt"];

/// False-color composite from bands 7, 3, 2.
pub fn build_false_color_composite<R: BandReader + ?Sized>(raster: &R) -> Result<OutputImage> {
    false_color_pipeline(raster, BandTriplet::default())
}

pub fn build_false_color_composite_with<R: BandReader + ?Sized>(
    raster: &R,
    bands: BandTriplet,
) -> Result<OutputImage> {
    false_color_pipeline(raster, bands)
}

/// Water bodies (NDWI > `threshold`) highlighted over a natural-color background.
pub fn detect_water_bodies<R: BandReader + ?Sized>(
    raster: &R,
    threshold: f64,
) -> Result<OutputImage> {
    Ok(water_detection_pipeline(raster, threshold, DEFAULT_HIGHLIGHT)?.image)
}

pub fn detect_water_bodies_with<R: BandReader + ?Sized>(
    raster: &R,
    threshold: f64,
    highlight: Rgb,
) -> Result<OutputImage> {
    Ok(water_detection_pipeline(raster, threshold, highlight)?.image)
}

/// Result of in-memory processing
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    pub width: usize,
    pub height: usize,
    pub pipeline: Pipeline,
    pub image: OutputImage,
    /// Present for the water pipeline only
    pub water: Option<WaterSummary>,
}

/// Run the pipeline selected by `params` over any band source
pub fn process_raster<R: BandReader + ?Sized>(
    raster: &R,
    params: &ProcessingParams,
) -> Result<ProcessedImage> {
    params.validate()?;
    let (image, water) = match params.pipeline {
        Pipeline::FalseColor => (false_color_pipeline(raster, params.bands)?, None),
        Pipeline::Water => {
            let detection = water_detection_pipeline(raster, params.threshold, params.highlight)?;
            (detection.image, Some(detection.summary))
        }
    };
    let (height, width, _) = image.dim();
    Ok(ProcessedImage {
        width,
        height,
        pipeline: params.pipeline,
        image,
        water,
    })
}

/// Open a raster file with GDAL and process it to an in-memory image (no output I/O)
pub fn process_file_to_buffer(input: &Path, params: &ProcessingParams) -> Result<ProcessedImage> {
    let reader = GdalRasterReader::open(input)?;
    process_raster(&reader, params)
}

/// Open, process, and save a raster file in one call
pub fn process_file_to_path(input: &Path, output: &Path, params: &ProcessingParams) -> Result<()> {
    let reader = GdalRasterReader::open(input)?;
    let processed = process_raster(&reader, params)?;

    let mut metadata = OutputMetadata::new(params, processed.width, processed.height);
    metadata.source = Some(input.to_path_buf());
    metadata.water = processed.water;
    metadata.geotransform = reader.metadata.geotransform;
    metadata.crs = reader.metadata.projection.clone();
    metadata.epsg = reader.metadata.epsg.clone();

    save_image(
        &processed.image,
        output,
        params.format,
        &metadata,
        params.world_file,
    )
}

/// Batch processing report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
}

fn has_raster_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| RASTER_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Return the raster files directly inside `input_dir`, sorted by path
pub fn iterate_raster_files(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(input_dir)? {
        let path = entry?.path();
        if path.is_file() && has_raster_extension(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Process every raster file in `input_dir` into `output_dir` using `params`.
/// Outputs reuse the input file stem. If `continue_on_error` is true, failures are
/// counted in the report and processing continues; otherwise the first error is returned.
pub fn process_directory_to_path(
    input_dir: &Path,
    output_dir: &Path,
    params: &ProcessingParams,
    continue_on_error: bool,
) -> Result<BatchReport> {
    std::fs::create_dir_all(output_dir)?;

    let files = iterate_raster_files(input_dir)?;
    let entries = std::fs::read_dir(input_dir)?.count();
    let mut report = BatchReport {
        skipped: entries.saturating_sub(files.len()),
        ..Default::default()
    };
    info!(
        "Found {} raster files in {:?} ({} other entries skipped)",
        files.len(),
        input_dir,
        report.skipped
    );

    for path in files {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .ok_or_else(|| Error::InvalidArgument {
                arg: "input",
                value: path.display().to_string(),
            })?;
        let output = output_dir.join(format!("{}.{}", stem, params.format.extension()));

        info!("Processing: {:?} -> {:?}", path, output);
        match process_file_to_path(&path, &output, params) {
            Ok(()) => report.processed += 1,
            Err(e) if continue_on_error => {
                warn!("Error processing {:?}: {}", path, e);
                report.errors += 1;
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        "Batch complete: processed={}, skipped={}, errors={}",
        report.processed, report.skipped, report.errors
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::InMemoryRaster;

    #[test]
    fn process_raster_dispatches_on_pipeline() {
        let raster = InMemoryRaster::constant_bands(4, 6, 7, |i| i as f64);

        let composite = process_raster(&raster, &ProcessingParams::default()).unwrap();
        assert_eq!((composite.width, composite.height), (6, 4));
        assert_eq!(composite.pipeline, Pipeline::FalseColor);
        assert!(composite.water.is_none());

        let params = ProcessingParams {
            pipeline: Pipeline::Water,
            threshold: -2.0,
            ..Default::default()
        };
        let water = process_raster(&raster, &params).unwrap();
        assert_eq!(water.water.unwrap().water_pixels, 24);
    }

    #[test]
    fn raster_extensions_are_case_insensitive() {
        assert!(has_raster_extension(Path::new("scene.TIF")));
        assert!(has_raster_extension(Path::new("scene.vrt")));
        assert!(!has_raster_extension(Path::new("notes.txt")));
        assert!(!has_raster_extension(Path::new("README")));
    }

    #[test]
    fn batch_counts_skips_and_errors() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        std::fs::write(input.path().join("readme.txt"), "not a raster").unwrap();
        std::fs::write(input.path().join("broken.tif"), "not a raster either").unwrap();

        let report = process_directory_to_path(
            input.path(),
            output.path(),
            &ProcessingParams::default(),
            true,
        )
        .unwrap();
        assert_eq!(
            report,
            BatchReport {
                processed: 0,
                skipped: 1,
                errors: 1
            }
        );

        let err = process_directory_to_path(
            input.path(),
            output.path(),
            &ProcessingParams::default(),
            false,
        )
        .unwrap_err();
        assert!(matches!(err, Error::RasterRead(_)));
    }
}
