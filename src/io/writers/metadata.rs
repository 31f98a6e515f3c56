use gdal::Dataset;
use gdal::Metadata;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::params::ProcessingParams;
use crate::types::{BandTriplet, Pipeline, Rgb, WaterSummary};

/// Provenance and processing description attached to every saved image.
#[derive(Debug, Clone, Serialize)]
pub struct OutputMetadata {
    pub conversion_tool: String,
    pub conversion_version: String,
    pub conversion_timestamp: String,
    pub pipeline: Pipeline,
    pub width: usize,
    pub height: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bands: Option<BandTriplet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ndwi_threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<Rgb>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water: Option<WaterSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geotransform: Option<[f64; 6]>,
    /// Projection WKT
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crs: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epsg: Option<String>,
}

impl OutputMetadata {
    pub fn new(params: &ProcessingParams, width: usize, height: usize) -> Self {
        let water = matches!(params.pipeline, Pipeline::Water);
        Self {
            conversion_tool: env!("CARGO_PKG_NAME").to_string(),
            conversion_version: env!("CARGO_PKG_VERSION").to_string(),
            conversion_timestamp: chrono::Utc::now().to_rfc3339(),
            pipeline: params.pipeline,
            width,
            height,
            source: None,
            bands: (!water).then_some(params.bands),
            ndwi_threshold: water.then_some(params.threshold),
            highlight: water.then_some(params.highlight),
            water: None,
            geotransform: None,
            crs: None,
            epsg: None,
        }
    }

    /// Flat upper-case key/value pairs for GDAL metadata items.
    pub fn to_fields(&self) -> BTreeMap<String, String> {
        let mut fields = BTreeMap::new();
        fields.insert("CONVERSION_TOOL".to_string(), self.conversion_tool.clone());
        fields.insert(
            "CONVERSION_VERSION".to_string(),
            self.conversion_version.clone(),
        );
        fields.insert(
            "CONVERSION_TIMESTAMP".to_string(),
            self.conversion_timestamp.clone(),
        );
        fields.insert("PIPELINE".to_string(), self.pipeline.to_string());
        if let Some(source) = &self.source {
            fields.insert("SOURCE".to_string(), source.display().to_string());
        }
        if let Some(bands) = self.bands {
            fields.insert("BANDS_RGB".to_string(), bands.to_string());
        }
        if let Some(threshold) = self.ndwi_threshold {
            fields.insert("NDWI_THRESHOLD".to_string(), threshold.to_string());
        }
        if let Some([r, g, b]) = self.highlight {
            fields.insert("HIGHLIGHT_RGB".to_string(), format!("{},{},{}", r, g, b));
        }
        if let Some(epsg) = &self.epsg {
            fields.insert("CRS".to_string(), epsg.clone());
        }
        if let Some(water) = self.water {
            fields.insert("WATER_PIXELS".to_string(), water.water_pixels.to_string());
            fields.insert(
                "WATER_FRACTION".to_string(),
                format!("{:.6}", water.fraction()),
            );
        }
        fields
    }
}

#[inline]
pub fn is_identity_geotransform(gt: [f64; 6]) -> bool {
    gt == [0.0, 1.0, 0.0, 0.0, 0.0, 1.0]
}

/// Embed georeferencing and processing metadata into a GeoTIFF dataset
pub fn embed_tiff_metadata(
    ds: &mut Dataset,
    meta: &OutputMetadata,
) -> Result<(), Box<dyn std::error::Error>> {
    // Only set projection if we also set a non-identity geotransform
    if let Some(gt) = meta.geotransform.filter(|gt| !is_identity_geotransform(*gt)) {
        ds.set_geo_transform(&gt)?;
        if let Some(crs) = meta.crs.as_deref().filter(|c| !c.is_empty()) {
            ds.set_projection(crs)?;
        }
    }

    for (key, value) in meta.to_fields() {
        ds.set_metadata_item(&key, &value, "")?;
    }
    Ok(())
}

/// Write `<output>.json` next to a JPEG, which cannot carry the metadata itself
pub fn write_metadata_sidecar(
    output_path: &Path,
    meta: &OutputMetadata,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let sidecar_path = output_path.with_extension("json");
    let json_string = serde_json::to_string_pretty(meta)?;
    std::fs::write(&sidecar_path, json_string)?;
    info!("Created metadata sidecar: {:?}", sidecar_path);
    Ok(sidecar_path)
}
