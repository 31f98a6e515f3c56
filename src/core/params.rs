use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{BandTriplet, DEFAULT_HIGHLIGHT, OutputFormat, Pipeline, Rgb};

/// Processing parameters suitable for config files and presets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingParams {
    pub pipeline: Pipeline,
    pub format: OutputFormat,
    /// Bands mapped to R,G,B for the false-color pipeline
    pub bands: BandTriplet,
    /// NDWI threshold; pixels strictly above it are water. Not range-checked.
    pub threshold: f64,
    pub highlight: Rgb,
    /// Write a world file (and .prj) next to the output when georeferencing is known
    pub world_file: bool,
}

impl Default for ProcessingParams {
    fn default() -> Self {
        Self {
            pipeline: Pipeline::FalseColor,
            format: OutputFormat::TIFF,
            bands: BandTriplet::default(),
            threshold: 0.0,
            highlight: DEFAULT_HIGHLIGHT,
            world_file: false,
        }
    }
}

impl ProcessingParams {
    /// Load a JSON preset. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::InvalidArgument {
            arg: "config",
            value: e.to_string(),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.bands.as_array().contains(&0) {
            return Err(Error::InvalidArgument {
                arg: "bands",
                value: self.bands.to_string(),
            });
        }
        Ok(())
    }
}
