//! Shared types and enums used across SPECTRAPRO.
//! Includes `Pipeline`, `OutputFormat`, band selection (`BandTriplet`), the array
//! aliases flowing through the processing core, `ErrorKind`, and `WaterSummary`.
use clap::ValueEnum;
use ndarray::{Array2, Array3};
use serde::{Deserialize, Serialize};

/// One raster band, shape (rows, cols).
pub type Band = Array2<f64>;
/// Three bands stacked as channels, shape (rows, cols, 3).
pub type BandStack = Array3<f64>;
/// Per-pixel normalized difference index values.
pub type IndexArray = Array2<f64>;
/// `true` where a pixel is classified as water.
pub type WaterMask = Array2<bool>;
/// 8-bit RGB image, shape (rows, cols, 3).
pub type OutputImage = Array3<u8>;
/// RGB colour triple.
pub type Rgb = [u8; 3];

pub const DEFAULT_HIGHLIGHT: Rgb = [60, 130, 255];

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Pipeline {
    FalseColor,
    Water,
}

impl std::fmt::Display for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pipeline::FalseColor => write!(f, "FalseColor"),
            Pipeline::Water => write!(f, "Water"),
        }
    }
}

#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Debug,
    ValueEnum,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum OutputFormat {
    TIFF,
    JPEG, // Lossy, preview only
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::TIFF => "tiff",
            OutputFormat::JPEG => "jpg",
        }
    }
}

/// Three 1-based band indices mapped to the R, G and B output channels.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BandTriplet {
    pub red: usize,
    pub green: usize,
    pub blue: usize,
}

impl BandTriplet {
    pub const fn new(red: usize, green: usize, blue: usize) -> Self {
        Self { red, green, blue }
    }

    pub fn max(&self) -> usize {
        self.red.max(self.green).max(self.blue)
    }

    pub fn as_array(&self) -> [usize; 3] {
        [self.red, self.green, self.blue]
    }
}

impl Default for BandTriplet {
    /// SWIR2 / Green / Blue on an OLI-style band layout.
    fn default() -> Self {
        Self::new(7, 3, 2)
    }
}

impl std::fmt::Display for BandTriplet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{}", self.red, self.green, self.blue)
    }
}

impl std::str::FromStr for BandTriplet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(format!("expected three comma-separated band indices, got '{}'", s));
        }
        let mut idx = [0usize; 3];
        for (slot, part) in idx.iter_mut().zip(&parts) {
            *slot = part
                .parse::<usize>()
                .map_err(|_| format!("invalid band index '{}'", part))?;
        }
        Ok(Self::new(idx[0], idx[1], idx[2]))
    }
}

/// Coarse classification of every [`crate::Error`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ErrorKind {
    RasterRead,
    InsufficientBands,
    ShapeMismatch,
    EmptyBand,
    Unclassified,
}

/// Pixel counts of a water mask.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct WaterSummary {
    pub water_pixels: usize,
    pub total_pixels: usize,
}

impl WaterSummary {
    pub fn from_mask(mask: &WaterMask) -> Self {
        Self {
            water_pixels: mask.iter().filter(|&&w| w).count(),
            total_pixels: mask.len(),
        }
    }

    pub fn fraction(&self) -> f64 {
        if self.total_pixels == 0 {
            0.0
        } else {
            self.water_pixels as f64 / self.total_pixels as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn band_triplet_parses_and_displays() {
        let t: BandTriplet = "5, 4,3".parse().unwrap();
        assert_eq!(t, BandTriplet::new(5, 4, 3));
        assert_eq!(t.to_string(), "5,4,3");
        assert_eq!(t.max(), 5);
        assert!("5,4".parse::<BandTriplet>().is_err());
        assert!("a,b,c".parse::<BandTriplet>().is_err());
    }

    #[test]
    fn water_summary_counts_true_pixels() {
        let mask = array![[true, false], [true, true]];
        let summary = WaterSummary::from_mask(&mask);
        assert_eq!(summary.water_pixels, 3);
        assert_eq!(summary.total_pixels, 4);
        assert!((summary.fraction() - 0.75).abs() < 1e-12);
        assert_eq!(WaterSummary::default().fraction(), 0.0);
    }
}
