//! Band access seam between the processing core and whatever decodes rasters.
//!
//! The core only ever sees a [`BandReader`]: a band count, a common (rows, cols)
//! shape, and a 1-based band accessor returning `f64` samples. [`InMemoryRaster`]
//! is the owned implementation; `io::gdal::GdalRasterReader` reads from disk.
use std::path::PathBuf;

use ndarray::Array2;
use thiserror::Error;

use crate::error::{Error, Result};

/// Errors raised by a raster collaborator while opening or decoding bands
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("Not a valid raster: {path:?} ({reason})")]
    NotRaster { path: PathBuf, reason: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Band index {index} out of range (raster has {count} bands)")]
    BandOutOfRange { index: usize, count: usize },
    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),
}

pub trait BandReader {
    /// Shape shared by every band, as (rows, cols).
    fn dimensions(&self) -> (usize, usize);

    fn band_count(&self) -> usize;

    /// Read band `index` (1-based) as an array of shape `dimensions()`.
    fn read_band(&self, index: usize) -> std::result::Result<Array2<f64>, ReadError>;
}

/// Owned band set with a validated common shape.
#[derive(Debug, Clone)]
pub struct InMemoryRaster {
    bands: Vec<Array2<f64>>,
    rows: usize,
    cols: usize,
}

impl InMemoryRaster {
    pub fn new(bands: Vec<Array2<f64>>) -> Result<Self> {
        let (rows, cols) = bands.first().map(|b| b.dim()).unwrap_or((0, 0));
        if let Some(bad) = bands.iter().find(|b| b.dim() != (rows, cols)) {
            return Err(Error::ShapeMismatch {
                expected: (rows, cols),
                actual: bad.dim(),
            });
        }
        Ok(Self { bands, rows, cols })
    }

    /// Raster of `count` bands where every pixel of band `i` (1-based) holds `value(i)`.
    pub fn constant_bands(
        rows: usize,
        cols: usize,
        count: usize,
        value: impl Fn(usize) -> f64,
    ) -> Self {
        let bands = (1..=count)
            .map(|i| Array2::from_elem((rows, cols), value(i)))
            .collect();
        Self { bands, rows, cols }
    }

    pub fn bands(&self) -> &[Array2<f64>] {
        &self.bands
    }
}

impl BandReader for InMemoryRaster {
    fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    fn band_count(&self) -> usize {
        self.bands.len()
    }

    fn read_band(&self, index: usize) -> std::result::Result<Array2<f64>, ReadError> {
        if index == 0 || index > self.bands.len() {
            return Err(ReadError::BandOutOfRange {
                index,
                count: self.bands.len(),
            });
        }
        Ok(self.bands[index - 1].clone())
    }
}
