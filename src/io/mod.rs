//! I/O layer for reading multispectral rasters and writing rendered images.
//! Provides the GDAL-backed `BandReader` and `writers` for TIFF/JPEG outputs,
//! world files, and metadata embedding/sidecars.
pub mod gdal;
pub use self::gdal::{GdalRasterReader, RasterMetadata};

pub mod writers;
