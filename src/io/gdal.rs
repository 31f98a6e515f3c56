use gdal::{Dataset, Metadata};
use ndarray::Array2;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::raster::{BandReader, ReadError};

/// Metadata extracted from a GDAL-supported dataset
#[derive(Debug, Clone)]
pub struct RasterMetadata {
    /// Width (pixels) of the raster
    pub size_x: usize,
    /// Height (lines) of the raster
    pub size_y: usize,
    /// Number of raster bands
    pub bands: usize,
    /// Affine geotransform coefficients ([origin_x, pixel_width, rot_x, origin_y, rot_y, pixel_height])
    pub geotransform: Option<[f64; 6]>,
    /// Projection in WKT format
    pub projection: Option<String>,
    /// `EPSG:xxxx` when the projection carries an authority code
    pub epsg: Option<String>,
    /// Additional metadata key-value pairs (default domain)
    pub metadata: HashMap<String, String>,
}

/// Multispectral raster reader for GDAL-supported formats (GeoTIFF, ENVI, JP2, VRT, ...)
pub struct GdalRasterReader {
    pub dataset: Dataset,
    pub metadata: RasterMetadata,
    pub path: PathBuf,
}

// Helper to extract EPSG code from WKT authority tag
fn parse_epsg(wkt: &str) -> Option<String> {
    const KEY: &str = "AUTHORITY[\"EPSG\",\"";
    let start = wkt.rfind(KEY)? + KEY.len();
    let end = wkt[start..].find('"')?;
    Some(format!("EPSG:{}", &wkt[start..start + end]))
}

impl GdalRasterReader {
    /// Open a raster file.
    ///
    /// A path that cannot be accessed is reported as `ReadError::Io`; a file that exists
    /// but GDAL cannot decode, or that has no bands, is `ReadError::NotRaster`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ReadError> {
        let path = path.as_ref();
        let fs_meta = std::fs::metadata(path)?;
        if fs_meta.is_dir() {
            return Err(ReadError::NotRaster {
                path: path.to_path_buf(),
                reason: "path is a directory".into(),
            });
        }

        let dataset = Dataset::open(path).map_err(|e| ReadError::NotRaster {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let (size_x, size_y) = dataset.raster_size();
        let bands = dataset.raster_count() as usize;
        if bands == 0 {
            return Err(ReadError::NotRaster {
                path: path.to_path_buf(),
                reason: "no raster bands found".into(),
            });
        }

        let geotransform = dataset.geo_transform().ok();
        let proj = dataset.projection();
        let epsg = parse_epsg(&proj);
        let projection = (!proj.is_empty()).then_some(proj);

        let mut metadata_map = HashMap::new();
        if let Some(entries) = dataset.metadata_domain("") {
            for entry in entries {
                if let Some((key, val)) = entry.split_once('=') {
                    metadata_map.insert(key.to_string(), val.to_string());
                }
            }
        }

        debug!(
            "Opened {:?}: {}x{}, {} bands, crs={:?}",
            path, size_x, size_y, bands, epsg
        );

        Ok(GdalRasterReader {
            dataset,
            metadata: RasterMetadata {
                size_x: size_x as usize,
                size_y: size_y as usize,
                bands,
                geotransform,
                projection,
                epsg,
                metadata: metadata_map,
            },
            path: path.to_path_buf(),
        })
    }
}

impl BandReader for GdalRasterReader {
    fn dimensions(&self) -> (usize, usize) {
        (self.metadata.size_y, self.metadata.size_x)
    }

    fn band_count(&self) -> usize {
        self.metadata.bands
    }

    /// Read a single band (1-based index) as an f64 ndarray of shape (height, width)
    fn read_band(&self, index: usize) -> Result<Array2<f64>, ReadError> {
        if index == 0 || index > self.metadata.bands {
            return Err(ReadError::BandOutOfRange {
                index,
                count: self.metadata.bands,
            });
        }
        let band = self.dataset.rasterband(index)?;
        let window = (self.metadata.size_x, self.metadata.size_y);
        let buf = band.read_as::<f64>((0, 0), window, window, None)?;
        let data_vec = buf.data().to_vec();
        Array2::from_shape_vec((self.metadata.size_y, self.metadata.size_x), data_vec).map_err(
            |e| ReadError::NotRaster {
                path: self.path.clone(),
                reason: format!("band {} has unexpected size: {}", index, e),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::parse_epsg;

    #[test]
    fn extracts_last_epsg_authority() {
        let wkt = r#"PROJCS["WGS 84 / UTM zone 33N",GEOGCS["WGS 84",AUTHORITY["EPSG","4326"]],AUTHORITY["EPSG","32633"]]"#;
        assert_eq!(parse_epsg(wkt).as_deref(), Some("EPSG:32633"));
        assert_eq!(parse_epsg("LOCAL_CS[\"none\"]"), None);
    }
}
