use gdal::Dataset;
use gdal::DriverManager;
use gdal::raster::{Buffer, ColorInterpretation};
use ndarray::Axis;
use std::path::Path;

use crate::types::OutputImage;

const CHANNEL_INTERPRETATION: [ColorInterpretation; 3] = [
    ColorInterpretation::RedBand,
    ColorInterpretation::GreenBand,
    ColorInterpretation::BlueBand,
];

/// Write an RGB image as a 3-band u8 GeoTIFF. The dataset is returned open so
/// callers can attach georeferencing and metadata before it is dropped.
pub fn write_tiff_rgb_u8(
    output: &Path,
    image: &OutputImage,
) -> Result<Dataset, Box<dyn std::error::Error>> {
    let (rows, cols, channels) = image.dim();
    if channels != 3 {
        return Err(format!("expected 3 channels, got {}", channels).into());
    }

    let driver = DriverManager::get_driver_by_name("GTiff")?;
    let ds = driver.create_with_band_type::<u8, _>(output, cols, rows, 3)?;

    for (i, interpretation) in CHANNEL_INTERPRETATION.into_iter().enumerate() {
        let mut band = ds.rasterband(i + 1)?;
        band.set_color_interpretation(interpretation)?;
        let plane: Vec<u8> = image.index_axis(Axis(2), i).iter().copied().collect();
        let mut buf = Buffer::new((cols, rows), plane);
        band.write((0, 0), (cols, rows), &mut buf)?;
    }

    Ok(ds)
}
