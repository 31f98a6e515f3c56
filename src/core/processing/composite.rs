use ndarray::Array3;
use tracing::{debug, info};

use crate::core::processing::normalize::{
    finite_min_max, read_checked, require_bands, rescale_to_u8, stack_channels,
};
use crate::error::{Error, Result};
use crate::raster::BandReader;
use crate::types::{BandStack, BandTriplet, OutputImage};

/// Builds an 8-bit false-color composite from three raster bands.
///
/// The bands are read in triplet order and stacked as R, G, B. A single min/max is
/// taken jointly across all three channels, so relative brightness between bands
/// survives the rescale. A flat stack (max == min) produces an all-zero image.
pub fn build_composite<R: BandReader + ?Sized>(
    raster: &R,
    bands: BandTriplet,
) -> Result<OutputImage> {
    if bands.as_array().contains(&0) {
        return Err(Error::InvalidArgument {
            arg: "bands",
            value: bands.to_string(),
        });
    }
    require_bands(raster, bands.max())?;

    info!("Building false-color composite from bands {}", bands);
    let red = read_checked(raster, bands.red)?;
    let green = read_checked(raster, bands.green)?;
    let blue = read_checked(raster, bands.blue)?;

    let stacked = stack_channels(&red, &green, &blue)?;
    Ok(scale_stack_to_u8(&stacked))
}

/// Jointly rescale a band stack into 0..=255 using its global finite min/max.
pub fn scale_stack_to_u8(stacked: &BandStack) -> OutputImage {
    let Some((min, max)) = finite_min_max(stacked.iter()) else {
        debug!("composite has no finite samples, returning zeros");
        return Array3::zeros(stacked.dim());
    };
    if max == min {
        debug!("flat composite (min == max == {}), returning zeros", min);
        return Array3::zeros(stacked.dim());
    }

    debug!("composite range: min={:.4}, max={:.4}", min, max);
    let span = max - min;
    stacked.mapv(|v| rescale_to_u8(v, min, span))
}
