use ndarray::{Array2, Axis, stack};
use tracing::debug;

use crate::error::{Error, Result};
use crate::raster::BandReader;
use crate::types::BandStack;

pub fn ensure_same_shape(expected: (usize, usize), actual: (usize, usize)) -> Result<()> {
    if expected != actual {
        return Err(Error::ShapeMismatch { expected, actual });
    }
    Ok(())
}

/// Fail with `InsufficientBands` unless the raster carries at least `required` bands.
pub fn require_bands<R: BandReader + ?Sized>(raster: &R, required: usize) -> Result<()> {
    let actual = raster.band_count();
    if actual < required {
        return Err(Error::InsufficientBands { actual, required });
    }
    Ok(())
}

/// Read a 1-based band and check it against the raster's declared shape.
pub fn read_checked<R: BandReader + ?Sized>(raster: &R, index: usize) -> Result<Array2<f64>> {
    let band = raster.read_band(index)?;
    ensure_same_shape(raster.dimensions(), band.dim())?;
    debug!("read band {} ({}x{})", index, band.nrows(), band.ncols());
    Ok(band)
}

/// Min and max over the finite values only; `None` when there are none.
pub fn finite_min_max<'a, I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = &'a f64>,
{
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Map `value` from `[min, min + span]` to 0..=255. NaN maps to 0.
#[inline]
pub fn rescale_to_u8(value: f64, min: f64, span: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    ((value - min) / span * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Map a unit-range value to 0..=255. NaN maps to 0.
#[inline]
pub fn unit_to_u8(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Stack three equally shaped bands as the R, G, B channels of a (rows, cols, 3) array.
pub fn stack_channels(
    red: &Array2<f64>,
    green: &Array2<f64>,
    blue: &Array2<f64>,
) -> Result<BandStack> {
    ensure_same_shape(red.dim(), green.dim())?;
    ensure_same_shape(red.dim(), blue.dim())?;
    stack(Axis(2), &[red.view(), green.view(), blue.view()]).map_err(Error::unclassified)
}
