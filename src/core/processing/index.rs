use ndarray::{Array2, Zip};

use crate::core::processing::normalize::ensure_same_shape;
use crate::error::Result;
use crate::types::IndexArray;

/// Normalized difference: (a - b) / (a + b) with zero handling.
///
/// Where `a + b == 0` the result is exactly `0.0`, so flat zero regions read as
/// "no signal" instead of NaN/Inf. Inputs are not range-checked.
pub fn normalized_difference(band_a: &Array2<f64>, band_b: &Array2<f64>) -> Result<IndexArray> {
    ensure_same_shape(band_a.dim(), band_b.dim())?;
    Ok(Zip::from(band_a).and(band_b).map_collect(|&a, &b| {
        let sum = a + b;
        if sum == 0.0 { 0.0 } else { (a - b) / sum }
    }))
}

/// Normalized Difference Water Index (McFeeters): (Green - NIR) / (Green + NIR)
pub fn compute_ndwi(green: &Array2<f64>, nir: &Array2<f64>) -> Result<IndexArray> {
    normalized_difference(green, nir)
}
