use ndarray::Array2;
use tracing::{debug, warn};

use crate::core::processing::normalize::{stack_channels, unit_to_u8};
use crate::error::{Error, Result};
use crate::types::OutputImage;

pub const LOW_PERCENTILE: f64 = 2.0;
pub const HIGH_PERCENTILE: f64 = 98.0;

/// Percentile of an ascending-sorted, non-empty slice, interpolating linearly
/// between the two closest ranks (rank = p/100 * (n - 1)).
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let rank = (p / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Clip bounds `(p2, p98)` for a band.
///
/// Only strictly positive samples take part, so zero/negative no-data fill does not
/// drag the low end down. A band with no positive samples falls back to all finite
/// samples; a band with samples but none finite is an `EmptyBand` error.
/// Returns `Ok(None)` for a zero-sized band.
pub fn stretch_bounds(band: &Array2<f64>) -> Result<Option<(f64, f64)>> {
    if band.is_empty() {
        return Ok(None);
    }

    let mut samples: Vec<f64> = band
        .iter()
        .copied()
        .filter(|&v| v > 0.0 && v.is_finite())
        .collect();
    if samples.is_empty() {
        samples = band.iter().copied().filter(|v| v.is_finite()).collect();
        if samples.is_empty() {
            return Err(Error::EmptyBand);
        }
        warn!(
            "band has no positive samples; stretching over all {} finite samples",
            samples.len()
        );
    }

    samples.sort_by(|a, b| a.total_cmp(b));
    let low = percentile_sorted(&samples, LOW_PERCENTILE);
    let high = percentile_sorted(&samples, HIGH_PERCENTILE);
    debug!(
        "stretch bounds: p{}={:.4}, p{}={:.4} over {} samples",
        LOW_PERCENTILE,
        low,
        HIGH_PERCENTILE,
        high,
        samples.len()
    );
    Ok(Some((low, high)))
}

/// Percentile contrast stretch of one band into [0, 1].
///
/// Every sample (no-data included) is clipped to `[p2, p98]` and rescaled linearly.
/// A degenerate range (`p98 == p2`) gives all zeros. NaN samples map to 0.
pub fn stretch_band(band: &Array2<f64>) -> Result<Array2<f64>> {
    let Some((low, high)) = stretch_bounds(band)? else {
        return Ok(Array2::zeros(band.dim()));
    };
    if high == low {
        debug!("degenerate stretch range at {:.4}, returning zeros", low);
        return Ok(Array2::zeros(band.dim()));
    }

    let span = high - low;
    Ok(band.mapv(|v| {
        if v.is_nan() {
            0.0
        } else {
            (v.clamp(low, high) - low) / span
        }
    }))
}

/// Natural-color 8-bit background: each band stretched independently, then
/// stacked as R, G, B and scaled with `round(v * 255)`.
pub fn natural_color_background(
    red: &Array2<f64>,
    green: &Array2<f64>,
    blue: &Array2<f64>,
) -> Result<OutputImage> {
    let stacked = stack_channels(
        &stretch_band(red)?,
        &stretch_band(green)?,
        &stretch_band(blue)?,
    )?;
    Ok(stacked.mapv(unit_to_u8))
}
