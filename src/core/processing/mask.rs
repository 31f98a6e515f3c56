use ndarray::Axis;

use crate::core::processing::normalize::ensure_same_shape;
use crate::error::Result;
use crate::types::{IndexArray, OutputImage, Rgb, WaterMask};

/// Strict threshold: a pixel equal to `threshold` is not water. NaN never is.
pub fn threshold_mask(index: &IndexArray, threshold: f64) -> WaterMask {
    index.mapv(|v| v > threshold)
}

/// Copy `background`, painting every masked pixel with `highlight`.
pub fn composite_mask(
    background: &OutputImage,
    mask: &WaterMask,
    highlight: Rgb,
) -> Result<OutputImage> {
    let (rows, cols, _) = background.dim();
    ensure_same_shape((rows, cols), mask.dim())?;

    let mut output = background.clone();
    for (mut row, mask_row) in output.axis_iter_mut(Axis(0)).zip(mask.outer_iter()) {
        for (mut pixel, &water) in row.axis_iter_mut(Axis(0)).zip(mask_row.iter()) {
            if water {
                for (channel, &value) in pixel.iter_mut().zip(highlight.iter()) {
                    *channel = value;
                }
            }
        }
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::DEFAULT_HIGHLIGHT;
    use ndarray::{Array2, Array3, array};

    #[test]
    fn threshold_is_strict() {
        let index = array![[0.5, 0.5 + 1e-12], [0.49, f64::NAN]];
        let mask = threshold_mask(&index, 0.5);
        assert_eq!(mask, array![[false, true], [false, false]]);
    }

    #[test]
    fn masked_pixels_take_highlight_and_others_are_untouched() {
        let background = Array3::from_shape_fn((2, 3, 3), |(y, x, c)| (y * 30 + x * 10 + c) as u8);
        let mask = array![[true, false, false], [false, false, true]];
        let out = composite_mask(&background, &mask, DEFAULT_HIGHLIGHT).unwrap();

        for ((y, x), &water) in mask.indexed_iter() {
            let px: Vec<u8> = (0..3).map(|c| out[[y, x, c]]).collect();
            if water {
                assert_eq!(px, vec![60, 130, 255]);
            } else {
                let bg: Vec<u8> = (0..3).map(|c| background[[y, x, c]]).collect();
                assert_eq!(px, bg);
            }
        }
        // input left as it was
        assert_eq!(background[[0, 0, 0]], 0);
    }

    #[test]
    fn mask_shape_must_match_background() {
        let background = Array3::<u8>::zeros((2, 2, 3));
        let mask = Array2::from_elem((2, 3), true);
        assert!(matches!(
            composite_mask(&background, &mask, DEFAULT_HIGHLIGHT),
            Err(Error::ShapeMismatch {
                expected: (2, 2),
                actual: (2, 3)
            })
        ));
    }
}
