//! Element-wise aggregation of correlation surfaces.

use crate::image::OwnedImage;
use crate::util::{RotCorrError, RotCorrResult};

fn check_shapes(surfaces: &[OwnedImage]) -> RotCorrResult<&OwnedImage> {
    let first = surfaces.first().ok_or(RotCorrError::EmptySweep)?;
    let (expected_width, expected_height) = first.dims();
    for surface in &surfaces[1..] {
        if surface.dims() != first.dims() {
            return Err(RotCorrError::ShapeMismatch {
                expected_width,
                expected_height,
                width: surface.width(),
                height: surface.height(),
            });
        }
    }
    Ok(first)
}

fn fold_surfaces<F>(surfaces: &[OwnedImage], mut combine: F) -> RotCorrResult<OwnedImage>
where
    F: FnMut(f64, f64) -> f64,
{
    let mut acc = check_shapes(surfaces)?.clone();
    for surface in &surfaces[1..] {
        for (a, &b) in acc.data_mut().iter_mut().zip(surface.data()) {
            *a = combine(*a, b);
        }
    }
    Ok(acc)
}

/// Element-wise mean over surfaces of identical shape.
pub fn mean_surface(surfaces: &[OwnedImage]) -> RotCorrResult<OwnedImage> {
    let count = surfaces.len() as f64;
    let sum = fold_surfaces(surfaces, |a, b| a + b)?;
    Ok(sum.map(|v| v / count))
}

/// Element-wise maximum over surfaces of identical shape.
///
/// NaN propagates, matching a plain comparison-based maximum.
pub fn max_surface(surfaces: &[OwnedImage]) -> RotCorrResult<OwnedImage> {
    fold_surfaces(surfaces, |a, b| if a.is_nan() || a >= b { a } else { b })
}

#[cfg(test)]
mod tests {
    use super::{max_surface, mean_surface};
    use crate::image::OwnedImage;
    use crate::util::RotCorrError;

    #[test]
    fn mean_and_max_are_element_wise() {
        let a = OwnedImage::new(vec![1.0, 4.0, -2.0, 0.0], 2, 2).unwrap();
        let b = OwnedImage::new(vec![3.0, 2.0, -6.0, 1.0], 2, 2).unwrap();
        let mean = mean_surface(&[a.clone(), b.clone()]).unwrap();
        let max = max_surface(&[a, b]).unwrap();
        assert_eq!(mean.data(), &[2.0, 3.0, -4.0, 0.5]);
        assert_eq!(max.data(), &[3.0, 4.0, -2.0, 1.0]);
    }

    #[test]
    fn max_propagates_nan() {
        let a = OwnedImage::new(vec![1.0, f64::NAN], 2, 1).unwrap();
        let b = OwnedImage::new(vec![f64::NAN, 2.0], 2, 1).unwrap();
        let max = max_surface(&[a, b]).unwrap();
        assert!(max.data().iter().all(|v| v.is_nan()));
    }

    #[test]
    fn rejects_empty_and_mismatched_inputs() {
        assert_eq!(mean_surface(&[]).unwrap_err(), RotCorrError::EmptySweep);
        let a = OwnedImage::zeros(2, 2).unwrap();
        let b = OwnedImage::zeros(3, 2).unwrap();
        assert_eq!(
            max_surface(&[a, b]).unwrap_err(),
            RotCorrError::ShapeMismatch {
                expected_width: 2,
                expected_height: 2,
                width: 3,
                height: 2,
            }
        );
    }
}
