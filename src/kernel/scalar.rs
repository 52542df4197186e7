//! Scalar reference correlator.

use crate::image::{ImageView, OwnedImage};
use crate::kernel::{prepare, Boundary, Correlator, Extended, Geometry, OutputMode};
use crate::util::RotCorrResult;

/// Direct-sum correlator evaluating one output cell at a time.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScalarCorrelator;

/// Fills output row `r` with direct dot products over the extended image.
pub(crate) fn correlate_row(
    extended: &Extended,
    taps: &OwnedImage,
    geometry: Geometry,
    r: usize,
    out_row: &mut [f64],
) {
    let ker_w = taps.width();
    for (c, out) in out_row.iter_mut().enumerate().take(geometry.out_width) {
        let mut acc = 0.0f64;
        for (i, ker_row) in taps.data().chunks_exact(ker_w).enumerate() {
            let span = extended.span(c, r + i, ker_w);
            for (&value, &tap) in span.iter().zip(ker_row) {
                acc += value * tap;
            }
        }
        *out = acc;
    }
}

impl Correlator for ScalarCorrelator {
    fn correlate(
        &self,
        image: ImageView<'_, f64>,
        kernel: ImageView<'_, f64>,
        boundary: Boundary,
        mode: OutputMode,
    ) -> RotCorrResult<OwnedImage> {
        let (geometry, extended, taps) = prepare(image, kernel, boundary, mode)?;
        let mut out = OwnedImage::zeros(geometry.out_width, geometry.out_height)?;
        for (r, out_row) in out
            .data_mut()
            .chunks_exact_mut(geometry.out_width)
            .enumerate()
        {
            correlate_row(&extended, &taps, geometry, r, out_row);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::ScalarCorrelator;
    use crate::image::OwnedImage;
    use crate::kernel::{resolve_index, Boundary, Correlator, OutputMode};

    fn brute_force(
        image: &OwnedImage,
        kernel: &OwnedImage,
        boundary: Boundary,
        offset: (usize, usize),
        out_dims: (usize, usize),
    ) -> Vec<f64> {
        let fill = match boundary {
            Boundary::Fill(v) => v,
            _ => 0.0,
        };
        let mut out = Vec::new();
        for r in 0..out_dims.1 {
            for c in 0..out_dims.0 {
                let mut acc = 0.0;
                for i in 0..kernel.height() {
                    for j in 0..kernel.width() {
                        let y = r as isize - offset.1 as isize + i as isize;
                        let x = c as isize - offset.0 as isize + j as isize;
                        let value = match (
                            resolve_index(x, image.width(), boundary),
                            resolve_index(y, image.height(), boundary),
                        ) {
                            (Some(x), Some(y)) => image.get(x, y).unwrap(),
                            _ => fill,
                        };
                        acc += value * kernel.get(j, i).unwrap();
                    }
                }
                out.push(acc);
            }
        }
        out
    }

    fn test_pair() -> (OwnedImage, OwnedImage) {
        let image = OwnedImage::from_fn(7, 5, |x, y| ((x * 17 + y * 9 + x * y) % 23) as f64)
            .unwrap();
        let kernel =
            OwnedImage::from_fn(4, 3, |x, y| ((x * 5 + y * 11) % 7) as f64 - 3.0).unwrap();
        (image, kernel)
    }

    #[test]
    fn same_symmetric_matches_brute_force() {
        let (image, kernel) = test_pair();
        let out = ScalarCorrelator
            .correlate(image.view(), kernel.view(), Boundary::Symmetric, OutputMode::Same)
            .unwrap();
        let expected = brute_force(&image, &kernel, Boundary::Symmetric, (1, 1), (7, 5));
        assert_eq!(out.dims(), (7, 5));
        for (a, b) in out.data().iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn full_fill_matches_brute_force() {
        let (image, kernel) = test_pair();
        let out = ScalarCorrelator
            .correlate(image.view(), kernel.view(), Boundary::Fill(2.0), OutputMode::Full)
            .unwrap();
        let expected = brute_force(&image, &kernel, Boundary::Fill(2.0), (3, 2), (10, 7));
        assert_eq!(out.dims(), (10, 7));
        for (a, b) in out.data().iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn valid_wrap_matches_brute_force() {
        let (image, kernel) = test_pair();
        let out = ScalarCorrelator
            .correlate(image.view(), kernel.view(), Boundary::Wrap, OutputMode::Valid)
            .unwrap();
        let expected = brute_force(&image, &kernel, Boundary::Wrap, (0, 0), (4, 3));
        assert_eq!(out.dims(), (4, 3));
        for (a, b) in out.data().iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-9);
        }
    }
}
