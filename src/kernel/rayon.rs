//! Rayon-parallel correlator (feature-gated).
//!
//! Output rows are independent, so each worker fills whole rows with the
//! scalar row routine.

use crate::image::{ImageView, OwnedImage};
use crate::kernel::scalar::correlate_row;
use crate::kernel::{prepare, Boundary, Correlator, OutputMode};
use crate::util::RotCorrResult;
use rayon::prelude::*;

/// Row-parallel correlator.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParallelCorrelator;

impl Correlator for ParallelCorrelator {
    fn correlate(
        &self,
        image: ImageView<'_, f64>,
        kernel: ImageView<'_, f64>,
        boundary: Boundary,
        mode: OutputMode,
    ) -> RotCorrResult<OwnedImage> {
        let (geometry, extended, taps) = prepare(image, kernel, boundary, mode)?;
        let mut out = OwnedImage::zeros(geometry.out_width, geometry.out_height)?;
        out.data_mut()
            .par_chunks_exact_mut(geometry.out_width)
            .enumerate()
            .for_each(|(r, out_row)| correlate_row(&extended, &taps, geometry, r, out_row));
        Ok(out)
    }
}
