//! 2-D cross-correlation primitives.
//!
//! Every correlator computes
//! `out[r, c] = sum_{i, j} ext(r - oy + i, c - ox + j) * kernel[i, j]`
//! where `ext` is the image extended past its edges by a [`Boundary`] rule and
//! `(oy, ox)` is fixed by the [`OutputMode`]. Implementations first build a
//! boundary-extended copy of the image covering every tap, so the inner loops
//! never branch on edges.

use crate::image::{ImageView, OwnedImage};
use crate::util::{RotCorrError, RotCorrResult};

pub mod scalar;

#[cfg(feature = "simd")]
pub mod simd;

#[cfg(feature = "rayon")]
pub mod rayon;

pub use scalar::ScalarCorrelator;

#[cfg(feature = "simd")]
pub use simd::SimdCorrelator;

#[cfg(feature = "rayon")]
pub use self::rayon::ParallelCorrelator;

/// Rule for sampling the image outside its bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Boundary {
    /// Out-of-range samples take a constant value.
    Fill(f64),
    /// The image repeats periodically.
    Wrap,
    /// The image is mirrored across its border, edge sample included
    /// (`-1 -> 0`, `len -> len - 1`).
    Symmetric,
}

/// Output-size policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputMode {
    /// Every offset with at least one overlapping sample: `(H + kh - 1, W + kw - 1)`.
    Full,
    /// Same shape as the image, kernel anchored at `((kh - 1) / 2, (kw - 1) / 2)`.
    Same,
    /// Only offsets where the kernel lies fully inside: `(H - kh + 1, W - kw + 1)`.
    Valid,
}

/// Capability interface for a 2-D correlation primitive.
pub trait Correlator: Send + Sync {
    /// Correlates `image` with `kernel` under the given boundary rule and output policy.
    fn correlate(
        &self,
        image: ImageView<'_, f64>,
        kernel: ImageView<'_, f64>,
        boundary: Boundary,
        mode: OutputMode,
    ) -> RotCorrResult<OwnedImage>;
}

/// Output shape and anchor of one correlation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Geometry {
    pub(crate) out_width: usize,
    pub(crate) out_height: usize,
    pub(crate) offset_x: usize,
    pub(crate) offset_y: usize,
}

impl Geometry {
    pub(crate) fn new(
        image: (usize, usize),
        kernel: (usize, usize),
        mode: OutputMode,
    ) -> RotCorrResult<Self> {
        let (img_w, img_h) = image;
        let (ker_w, ker_h) = kernel;
        let geometry = match mode {
            OutputMode::Full => Self {
                out_width: img_w + ker_w - 1,
                out_height: img_h + ker_h - 1,
                offset_x: ker_w - 1,
                offset_y: ker_h - 1,
            },
            OutputMode::Same => Self {
                out_width: img_w,
                out_height: img_h,
                offset_x: (ker_w - 1) / 2,
                offset_y: (ker_h - 1) / 2,
            },
            OutputMode::Valid => {
                if ker_w > img_w || ker_h > img_h {
                    return Err(RotCorrError::FilterTooLarge {
                        filter_width: ker_w,
                        filter_height: ker_h,
                        image_width: img_w,
                        image_height: img_h,
                    });
                }
                Self {
                    out_width: img_w - ker_w + 1,
                    out_height: img_h - ker_h + 1,
                    offset_x: 0,
                    offset_y: 0,
                }
            }
        };
        Ok(geometry)
    }
}

/// Maps a possibly out-of-range index onto the image, or `None` for fill.
pub(crate) fn resolve_index(idx: isize, len: usize, boundary: Boundary) -> Option<usize> {
    let n = len as isize;
    if (0..n).contains(&idx) {
        return Some(idx as usize);
    }
    match boundary {
        Boundary::Fill(_) => None,
        Boundary::Wrap => Some(idx.rem_euclid(n) as usize),
        Boundary::Symmetric => {
            let period = 2 * n;
            let m = idx.rem_euclid(period);
            let mirrored = if m < n { m } else { period - 1 - m };
            Some(mirrored as usize)
        }
    }
}

/// Boundary-extended copy of the image covering every tap of a correlation.
///
/// Row `py` of the buffer holds image row `py - offset_y` resolved through the
/// boundary rule, so output `(r, c)` reads rows `r..r + kh` and columns
/// `c..c + kw`.
pub(crate) struct Extended {
    data: Vec<f64>,
    width: usize,
}

impl Extended {
    pub(crate) fn build(
        image: ImageView<'_, f64>,
        kernel: (usize, usize),
        geometry: Geometry,
        boundary: Boundary,
    ) -> Self {
        let (ker_w, ker_h) = kernel;
        let width = geometry.out_width + ker_w - 1;
        let height = geometry.out_height + ker_h - 1;
        let fill = match boundary {
            Boundary::Fill(value) => value,
            _ => 0.0,
        };

        let cols: Vec<Option<usize>> = (0..width)
            .map(|px| {
                resolve_index(
                    px as isize - geometry.offset_x as isize,
                    image.width(),
                    boundary,
                )
            })
            .collect();

        let mut data = Vec::with_capacity(width * height);
        for py in 0..height {
            let src_y =
                resolve_index(py as isize - geometry.offset_y as isize, image.height(), boundary);
            match src_y.and_then(|y| image.row(y)) {
                Some(row) => data.extend(cols.iter().map(|col| col.map_or(fill, |x| row[x]))),
                None => data.extend(std::iter::repeat(fill).take(width)),
            }
        }

        Self { data, width }
    }

    /// Returns `len` samples of row `y` starting at column `x`.
    #[inline]
    pub(crate) fn span(&self, x: usize, y: usize, len: usize) -> &[f64] {
        let start = y * self.width + x;
        &self.data[start..start + len]
    }
}

/// Validates inputs and prepares the extended image shared by all correlators.
pub(crate) fn prepare(
    image: ImageView<'_, f64>,
    kernel: ImageView<'_, f64>,
    boundary: Boundary,
    mode: OutputMode,
) -> RotCorrResult<(Geometry, Extended, OwnedImage)> {
    let geometry = Geometry::new(image.dims(), kernel.dims(), mode)?;
    let extended = Extended::build(image, kernel.dims(), geometry, boundary);
    let taps = OwnedImage::from_view(kernel);
    Ok((geometry, extended, taps))
}
