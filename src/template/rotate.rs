//! Bilinear rotation with optional bounding-box expansion.

use crate::image::{ImageView, OwnedImage};
use crate::template::Rotator;
use crate::util::math::sin_cos_deg;
use crate::util::RotCorrResult;

/// Rotator sampling with first-order (bilinear) interpolation.
#[derive(Clone, Copy, Debug)]
pub struct BilinearRotator {
    /// Value used for output cells that map outside the input.
    pub fill: f64,
}

impl Default for BilinearRotator {
    fn default() -> Self {
        Self { fill: 0.0 }
    }
}

impl Rotator for BilinearRotator {
    fn rotate(
        &self,
        image: ImageView<'_, f64>,
        angle_deg: f64,
        expand: bool,
    ) -> RotCorrResult<OwnedImage> {
        rotate_bilinear(image, angle_deg, self.fill, expand)
    }
}

/// Returns the `(width, height)` that holds `dims` rotated by `angle_deg`.
///
/// Each axis is the extent of the rotated corner set, rounded half up.
pub fn expanded_dims(dims: (usize, usize), angle_deg: f64) -> (usize, usize) {
    let (sin_a, cos_a) = sin_cos_deg(angle_deg);
    let (w, h) = (dims.0 as f64, dims.1 as f64);
    let corners = [(0.0, 0.0), (0.0, w), (h, 0.0), (h, w)];

    let mut row_min = f64::INFINITY;
    let mut row_max = f64::NEG_INFINITY;
    let mut col_min = f64::INFINITY;
    let mut col_max = f64::NEG_INFINITY;
    for (r, c) in corners {
        let rr = cos_a * r + sin_a * c;
        let cc = -sin_a * r + cos_a * c;
        row_min = row_min.min(rr);
        row_max = row_max.max(rr);
        col_min = col_min.min(cc);
        col_max = col_max.max(cc);
    }

    let height = (row_max - row_min + 0.5) as usize;
    let width = (col_max - col_min + 0.5) as usize;
    (width.max(1), height.max(1))
}

/// Rotates a grid about its centre using bilinear sampling.
///
/// Centres are `((w - 1) / 2, (h - 1) / 2)` for both input and output. Each
/// output cell `(r, c)` is mapped back to the input with
/// `in_r = cos * dr + sin * dc`, `in_c = -sin * dr + cos * dc` (offsets from
/// the centres). Cells landing outside the input take `fill`. A zero angle
/// reproduces the input exactly.
pub fn rotate_bilinear(
    src: ImageView<'_, f64>,
    angle_deg: f64,
    fill: f64,
    expand: bool,
) -> RotCorrResult<OwnedImage> {
    let in_width = src.width();
    let in_height = src.height();
    let (out_width, out_height) = if expand {
        expanded_dims(src.dims(), angle_deg)
    } else {
        src.dims()
    };

    let (sin_a, cos_a) = sin_cos_deg(angle_deg);
    let in_cx = (in_width as f64 - 1.0) * 0.5;
    let in_cy = (in_height as f64 - 1.0) * 0.5;
    let out_cx = (out_width as f64 - 1.0) * 0.5;
    let out_cy = (out_height as f64 - 1.0) * 0.5;
    let max_x = in_width as f64 - 1.0;
    let max_y = in_height as f64 - 1.0;
    let epsilon = 1e-6;

    OwnedImage::from_fn(out_width, out_height, |x, y| {
        let dy = y as f64 - out_cy;
        let dx = x as f64 - out_cx;
        let src_y = cos_a * dy + sin_a * dx + in_cy;
        let src_x = -sin_a * dy + cos_a * dx + in_cx;

        if !src_x.is_finite()
            || !src_y.is_finite()
            || src_x < -epsilon
            || src_y < -epsilon
            || src_x > max_x + epsilon
            || src_y > max_y + epsilon
        {
            return fill;
        }

        let src_x = src_x.clamp(0.0, max_x);
        let src_y = src_y.clamp(0.0, max_y);
        let x0 = src_x.floor() as usize;
        let y0 = src_y.floor() as usize;
        let x1 = (x0 + 1).min(in_width - 1);
        let y1 = (y0 + 1).min(in_height - 1);
        let fx = src_x - x0 as f64;
        let fy = src_y - y0 as f64;

        let sample = |x: usize, y: usize| src.get(x, y).copied().unwrap_or(fill);
        let a = sample(x0, y0);
        let b = sample(x1, y0);
        let c = sample(x0, y1);
        let d = sample(x1, y1);
        if fx == 0.0 && fy == 0.0 {
            return a;
        }

        a * (1.0 - fx) * (1.0 - fy) + b * fx * (1.0 - fy) + c * (1.0 - fx) * fy + d * fx * fy
    })
}
