//! Synthetic background/filter pairs for demonstrations and tests.
//!
//! The filter is always cut from the background before any noise is added,
//! so it stays a clean template even when the background is corrupted.
//! Randomness comes from a caller-supplied generator; seed it for
//! reproducible noise.

use crate::image::OwnedImage;
use crate::trace::trace_event;
use crate::util::{RotCorrError, RotCorrResult};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use std::ops::Range;

/// Width of the built-in base scene.
pub const BASE_WIDTH: usize = 256;
/// Height of the built-in base scene.
pub const BASE_HEIGHT: usize = 192;

/// Options for [`generate_sample`].
#[derive(Clone, Debug, PartialEq)]
pub struct SampleConfig {
    /// Subtract the mean from the background and, separately, from the filter.
    pub normalize: bool,
    /// Add zero-mean Gaussian noise to the background.
    pub add_noise: bool,
    /// Standard deviation of the background noise.
    pub noise_std: f64,
    /// Rows of the background cut out as the filter.
    pub filter_rows: Range<usize>,
    /// Columns of the background cut out as the filter.
    pub filter_cols: Range<usize>,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            normalize: true,
            add_noise: true,
            noise_std: 50.0,
            filter_rows: 75..91,
            filter_cols: 167..187,
        }
    }
}

/// Background image and the filter extracted from it.
#[derive(Clone, Debug)]
pub struct Sample {
    /// Background, possibly normalized and noisy.
    pub background: OwnedImage,
    /// Clean template cut from the background.
    pub filter: OwnedImage,
    /// Top-left `(x, y)` of the filter window inside the background.
    pub filter_origin: (usize, usize),
}

/// Deterministic 8-bit-range grayscale scene used as the default base image.
///
/// A few smooth gradients and blobs give the scene large-scale structure;
/// hashed value noise adds fine texture so small windows are distinctive.
pub fn base_image() -> OwnedImage {
    let blobs = [
        (60.0, 50.0, 18.0, 70.0),
        (176.0, 82.0, 9.0, 90.0),
        (120.0, 140.0, 30.0, -60.0),
        (210.0, 30.0, 14.0, -45.0),
    ];
    let image = OwnedImage::from_fn(BASE_WIDTH, BASE_HEIGHT, |x, y| {
        let (xf, yf) = (x as f64, y as f64);
        let mut v = 110.0
            + 35.0 * (xf * 0.043 + 0.8 * (yf * 0.031).sin()).sin()
            + 25.0 * (yf * 0.067).cos() * (xf * 0.021).cos();
        for (bx, by, radius, amp) in blobs {
            let d2 = (xf - bx).powi(2) + (yf - by).powi(2);
            v += amp * (-d2 / (2.0 * radius * radius)).exp();
        }
        v += 30.0 * hash_noise(x, y);
        v.round().clamp(0.0, 255.0)
    });
    image.expect("base scene dimensions are non-zero")
}

/// Integer hash mapped to `[-0.5, 0.5)`.
fn hash_noise(x: usize, y: usize) -> f64 {
    let mut h = (x as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (y as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F);
    h ^= h >> 29;
    h = h.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    h ^= h >> 32;
    (h >> 11) as f64 / (1u64 << 53) as f64 - 0.5
}

/// Builds a sample from the built-in base scene.
pub fn generate_sample<R: Rng + ?Sized>(cfg: &SampleConfig, rng: &mut R) -> RotCorrResult<Sample> {
    generate_sample_from(&base_image(), cfg, rng)
}

/// Builds a sample from an arbitrary base image.
///
/// Steps: optional background normalization, filter extraction (with its own
/// optional normalization), then optional noise on the background only.
pub fn generate_sample_from<R: Rng + ?Sized>(
    base: &OwnedImage,
    cfg: &SampleConfig,
    rng: &mut R,
) -> RotCorrResult<Sample> {
    if cfg.add_noise && !(cfg.noise_std.is_finite() && cfg.noise_std >= 0.0) {
        return Err(RotCorrError::InvalidNoise {
            reason: "noise_std must be finite and non-negative",
        });
    }

    let mut background = if cfg.normalize {
        base.zero_mean()
    } else {
        base.clone()
    };

    let x = cfg.filter_cols.start;
    let y = cfg.filter_rows.start;
    let width = cfg.filter_cols.end.saturating_sub(x);
    let height = cfg.filter_rows.end.saturating_sub(y);
    let mut filter = background.sub_image(x, y, width, height)?;
    if cfg.normalize {
        filter = filter.zero_mean();
    }

    if cfg.add_noise {
        let normal = Normal::new(0.0, cfg.noise_std).map_err(|_| RotCorrError::InvalidNoise {
            reason: "noise_std must be finite and non-negative",
        })?;
        for value in background.data_mut() {
            *value += normal.sample(rng);
        }
    }

    trace_event!(
        "sample_generated",
        width = background.width(),
        height = background.height(),
        filter_width = width,
        filter_height = height,
        noisy = cfg.add_noise
    );

    Ok(Sample {
        background,
        filter,
        filter_origin: (x, y),
    })
}

/// Uniform `[0, 1)` background and filter of the requested sizes.
pub fn random_pair<R: Rng + ?Sized>(
    background: (usize, usize),
    filter: (usize, usize),
    rng: &mut R,
) -> RotCorrResult<(OwnedImage, OwnedImage)> {
    let bg = OwnedImage::from_fn(background.0, background.1, |_, _| rng.random::<f64>())?;
    let tpl = OwnedImage::from_fn(filter.0, filter.1, |_, _| rng.random::<f64>())?;
    Ok((bg, tpl))
}

#[cfg(test)]
mod tests {
    use super::{base_image, hash_noise, BASE_HEIGHT, BASE_WIDTH};

    #[test]
    fn base_image_is_deterministic_and_in_range() {
        let a = base_image();
        let b = base_image();
        assert_eq!(a, b);
        assert_eq!(a.dims(), (BASE_WIDTH, BASE_HEIGHT));
        assert!(a.data().iter().all(|&v| (0.0..=255.0).contains(&v)));
        assert!(a.data().iter().all(|&v| v.fract() == 0.0));
    }

    #[test]
    fn hash_noise_is_bounded() {
        for y in 0..32 {
            for x in 0..32 {
                let v = hash_noise(x, y);
                assert!((-0.5..0.5).contains(&v));
            }
        }
    }
}
