//! Convenience helpers for loading and saving grids via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::OwnedImage;
use crate::util::{RotCorrError, RotCorrResult};
use std::path::Path;

/// Converts a grayscale image buffer into a grid of intensities in `0..=255`.
pub fn owned_from_gray_image(img: &image::GrayImage) -> RotCorrResult<OwnedImage> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data = img.as_raw().iter().map(|&v| f64::from(v)).collect();
    OwnedImage::new(data, width, height)
}

/// Converts a dynamic image to grayscale and then into a grid.
pub fn owned_from_dynamic_image(img: &image::DynamicImage) -> RotCorrResult<OwnedImage> {
    owned_from_gray_image(&img.to_luma8())
}

/// Loads an image from disk as a grayscale grid.
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> RotCorrResult<OwnedImage> {
    let img = image::open(path).map_err(|err| RotCorrError::ImageIo {
        reason: err.to_string(),
    })?;
    owned_from_dynamic_image(&img)
}

/// Renders a surface as an 8-bit heat map, scaling `[min, max]` to `[0, 255]`.
///
/// Constant surfaces render black.
pub fn heatmap_gray_image(surface: &OwnedImage) -> RotCorrResult<image::GrayImage> {
    let min = surface.min_value();
    let max = surface.max_value();
    let range = max - min;
    let scale = if range.is_finite() && range > 0.0 {
        255.0 / range
    } else {
        0.0
    };
    let pixels = surface
        .data()
        .iter()
        .map(|&v| ((v - min) * scale).round().clamp(0.0, 255.0) as u8)
        .collect();
    image::GrayImage::from_raw(surface.width() as u32, surface.height() as u32, pixels).ok_or(
        RotCorrError::InvalidDimensions {
            width: surface.width(),
            height: surface.height(),
        },
    )
}

/// Writes a surface heat map to `path`; the format follows the file extension.
pub fn save_heatmap<P: AsRef<Path>>(surface: &OwnedImage, path: P) -> RotCorrResult<()> {
    heatmap_gray_image(surface)?
        .save(path)
        .map_err(|err| RotCorrError::ImageIo {
            reason: err.to_string(),
        })
}
