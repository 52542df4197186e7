//! Error types for rotcorr.

use thiserror::Error;

/// Result alias for rotcorr operations.
pub type RotCorrResult<T> = std::result::Result<T, RotCorrError>;

/// Errors that can occur when generating samples, correlating or sweeping.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RotCorrError {
    /// Width or height is zero or the element count overflows.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Row stride is smaller than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// Backing buffer is shorter than the declared shape requires.
    #[error("buffer too small: needed {needed} elements, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Backing buffer is longer than a contiguous image of the declared shape.
    #[error("buffer too large: expected {expected} elements, got {got}")]
    BufferTooLarge { expected: usize, got: usize },
    /// A region of interest does not fit inside the image.
    #[error(
        "roi {width}x{height} at ({x}, {y}) does not fit in {img_width}x{img_height} image"
    )]
    RoiOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// Rotation step is not a finite value in `(0, 360)`.
    #[error("invalid angle step {step_deg} deg: must be finite and within (0, 360)")]
    InvalidAngleStep { step_deg: f64 },
    /// Filter exceeds the background in at least one dimension.
    #[error(
        "filter {filter_width}x{filter_height} is larger than background {image_width}x{image_height}"
    )]
    FilterTooLarge {
        filter_width: usize,
        filter_height: usize,
        image_width: usize,
        image_height: usize,
    },
    /// Surfaces with different shapes cannot be aggregated element-wise.
    #[error(
        "shape mismatch: expected {expected_width}x{expected_height}, got {width}x{height}"
    )]
    ShapeMismatch {
        expected_width: usize,
        expected_height: usize,
        width: usize,
        height: usize,
    },
    /// Noise parameters are unusable.
    #[error("invalid noise: {reason}")]
    InvalidNoise { reason: &'static str },
    /// Aggregation was requested over zero surfaces.
    #[error("cannot aggregate an empty sweep")]
    EmptySweep,
    /// Image decoding or encoding failed.
    #[cfg(feature = "image-io")]
    #[error("image io: {reason}")]
    ImageIo { reason: String },
}
