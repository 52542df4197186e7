//! Filter rotation.

pub mod rotate;

use crate::image::{ImageView, OwnedImage};
use crate::util::RotCorrResult;

pub use rotate::{expanded_dims, rotate_bilinear, BilinearRotator};

/// Capability interface for an arbitrary-angle image rotation.
///
/// The interpolation order is up to the implementation. [`BilinearRotator`]
/// is first order (bilinear), so values away from quarter turns differ
/// slightly from a cubic-spline rotation; output shapes do not.
pub trait Rotator: Send + Sync {
    /// Rotates `image` counter-clockwise by `angle_deg` about its centre.
    ///
    /// With `expand`, the output grows to contain every rotated corner;
    /// otherwise it keeps the input shape and crops.
    fn rotate(
        &self,
        image: ImageView<'_, f64>,
        angle_deg: f64,
        expand: bool,
    ) -> RotCorrResult<OwnedImage>;
}
