//! Low-level building blocks for custom pipelines.
//!
//! Most users only need [`crate::cross_correlate`] and
//! [`crate::rotational_sweep`]; these re-exports expose the primitives they
//! are built from.

pub use crate::candidate::peak::find_peak;
pub use crate::kernel::ScalarCorrelator;
#[cfg(feature = "rayon")]
pub use crate::kernel::ParallelCorrelator;
#[cfg(feature = "simd")]
pub use crate::kernel::SimdCorrelator;
pub use crate::sample::base_image;
pub use crate::template::{expanded_dims, rotate_bilinear};
