//! rotcorr locates a filter inside a background image by 2-D
//! cross-correlation, optionally sweeping the filter through rotations.
//!
//! The pipeline has three pure stages over `f64` grids: a sample generator
//! ([`sample`]), a single-orientation correlator ([`cross_correlate`]) and a
//! rotational sweep ([`rotational_sweep`], [`RotationalSweep`]). The
//! correlation and rotation primitives sit behind the [`Correlator`] and
//! [`Rotator`] traits; optional `rayon` and `simd` features add parallel and
//! vectorized correlators.

mod candidate;
pub mod image;
pub mod kernel;
pub mod sample;
pub mod search;
pub mod template;
mod trace;
pub mod util;

pub mod lowlevel;

#[cfg(feature = "image-io")]
pub use self::image::io;
pub use self::image::{ImageView, OwnedImage};
pub use kernel::{Boundary, Correlator, OutputMode, ScalarCorrelator};
pub use sample::{generate_sample, generate_sample_from, random_pair, Sample, SampleConfig};
pub use search::{
    cross_correlate, cross_correlate_by, cross_correlate_with_peak, cross_correlate_with_peak_by,
    max_surface, mean_surface, rotational_sweep, Aggregate, AngleSweep, FullSweep,
    RotationalSweep, SweepConfig, SweepResult,
};
pub use template::{BilinearRotator, Rotator};
pub use util::{RotCorrError, RotCorrResult};

pub use candidate::peak::{find_peak, Peak};
