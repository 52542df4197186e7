//! Correlation search: single orientation and rotational sweeps.
//!
//! [`cross_correlate`] scores one filter orientation against a background.
//! [`RotationalSweep`] repeats that for every angle of an [`AngleSweep`] and
//! reduces the per-angle surfaces according to an [`Aggregate`] mode.

mod aggregate;
mod angles;
mod correlate;
mod sweep;

pub use aggregate::{max_surface, mean_surface};
pub use angles::AngleSweep;
pub use correlate::{
    cross_correlate, cross_correlate_by, cross_correlate_with_peak, cross_correlate_with_peak_by,
};
pub use sweep::{rotational_sweep, RotationalSweep};

use crate::candidate::peak::Peak;
use crate::image::OwnedImage;

/// How a sweep reduces its per-angle surfaces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Aggregate {
    /// Keep every surface and peak.
    #[default]
    Full,
    /// Element-wise mean surface.
    Average,
    /// Element-wise maximum surface.
    Max,
    /// Mean and maximum surfaces.
    Both,
}

impl Aggregate {
    /// Maps the `return_average` / `return_max` flag pair to a mode.
    pub fn from_flags(return_average: bool, return_max: bool) -> Self {
        match (return_average, return_max) {
            (true, true) => Self::Both,
            (true, false) => Self::Average,
            (false, true) => Self::Max,
            (false, false) => Self::Full,
        }
    }
}

/// Sweep configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct SweepConfig {
    /// Angle increment in degrees; must lie in `(0, 360)`.
    pub angle_step_deg: f64,
    /// Reduction applied once every angle has been evaluated.
    pub aggregate: Aggregate,
    /// Evaluate angles on the rayon pool (requires the `rayon` feature).
    pub parallel: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            angle_step_deg: 10.0,
            aggregate: Aggregate::Full,
            parallel: false,
        }
    }
}

/// Every surface and peak of a sweep, in increasing-angle order.
#[derive(Clone, Debug)]
pub struct FullSweep {
    /// Tested angles in degrees.
    pub angles: Vec<f64>,
    /// Correlation surface per angle, each shaped like the background.
    pub surfaces: Vec<OwnedImage>,
    /// Peak of each surface.
    pub peaks: Vec<Peak>,
}

impl FullSweep {
    /// Number of evaluated angles.
    pub fn len(&self) -> usize {
        self.angles.len()
    }

    /// True when no angle was evaluated.
    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }

    /// Angle whose peak scores highest, with that peak.
    ///
    /// Ties keep the smallest angle.
    pub fn best_orientation(&self) -> Option<(f64, Peak)> {
        let mut best: Option<(f64, Peak)> = None;
        for (&angle, &peak) in self.angles.iter().zip(&self.peaks) {
            let better = best.map_or(true, |(_, current)| peak.score > current.score);
            if better {
                best = Some((angle, peak));
            }
        }
        best
    }
}

/// Result of a rotational sweep; the variant follows the [`Aggregate`] mode.
#[derive(Clone, Debug)]
pub enum SweepResult {
    /// All surfaces and peaks.
    Full(FullSweep),
    /// Element-wise mean surface.
    Average(OwnedImage),
    /// Element-wise maximum surface.
    Max(OwnedImage),
    /// Mean and maximum surfaces.
    Both {
        /// Element-wise mean surface.
        mean: OwnedImage,
        /// Element-wise maximum surface.
        max: OwnedImage,
    },
}

impl SweepResult {
    /// Mean surface, if this result carries one.
    pub fn mean(&self) -> Option<&OwnedImage> {
        match self {
            Self::Average(mean) | Self::Both { mean, .. } => Some(mean),
            _ => None,
        }
    }

    /// Maximum surface, if this result carries one.
    pub fn max(&self) -> Option<&OwnedImage> {
        match self {
            Self::Max(max) | Self::Both { max, .. } => Some(max),
            _ => None,
        }
    }

    /// Full per-angle results, if kept.
    pub fn full(&self) -> Option<&FullSweep> {
        match self {
            Self::Full(full) => Some(full),
            _ => None,
        }
    }

    /// Consumes the result and returns the per-angle results, if kept.
    pub fn into_full(self) -> Option<FullSweep> {
        match self {
            Self::Full(full) => Some(full),
            _ => None,
        }
    }
}
