//! Rotational sweep over filter orientations.
//!
//! Each angle rotates the filter (growing its bounding box so no corner is
//! cropped) and correlates it against the unrotated background. Angles are
//! independent of one another; results are always reported in
//! increasing-angle order, including when evaluated in parallel.

use crate::candidate::peak::Peak;
use crate::image::{ImageView, OwnedImage};
use crate::kernel::{Correlator, ScalarCorrelator};
use crate::search::aggregate::{max_surface, mean_surface};
use crate::search::angles::AngleSweep;
use crate::search::correlate::cross_correlate_with_peak_by;
use crate::search::{Aggregate, FullSweep, SweepConfig, SweepResult};
use crate::template::{BilinearRotator, Rotator};
use crate::trace::{entered_span, trace_event};
use crate::util::RotCorrResult;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Rotational sweep built from a correlation and a rotation primitive.
#[derive(Clone, Debug, Default)]
pub struct RotationalSweep<C = ScalarCorrelator, R = BilinearRotator> {
    correlator: C,
    rotator: R,
    cfg: SweepConfig,
}

impl<C: Correlator, R: Rotator> RotationalSweep<C, R> {
    /// Creates a sweep with the default configuration.
    pub fn new(correlator: C, rotator: R) -> Self {
        Self {
            correlator,
            rotator,
            cfg: SweepConfig::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: SweepConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &SweepConfig {
        &self.cfg
    }

    /// Runs the sweep of `filter` over `background`.
    ///
    /// The angle step is validated before any rotation or correlation. A
    /// rotated filter larger than the background fails the whole sweep.
    pub fn run(
        &self,
        background: ImageView<'_, f64>,
        filter: ImageView<'_, f64>,
    ) -> RotCorrResult<SweepResult> {
        let angles = AngleSweep::new(self.cfg.angle_step_deg)?;
        let _span = entered_span!(
            "rotational_sweep",
            angles = angles.len(),
            step_deg = angles.step_deg(),
            parallel = self.cfg.parallel
        );

        let evaluated = self.evaluate_all(&angles, background, filter)?;
        let mut surfaces = Vec::with_capacity(evaluated.len());
        let mut peaks = Vec::with_capacity(evaluated.len());
        for (surface, peak) in evaluated {
            surfaces.push(surface);
            peaks.push(peak);
        }

        trace_event!("sweep_done", angles = surfaces.len());
        let result = match self.cfg.aggregate {
            Aggregate::Both => SweepResult::Both {
                mean: mean_surface(&surfaces)?,
                max: max_surface(&surfaces)?,
            },
            Aggregate::Average => SweepResult::Average(mean_surface(&surfaces)?),
            Aggregate::Max => SweepResult::Max(max_surface(&surfaces)?),
            Aggregate::Full => SweepResult::Full(FullSweep {
                angles: angles.iter().collect(),
                surfaces,
                peaks,
            }),
        };
        Ok(result)
    }

    /// Rotates the filter to `angle_deg` and correlates it with the background.
    pub fn evaluate_angle(
        &self,
        background: ImageView<'_, f64>,
        filter: ImageView<'_, f64>,
        angle_deg: f64,
    ) -> RotCorrResult<(OwnedImage, Peak)> {
        let rotated = self.rotator.rotate(filter, angle_deg, true)?;
        let (surface, peak) =
            cross_correlate_with_peak_by(&self.correlator, background, rotated.view())?;
        trace_event!(
            "angle_evaluated",
            angle_deg = angle_deg,
            x = peak.x,
            y = peak.y,
            score = peak.score
        );
        Ok((surface, peak))
    }

    fn evaluate_all(
        &self,
        angles: &AngleSweep,
        background: ImageView<'_, f64>,
        filter: ImageView<'_, f64>,
    ) -> RotCorrResult<Vec<(OwnedImage, Peak)>> {
        #[cfg(feature = "rayon")]
        {
            if self.cfg.parallel {
                return (0..angles.len())
                    .into_par_iter()
                    .map(|idx| self.evaluate_angle(background, filter, angles.angle_at(idx)))
                    .collect();
            }
        }

        angles
            .iter()
            .map(|angle| self.evaluate_angle(background, filter, angle))
            .collect()
    }
}

/// Sweeps `filter` through rotations of `angle_step` degrees over `background`.
///
/// The flag pair selects the result variant: both flags give
/// [`SweepResult::Both`], only `return_average` gives
/// [`SweepResult::Average`], only `return_max` gives [`SweepResult::Max`] and
/// neither gives [`SweepResult::Full`].
pub fn rotational_sweep(
    background: &OwnedImage,
    filter: &OwnedImage,
    angle_step: f64,
    return_average: bool,
    return_max: bool,
) -> RotCorrResult<SweepResult> {
    RotationalSweep::new(ScalarCorrelator, BilinearRotator::default())
        .with_config(SweepConfig {
            angle_step_deg: angle_step,
            aggregate: Aggregate::from_flags(return_average, return_max),
            ..SweepConfig::default()
        })
        .run(background.view(), filter.view())
}
