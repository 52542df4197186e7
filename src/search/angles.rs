//! Angle sequence walked by the rotational sweep.

use crate::util::{RotCorrError, RotCorrResult};

/// Largest angle count whose indices stay exact as `f64`.
const MAX_ANGLES: f64 = (1u64 << 53) as f64;

/// Angles `0, step, 2 * step, ...` strictly below 360 degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngleSweep {
    step_deg: f64,
    len: usize,
}

impl AngleSweep {
    /// Creates a sweep; `step_deg` must be finite and within `(0, 360)`.
    ///
    /// Steps so small that the angle count exceeds 2^53 are rejected too.
    pub fn new(step_deg: f64) -> RotCorrResult<Self> {
        if !step_deg.is_finite() || step_deg <= 0.0 || step_deg >= 360.0 {
            return Err(RotCorrError::InvalidAngleStep { step_deg });
        }
        if 360.0 / step_deg > MAX_ANGLES {
            return Err(RotCorrError::InvalidAngleStep { step_deg });
        }

        // ceil() can be off by one once the division rounds.
        let mut len = (360.0 / step_deg).ceil() as usize;
        while len > 1 && ((len - 1) as f64) * step_deg >= 360.0 {
            len -= 1;
        }
        while (len as f64) * step_deg < 360.0 {
            len += 1;
        }

        Ok(Self { step_deg, len })
    }

    /// Number of tested angles, `ceil(360 / step)`.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false: a valid step yields at least the zero angle.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Step between consecutive angles in degrees.
    pub fn step_deg(&self) -> f64 {
        self.step_deg
    }

    /// Angle at `idx` in degrees.
    pub fn angle_at(&self, idx: usize) -> f64 {
        debug_assert!(idx < self.len);
        idx as f64 * self.step_deg
    }

    /// Last tested angle, always below 360.
    pub fn last(&self) -> f64 {
        self.angle_at(self.len - 1)
    }

    /// Iterates the angles in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len).map(|idx| self.angle_at(idx))
    }
}
