//! Angle helpers shared by rotation and sweeping.

/// Converts degrees to radians.
pub(crate) fn deg_to_rad(angle_deg: f64) -> f64 {
    angle_deg.to_radians()
}

/// Computes sine and cosine for an angle in degrees.
///
/// Multiples of 90 degrees return exact values so quarter turns stay
/// lossless on the sampling grid.
pub(crate) fn sin_cos_deg(angle_deg: f64) -> (f64, f64) {
    let quarter = angle_deg / 90.0;
    if quarter.fract() == 0.0 && quarter.is_finite() {
        return match (quarter as i64).rem_euclid(4) {
            0 => (0.0, 1.0),
            1 => (1.0, 0.0),
            2 => (0.0, -1.0),
            _ => (-1.0, 0.0),
        };
    }
    deg_to_rad(angle_deg).sin_cos()
}

#[cfg(test)]
mod tests {
    use super::{deg_to_rad, sin_cos_deg};

    #[test]
    fn deg_to_rad_matches_pi() {
        let radians = deg_to_rad(180.0);
        assert!((radians - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn sin_cos_deg_is_exact_on_quarter_turns() {
        assert_eq!(sin_cos_deg(0.0), (0.0, 1.0));
        assert_eq!(sin_cos_deg(90.0), (1.0, 0.0));
        assert_eq!(sin_cos_deg(180.0), (0.0, -1.0));
        assert_eq!(sin_cos_deg(270.0), (-1.0, 0.0));
        assert_eq!(sin_cos_deg(-90.0), (-1.0, 0.0));
    }

    #[test]
    fn sin_cos_deg_matches_std_off_axis() {
        let (sin, cos) = sin_cos_deg(30.0);
        assert!((sin - 0.5).abs() < 1e-12);
        assert!((cos - 3.0f64.sqrt() / 2.0).abs() < 1e-12);
    }
}
