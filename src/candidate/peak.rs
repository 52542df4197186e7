//! Global maximum search with deterministic tie-breaking.

use crate::image::ImageView;

/// Location of the highest score in a correlation surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Peak {
    /// X coordinate (column) of the peak.
    pub x: usize,
    /// Y coordinate (row) of the peak.
    pub y: usize,
    /// Surface value at the peak.
    pub score: f64,
}

impl Peak {
    /// Returns the location as `(x, y)`, i.e. `(column, row)`.
    pub fn xy(&self) -> (usize, usize) {
        (self.x, self.y)
    }
}

/// Finds the first global maximum in row-major scan order.
///
/// Later cells only win with a strictly greater score. A NaN cell is
/// returned as soon as it is reached.
pub fn find_peak(surface: ImageView<'_, f64>) -> Peak {
    let mut best = Peak {
        x: 0,
        y: 0,
        score: f64::NEG_INFINITY,
    };
    let mut seen = false;
    for (y, row) in surface.rows().enumerate() {
        for (x, &score) in row.iter().enumerate() {
            if score.is_nan() {
                return Peak { x, y, score };
            }
            if !seen || score > best.score {
                best = Peak { x, y, score };
                seen = true;
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::find_peak;
    use crate::image::ImageView;

    #[test]
    fn first_occurrence_wins_ties() {
        let data = [1.0, 5.0, 2.0, 5.0, 0.0, 5.0];
        let view = ImageView::from_slice(&data, 3, 2).unwrap();
        let peak = find_peak(view);
        assert_eq!(peak.xy(), (1, 0));
        assert_eq!(peak.score, 5.0);
    }

    #[test]
    fn reports_column_then_row() {
        let mut data = vec![0.0; 12];
        data[2 * 4 + 1] = 9.0;
        let view = ImageView::from_slice(&data, 4, 3).unwrap();
        let peak = find_peak(view);
        assert_eq!((peak.x, peak.y), (1, 2));
    }

    #[test]
    fn nan_short_circuits() {
        let data = [1.0, f64::NAN, 3.0, 4.0];
        let view = ImageView::from_slice(&data, 2, 2).unwrap();
        let peak = find_peak(view);
        assert_eq!(peak.xy(), (1, 0));
        assert!(peak.score.is_nan());
    }
}
