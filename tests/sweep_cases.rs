//! Table-driven sweep length checks loaded from `tests/data/sweep_cases.json`.

use rotcorr::{rotational_sweep, AngleSweep, OwnedImage, RotCorrError};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct Case {
    case_id: String,
    angle_step_deg: f64,
    #[serde(default)]
    iterations: usize,
    #[serde(default)]
    last_angle_deg: f64,
    #[serde(default)]
    invalid: bool,
}

#[derive(Debug, Deserialize)]
struct Cases {
    cases: Vec<Case>,
}

fn load_cases() -> Vec<Case> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/sweep_cases.json");
    let text = fs::read_to_string(&path).expect("read sweep cases");
    let cases: Cases = serde_json::from_str(&text).expect("parse sweep cases");
    cases.cases
}

#[test]
fn angle_sweep_lengths_follow_table() {
    for case in load_cases() {
        let sweep = AngleSweep::new(case.angle_step_deg);
        if case.invalid {
            assert!(
                matches!(sweep, Err(RotCorrError::InvalidAngleStep { .. })),
                "{}",
                case.case_id
            );
            continue;
        }
        let sweep = sweep.unwrap();
        assert_eq!(sweep.len(), case.iterations, "{}", case.case_id);
        assert!(
            (sweep.last() - case.last_angle_deg).abs() < 1e-9,
            "{}",
            case.case_id
        );
    }
}

#[test]
fn full_sweep_reports_one_entry_per_table_angle() {
    let background = OwnedImage::from_fn(12, 10, |x, y| ((x * 7 + y * 3) % 11) as f64).unwrap();
    let filter = OwnedImage::from_fn(3, 2, |x, y| (x + 2 * y) as f64 - 2.0).unwrap();
    for case in load_cases().into_iter().filter(|c| !c.invalid && c.iterations <= 52) {
        let full = rotational_sweep(&background, &filter, case.angle_step_deg, false, false)
            .unwrap()
            .into_full()
            .unwrap();
        assert_eq!(full.len(), case.iterations, "{}", case.case_id);
        assert_eq!(full.peaks.len(), case.iterations, "{}", case.case_id);
        assert_eq!(full.angles.last().copied(), Some(case.last_angle_deg));
    }
}
