use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rotcorr::{
    cross_correlate, cross_correlate_with_peak, generate_sample, OwnedImage, RotCorrError,
    SampleConfig,
};

fn noise_image(width: usize, height: usize, seed: u64) -> OwnedImage {
    let mut rng = StdRng::seed_from_u64(seed);
    OwnedImage::from_fn(width, height, |_, _| rng.random::<f64>() - 0.5).unwrap()
}

#[test]
fn surface_shape_matches_background_for_any_filter() {
    let background = noise_image(31, 17, 1);
    for (w, h) in [(1, 1), (2, 2), (3, 5), (8, 4), (31, 17), (30, 1)] {
        let filter = noise_image(w, h, 2);
        let surface = cross_correlate(&background, &filter).unwrap();
        assert_eq!(surface.dims(), background.dims(), "filter {w}x{h}");
    }
}

#[test]
fn symmetric_boundary_hand_computed_values() {
    let background =
        OwnedImage::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0], 3, 3).unwrap();
    let ones = OwnedImage::filled(3, 3, 1.0).unwrap();
    let surface = cross_correlate(&background, &ones).unwrap();

    // Corner window rows/cols {0, 0, 1}: (1 + 1 + 2) * 2 + (4 + 4 + 5).
    assert_eq!(surface.get(0, 0), Some(21.0));
    assert_eq!(surface.get(1, 1), Some(45.0));
    // Bottom-right window rows/cols {1, 2, 2}: (5 + 6 + 6) + (8 + 9 + 9) * 2.
    assert_eq!(surface.get(2, 2), Some(69.0));
}

#[test]
fn single_tap_filter_scales_background() {
    let background = noise_image(6, 4, 3);
    let tap = OwnedImage::new(vec![2.0], 1, 1).unwrap();
    let surface = cross_correlate(&background, &tap).unwrap();
    for (a, b) in surface.data().iter().zip(background.data()) {
        assert!((a - 2.0 * b).abs() < 1e-12);
    }
}

#[test]
fn even_filter_anchors_top_left_of_centre() {
    // With a 2x2 filter the anchor is (0, 0): out[r, c] sums rows r..=r+1.
    let background = OwnedImage::from_fn(4, 3, |x, y| (y * 4 + x) as f64).unwrap();
    let filter = OwnedImage::new(vec![1.0, 0.0, 0.0, 0.0], 2, 2).unwrap();
    let surface = cross_correlate(&background, &filter).unwrap();
    assert_eq!(surface, background);
}

#[test]
fn peak_reports_column_then_row_for_asymmetric_target() {
    let width = 20;
    let height = 9;
    let background = OwnedImage::from_fn(width, height, |x, y| {
        if (13..=15).contains(&x) && (4..=6).contains(&y) {
            10.0
        } else {
            0.0
        }
    })
    .unwrap();
    let filter = OwnedImage::filled(3, 3, 1.0).unwrap();

    let (surface, peak) = cross_correlate_with_peak(&background, &filter).unwrap();
    assert_eq!((peak.x, peak.y), (14, 5));
    assert!(peak.x < width && peak.y < height);
    assert_eq!(surface.get(peak.x, peak.y), Some(surface.max_value()));
    assert_eq!(peak.score, 90.0);
}

#[test]
fn peak_variant_returns_the_same_surface() {
    let background = noise_image(24, 18, 4);
    let filter = noise_image(5, 3, 5);
    let plain = cross_correlate(&background, &filter).unwrap();
    let (surface, peak) = cross_correlate_with_peak(&background, &filter).unwrap();
    assert_eq!(plain, surface);
    assert_eq!(peak.score, surface.max_value());
}

#[test]
fn self_match_on_noise_finds_block_centre() {
    let background = noise_image(64, 48, 6);
    let (x0, y0, w, h) = (20, 10, 9, 7);
    let filter = background.sub_image(x0, y0, w, h).unwrap();
    let (_, peak) = cross_correlate_with_peak(&background, &filter).unwrap();
    assert_eq!(peak.xy(), (x0 + (w - 1) / 2, y0 + (h - 1) / 2));
}

#[test]
fn self_match_on_clean_sample() {
    let cfg = SampleConfig {
        add_noise: false,
        ..SampleConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(0);
    let sample = generate_sample(&cfg, &mut rng).unwrap();
    let (x0, y0) = sample.filter_origin;
    let expected_x = x0 + (sample.filter.width() - 1) / 2;
    let expected_y = y0 + (sample.filter.height() - 1) / 2;

    let (_, peak) = cross_correlate_with_peak(&sample.background, &sample.filter).unwrap();
    assert!(peak.x.abs_diff(expected_x) <= 1, "peak {:?}", peak);
    assert!(peak.y.abs_diff(expected_y) <= 1, "peak {:?}", peak);
}

#[test]
fn rejects_filters_larger_than_background() {
    let background = OwnedImage::zeros(10, 6).unwrap();
    let filter = OwnedImage::zeros(4, 7).unwrap();
    let err = cross_correlate(&background, &filter).unwrap_err();
    assert_eq!(
        err,
        RotCorrError::FilterTooLarge {
            filter_width: 4,
            filter_height: 7,
            image_width: 10,
            image_height: 6,
        }
    );
}
