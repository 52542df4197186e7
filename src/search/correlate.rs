//! Single-orientation cross-correlation against a background.

use crate::candidate::peak::{find_peak, Peak};
use crate::image::{ImageView, OwnedImage};
use crate::kernel::{Boundary, Correlator, OutputMode, ScalarCorrelator};
use crate::trace::{entered_span, trace_event};
use crate::util::{RotCorrError, RotCorrResult};

/// Rejects filters that exceed the background in either dimension.
pub(crate) fn check_filter_fits(
    background: ImageView<'_, f64>,
    filter: ImageView<'_, f64>,
) -> RotCorrResult<()> {
    if filter.width() > background.width() || filter.height() > background.height() {
        return Err(RotCorrError::FilterTooLarge {
            filter_width: filter.width(),
            filter_height: filter.height(),
            image_width: background.width(),
            image_height: background.height(),
        });
    }
    Ok(())
}

/// Correlates `filter` over `background` with the given correlator.
///
/// The background is mirror-extended at its edges and the surface has the
/// background's shape, with the filter anchored at
/// `((w - 1) / 2, (h - 1) / 2)`. The surface is not normalized.
pub fn cross_correlate_by<C: Correlator + ?Sized>(
    correlator: &C,
    background: ImageView<'_, f64>,
    filter: ImageView<'_, f64>,
) -> RotCorrResult<OwnedImage> {
    check_filter_fits(background, filter)?;
    let _span = entered_span!(
        "cross_correlate",
        width = background.width(),
        height = background.height(),
        filter_width = filter.width(),
        filter_height = filter.height()
    );
    correlator.correlate(background, filter, Boundary::Symmetric, OutputMode::Same)
}

/// Like [`cross_correlate_by`], also returning the surface maximum.
///
/// The peak reports `(x, y) = (column, row)`; ties resolve to the first cell
/// in row-major order.
pub fn cross_correlate_with_peak_by<C: Correlator + ?Sized>(
    correlator: &C,
    background: ImageView<'_, f64>,
    filter: ImageView<'_, f64>,
) -> RotCorrResult<(OwnedImage, Peak)> {
    let surface = cross_correlate_by(correlator, background, filter)?;
    let peak = find_peak(surface.view());
    trace_event!("peak", x = peak.x, y = peak.y, score = peak.score);
    Ok((surface, peak))
}

/// Cross-correlation surface of `filter` over `background` (scalar kernel).
pub fn cross_correlate(background: &OwnedImage, filter: &OwnedImage) -> RotCorrResult<OwnedImage> {
    cross_correlate_by(&ScalarCorrelator, background.view(), filter.view())
}

/// Cross-correlation surface plus its peak location (scalar kernel).
pub fn cross_correlate_with_peak(
    background: &OwnedImage,
    filter: &OwnedImage,
) -> RotCorrResult<(OwnedImage, Peak)> {
    cross_correlate_with_peak_by(&ScalarCorrelator, background.view(), filter.view())
}
