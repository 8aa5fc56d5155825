//! Exposure and contrast scoring from the intensity histogram.

use crate::Histogram;

/// Clipped percentage at which the exposure score reaches zero.
const CLIP_PERCENT_FLOOR: f64 = 20.0;

/// Open interval of acceptable mean intensity; means outside it are
/// penalized even without clipping.
const MEAN_LOW: f64 = 15.0;
const MEAN_HIGH: f64 = 240.0;

/// Penalty multiplier for a mean intensity at either extreme.
const EXTREME_MEAN_PENALTY: f64 = 0.8;

/// Standard deviation at which the contrast score saturates at 1.0.
const CONTRAST_SCALE: f64 = 64.0;

/// Normalized exposure score in [0, 1].
///
/// Starts from the highlight/shadow clipping fraction (20% clipped scores
/// zero), then applies a 0.8 multiplier when the mean intensity sits
/// outside the open interval (15, 240).
pub fn exposure_score(hist: &Histogram) -> f64 {
    let base = (1.0 - hist.clipped_percent() / CLIP_PERCENT_FLOOR).clamp(0.0, 1.0);
    let mean = hist.mean();
    if mean > MEAN_LOW && mean < MEAN_HIGH {
        base
    } else {
        base * EXTREME_MEAN_PENALTY
    }
}

/// Normalized contrast score in [0, 1]: population std dev scaled by 64,
/// saturating.
pub fn contrast_score(hist: &Histogram) -> f64 {
    (hist.std_dev() / CONTRAST_SCALE).clamp(0.0, 1.0)
}
