//! Y-axis bounds for the two chart shapes.

use std::ops::Range;

/// Headroom used when every plotted value is zero.
pub const MIN_HEADROOM: f64 = 1.0;

const OVERVIEW_HEADROOM: f64 = 1.1;
const TREND_PADDING: f64 = 0.1;

/// `0 .. 1.1 * max`. Falls back to `0 .. MIN_HEADROOM` for an all-zero or
/// empty set.
pub fn overview_range(values: &[u64]) -> Range<f64> {
    let max = values.iter().copied().max().unwrap_or(0) as f64;
    let upper = max * OVERVIEW_HEADROOM;
    if upper > 0.0 {
        0.0..upper
    } else {
        0.0..MIN_HEADROOM
    }
}

/// `min - pad .. max + pad` with `pad = 10%` of the spread. A flat series
/// pads by 10% of its value instead, and a flat zero series by `MIN_HEADROOM`.
pub fn trend_range(values: &[u64]) -> Range<f64> {
    let (Some(min), Some(max)) = (values.iter().min(), values.iter().max()) else {
        return -MIN_HEADROOM..MIN_HEADROOM;
    };
    let (min, max) = (*min as f64, *max as f64);

    let padding = if max > min {
        (max - min) * TREND_PADDING
    } else if max > 0.0 {
        max * TREND_PADDING
    } else {
        MIN_HEADROOM
    };
    (min - padding)..(max + padding)
}
