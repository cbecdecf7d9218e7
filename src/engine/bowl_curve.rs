use argminmax::ArgMinMax;

use crate::config::ReconcileConfig;
use crate::domain::{Marker, SeriesPoint};

/// Derive the smoothed curve drawn for one bowl cluster.
///
/// `lows` is the per-bar low of whichever series the chart currently shows
/// (candle lows, or the secondary series values when that replaces candles).
/// The curve spans the cluster's first/last marker time extended by the
/// configured window on both sides: the deepest low in that window anchors a
/// parabolic dip blended against a linear baseline between the window's edge
/// lows, then the result is blended once more with the raw lows.
///
/// An empty window yields an empty curve; that is expected, not an error.
pub fn bowl_curve(
    members: &[Marker],
    lows: &[SeriesPoint],
    config: &ReconcileConfig,
) -> Vec<SeriesPoint> {
    let (Some(first), Some(last)) = (members.first(), members.last()) else {
        return Vec::new();
    };

    let window_start = first.time - config.bowl.window_extension_secs;
    let window_end = last.time + config.bowl.window_extension_secs;

    let mut span: Vec<SeriesPoint> = lows
        .iter()
        .copied()
        .filter(|p| p.time >= window_start && p.time <= window_end)
        .collect();
    span.sort_by_key(|p| p.time);

    if span.is_empty() {
        return Vec::new();
    }

    let values: Vec<f64> = span.iter().map(|p| p.value).collect();
    let min_low_index = values.argmin();
    let min_low = values[min_low_index];

    let start_low = values[0];
    let end_low = values[values.len() - 1];
    let denom = (span.len() - 1).max(1) as f64;
    let bottom_position = min_low_index as f64 / denom;

    span.iter()
        .enumerate()
        .map(|(idx, point)| {
            let t = idx as f64 / denom;
            let distance_from_bottom = t - bottom_position;
            let parabola = distance_from_bottom * distance_from_bottom;

            // Normalize so the farthest edge carries zero depth contribution
            let max_distance = bottom_position.max(1.0 - bottom_position);
            let max_parabola = max_distance * max_distance;
            let normalized = if max_parabola > 0.0 {
                parabola / max_parabola
            } else {
                0.0
            };
            let depth = 1.0 - normalized;

            let edge_interpolation = start_low * (1.0 - t) + end_low * t;
            let curved =
                edge_interpolation + (min_low - edge_interpolation) * depth * config.bowl.depth_blend;

            SeriesPoint {
                time: point.time,
                value: config.bowl.curve_weight * curved
                    + config.bowl.raw_low_weight * point.value,
            }
        })
        .collect()
}
