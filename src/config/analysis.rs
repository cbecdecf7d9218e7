//! Overlay reconciliation configuration

use crate::utils::TimeUtils;

/// Proximity bands for near-touch bucketing (upper bounds, exclusive).
/// Evaluated in order: first matching band wins.
#[derive(Clone)]
pub struct ProximityBands {
    pub very_close_pct: f64,
    pub close_pct: f64,
    pub moderate_pct: f64,
}

/// Shaping constants for the bowl curve heuristic.
/// This is presentation shaping, not a statistical fit.
#[derive(Clone)]
pub struct BowlCurveSettings {
    // How far beyond the cluster's first/last marker the curve extends
    pub window_extension_secs: i64,
    // Blend weight of the parabolic dip at the deepest point
    pub depth_blend: f64,
    // Final smoothing: weight of the shaped curve vs the raw low value
    pub curve_weight: f64,
    pub raw_low_weight: f64,
}

/// The master reconciliation configuration.
///
/// The cluster gap and overlap buffer are hardcoded heuristics inherited from
/// the backend contract; they are kept here as configurable values rather
/// than re-derived.
#[derive(Clone)]
pub struct ReconcileConfig {
    // A gap strictly greater than this starts a new fallback cluster
    pub cluster_gap_secs: i64,
    // Each historical candidate's span is extended by this buffer on both
    // sides when testing for overlap
    pub overlap_buffer_secs: i64,
    // A level group is "historical" when its duration exceeds this
    pub historical_min_duration_weeks: f64,
    // A level group is a "cluster" when it holds more than this many NRBs
    pub cluster_min_nrb_count: u32,
    // Companion line for historical levels sits at this fraction of the level
    pub companion_level_ratio: f64,
    // Vertical pixel distance for hover hit-testing
    pub hover_threshold_px: f32,

    pub proximity: ProximityBands,
    pub bowl: BowlCurveSettings,
}

pub const RECONCILE: ReconcileConfig = ReconcileConfig {
    cluster_gap_secs: TimeUtils::SECONDS_IN_30_D,
    overlap_buffer_secs: TimeUtils::SECONDS_IN_365_D,
    historical_min_duration_weeks: 24.0,
    cluster_min_nrb_count: 1,
    companion_level_ratio: 0.9,
    hover_threshold_px: 30.0,

    proximity: ProximityBands {
        very_close_pct: 2.0,
        close_pct: 5.0,
        moderate_pct: 10.0,
    },

    bowl: BowlCurveSettings {
        window_extension_secs: TimeUtils::SECONDS_IN_30_D,
        depth_blend: 0.8,
        curve_weight: 0.65,
        raw_low_weight: 0.35,
    },
};

impl Default for ReconcileConfig {
    fn default() -> Self {
        RECONCILE.clone()
    }
}
