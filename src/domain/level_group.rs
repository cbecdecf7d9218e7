use crate::config::ReconcileConfig;

/// A historical instance where price approached the group's level without
/// necessarily triggering a break.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearTouch {
    /// Minimum distance from the level, as a percentage of the level.
    pub min_diff_pct: f64,
}

/// A backend-reported recurring price level with its member NRBs and
/// forward success-rate statistics.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LevelGroup {
    pub group_id: i64,
    pub level: Option<f64>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub nrb_count: u32,
    pub nrb_ids: Vec<i64>,
    pub duration_weeks: Option<f64>,
    pub success_rate_3m: Option<f64>,
    pub success_rate_6m: Option<f64>,
    pub success_rate_12m: Option<f64>,
    pub near_touches: Vec<NearTouch>,
}

impl LevelGroup {
    /// "Historical" classification: long-lived level (duration > 24 weeks by
    /// default). Derived, never stored.
    pub fn is_historical(&self, config: &ReconcileConfig) -> bool {
        self.duration_weeks
            .map(|w| w > config.historical_min_duration_weeks)
            .unwrap_or(false)
    }

    /// "Cluster" classification: more than one member NRB. A group can be
    /// both historical and a cluster, or neither.
    pub fn is_cluster(&self, config: &ReconcileConfig) -> bool {
        self.nrb_count > config.cluster_min_nrb_count
    }

    /// The drawable line of this group, present only when level and both span
    /// endpoints were supplied by the backend. Groups without a complete line
    /// are neither drawn nor considered for overlap suppression.
    pub fn line(&self) -> Option<LevelLineSpan> {
        Some(LevelLineSpan {
            level: self.level?,
            start_time: self.start_time?,
            end_time: self.end_time?,
        })
    }
}

/// The fully-specified line of a level group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelLineSpan {
    pub level: f64,
    pub start_time: i64,
    pub end_time: i64,
}

impl LevelLineSpan {
    /// Inclusive containment used by hover hit-testing.
    pub fn contains_time(&self, t: i64) -> bool {
        self.start_time <= t && t <= self.end_time
    }

    /// Two spans overlap when they intersect after extending each end by
    /// `buffer_secs` in both directions.
    pub fn overlaps(&self, other: &LevelLineSpan, buffer_secs: i64) -> bool {
        self.start_time < other.end_time + buffer_secs
            && other.start_time < self.end_time + buffer_secs
    }
}
