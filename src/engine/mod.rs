pub mod bowl_curve;
pub mod clustering;
pub mod hit_test;
pub mod levels;
pub mod proximity;
pub mod snapshot;

pub use bowl_curve::bowl_curve;
pub use clustering::{cluster_markers, palette_index, NO_PATTERN_ID};
pub use hit_test::{hover_hit_test, ChartTransform};
pub use levels::{reconcile_level_lines, LevelLine, LevelLineKind};
pub use proximity::{bucket_near_touches, ProximityCounts};
pub use snapshot::{
    build_overlay_plan, BowlCurvePlan, MarkerTint, NrbRangePlan, OverlayPlan, OverlaySelection,
    PlannedMarker, ScanSnapshot, ZoneLinePlan,
};
