// Canonical domain types for scan responses
// These are pure data, independent of UI/visualization concerns

pub mod level_group;
pub mod marker;
pub mod series;
pub mod zone;

// Re-export key types for convenience
pub use level_group::{LevelGroup, LevelLineSpan, NearTouch};
pub use marker::{Direction, Marker, MarkerPosition, MarkerRange, MarkerShape};
pub use series::{PatternKind, PriceBar, SecondarySeries, SeriesPoint, SeriesSelector};
pub use zone::ConsolidationZone;
