use serde::{Deserialize, Serialize};

use crate::config::ReconcileConfig;
use crate::domain::{
    ConsolidationZone, Direction, LevelGroup, Marker, MarkerPosition, MarkerShape, PatternKind,
    PriceBar, SecondarySeries, SeriesPoint,
};
use crate::engine::bowl_curve::bowl_curve;
use crate::engine::clustering::{cluster_markers, palette_index};
use crate::engine::levels::{reconcile_level_lines, LevelLine, LevelLineKind};

/// One fully-normalized scan response.
///
/// Immutable by convention: every completed analysis builds a fresh snapshot
/// and the previous one is dropped wholesale. Rendering and hit-testing only
/// ever borrow it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanSnapshot {
    pub symbol: String,
    pub pattern: Option<PatternKind>,
    pub price_data: Vec<PriceBar>,
    pub markers: Vec<Marker>,
    pub secondary: SecondarySeries,
    pub zones: Vec<ConsolidationZone>,
    pub groups: Vec<LevelGroup>,
    pub total_consolidation_duration_weeks: Option<f64>,
}

impl ScanSnapshot {
    pub fn is_bowl_scan(&self) -> bool {
        matches!(self.pattern, Some(PatternKind::Bowl))
    }

    /// The low-value series curves and 52-week-high spans are computed over:
    /// the secondary series when it replaces the candles, otherwise the
    /// candle lows.
    pub fn low_series(&self) -> Vec<SeriesPoint> {
        if self.secondary.is_present() {
            self.secondary.points.clone()
        } else {
            self.price_data
                .iter()
                .map(|bar| SeriesPoint {
                    time: bar.time,
                    value: bar.low,
                })
                .collect()
        }
    }
}

/// The user's current overlay focus. Client-local view state, owned by the
/// presentation layer and passed into the engine as configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlaySelection {
    pub selected_group_id: Option<i64>,
    pub show_zones: bool,
    pub show_historical: bool,
    pub show_clusters: bool,
}

impl Default for OverlaySelection {
    fn default() -> Self {
        Self {
            selected_group_id: None,
            show_zones: false,
            show_historical: true,
            show_clusters: true,
        }
    }
}

impl OverlaySelection {
    /// Visibility gate shared by rendering and hover hit-testing.
    ///
    /// Classification is historical-first, matching how the group's line is
    /// drawn: a group that is both historical and a cluster renders as a
    /// historical line, so only the historical toggle governs it.
    pub fn group_visible(&self, group: &LevelGroup, config: &ReconcileConfig) -> bool {
        if group.is_historical(config) {
            self.show_historical
        } else if group.is_cluster(config) {
            self.show_clusters
        } else {
            false
        }
    }
}

/// Color/emphasis tag for a planned marker. Resolution to concrete colors
/// happens in the plot layer; the plan stays renderer-independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerTint {
    /// NRB break marker colored by its consolidation zone's palette slot.
    ZonePalette(usize),
    Bullish,
    Bearish,
    Default,
    /// Outside the currently selected group: drawn muted.
    Dimmed,
}

/// A marker ready for drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedMarker {
    pub time: i64,
    pub position: MarkerPosition,
    pub shape: MarkerShape,
    pub tint: MarkerTint,
    pub text: String,
}

/// One bowl cluster curve ready for drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct BowlCurvePlan {
    pub cluster_id: i64,
    pub palette_slot: usize,
    pub points: Vec<SeriesPoint>,
}

/// The high/low dotted line pair around one NRB marker's enclosing range.
#[derive(Debug, Clone, PartialEq)]
pub struct NrbRangePlan {
    pub high: [SeriesPoint; 2],
    pub low: [SeriesPoint; 2],
}

/// A consolidation zone's line at its max value.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneLinePlan {
    pub zone_id: i64,
    pub points: [SeriesPoint; 2],
    pub selected: bool,
}

/// The full desired overlay set for one frame, computed declaratively from
/// (snapshot, selection). Pure data: the plot layers translate it into
/// egui_plot items without further decisions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayPlan {
    pub bowl_curves: Vec<BowlCurvePlan>,
    pub level_lines: Vec<LevelLine>,
    pub nrb_ranges: Vec<NrbRangePlan>,
    pub zone_lines: Vec<ZoneLinePlan>,
    pub markers: Vec<PlannedMarker>,
    /// 52-week-high line endpoints, when the figure and a span are available.
    pub week52_line: Option<[SeriesPoint; 2]>,
}

const BOWL_PALETTE_LEN: usize = 10;
const ZONE_PALETTE_LEN: usize = 8;

/// Build the complete overlay plan for the current snapshot and selection.
pub fn build_overlay_plan(
    snapshot: &ScanSnapshot,
    selection: &OverlaySelection,
    week52_high: Option<f64>,
    config: &ReconcileConfig,
) -> OverlayPlan {
    let is_bowl = snapshot.is_bowl_scan();
    let lows = snapshot.low_series();

    let (bowl_markers, other_markers): (Vec<&Marker>, Vec<&Marker>) = snapshot
        .markers
        .iter()
        .partition(|m| m.is_bowl_marker(is_bowl));

    // Bowl curves, one per cluster
    let owned_bowls: Vec<Marker> = bowl_markers.iter().map(|m| (*m).clone()).collect();
    let clusters = cluster_markers(&owned_bowls, config);
    let bowl_curves: Vec<BowlCurvePlan> = clusters
        .iter()
        .filter_map(|(cluster_id, members)| {
            let points = bowl_curve(members, &lows, config);
            if points.is_empty() {
                None
            } else {
                Some(BowlCurvePlan {
                    cluster_id: *cluster_id,
                    palette_slot: palette_index(*cluster_id, BOWL_PALETTE_LEN),
                    points,
                })
            }
        })
        .collect();

    // Level lines, gated by visibility toggles
    let level_lines: Vec<LevelLine> = reconcile_level_lines(&snapshot.groups, config)
        .into_iter()
        .filter(|line| match line.kind {
            LevelLineKind::Historical => selection.show_historical,
            LevelLineKind::Cluster => selection.show_clusters,
        })
        .collect();

    // Dotted range pairs around NRB markers
    let nrb_ranges: Vec<NrbRangePlan> = other_markers
        .iter()
        .filter_map(|m| m.valid_range())
        .map(|range| NrbRangePlan {
            high: [
                SeriesPoint {
                    time: range.start_time,
                    value: range.high,
                },
                SeriesPoint {
                    time: range.end_time,
                    value: range.high,
                },
            ],
            low: [
                SeriesPoint {
                    time: range.start_time,
                    value: range.low,
                },
                SeriesPoint {
                    time: range.end_time,
                    value: range.low,
                },
            ],
        })
        .collect();

    // Consolidation-zone lines at max value
    let zone_lines: Vec<ZoneLinePlan> = if selection.show_zones {
        snapshot
            .zones
            .iter()
            .filter_map(|zone| {
                let (start, end, max_value) = zone.drawable_span()?;
                Some(ZoneLinePlan {
                    zone_id: zone.zone_id,
                    points: [
                        SeriesPoint {
                            time: start,
                            value: max_value,
                        },
                        SeriesPoint {
                            time: end,
                            value: max_value,
                        },
                    ],
                    selected: selection.selected_group_id == Some(zone.zone_id),
                })
            })
            .collect()
    } else {
        Vec::new()
    };

    // Point markers for everything that is not a bowl curve member
    let markers: Vec<PlannedMarker> = other_markers
        .iter()
        .map(|marker| plan_marker(marker, selection))
        .collect();

    // 52-week-high line across the visible span
    let week52_line = week52_high.and_then(|high| {
        let first = lows.first()?;
        let last = lows.last()?;
        if lows.len() < 2 {
            return None;
        }
        Some([
            SeriesPoint {
                time: first.time,
                value: high,
            },
            SeriesPoint {
                time: last.time,
                value: high,
            },
        ])
    });

    OverlayPlan {
        bowl_curves,
        level_lines,
        nrb_ranges,
        zone_lines,
        markers,
        week52_line,
    }
}

fn plan_marker(marker: &Marker, selection: &OverlaySelection) -> PlannedMarker {
    let (tint, shape) = match marker.direction {
        Direction::Bullish | Direction::Bearish => {
            let shape = if marker.direction == Direction::Bullish {
                MarkerShape::ArrowUp
            } else {
                MarkerShape::ArrowDown
            };
            let tint = match (marker.consolidation_zone_id, selection.selected_group_id) {
                (Some(zone_id), Some(selected)) if zone_id != selected => MarkerTint::Dimmed,
                (None, Some(_)) => MarkerTint::Dimmed,
                (Some(zone_id), _) => {
                    MarkerTint::ZonePalette(palette_index(zone_id, ZONE_PALETTE_LEN))
                }
                (None, None) => {
                    if marker.direction == Direction::Bullish {
                        MarkerTint::Bullish
                    } else {
                        MarkerTint::Bearish
                    }
                }
            };
            (tint, shape)
        }
        Direction::None => (MarkerTint::Default, marker.shape),
    };

    PlannedMarker {
        time: marker.time,
        position: marker.position,
        shape,
        tint,
        // Break markers render without text to avoid chart clutter
        text: if marker.is_break() {
            String::new()
        } else {
            marker.text.clone().unwrap_or_default()
        },
    }
}
