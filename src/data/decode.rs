use serde::Deserialize;
use thiserror::Error;

use crate::config::DEBUG_FLAGS;
use crate::domain::{
    ConsolidationZone, Direction, LevelGroup, Marker, MarkerPosition, MarkerRange, MarkerShape,
    NearTouch, PatternKind, PriceBar, SecondarySeries, SeriesPoint, SeriesSelector,
};
use crate::engine::ScanSnapshot;

/// Failures at the decode boundary. Anything the backend sends that parses
/// but is merely incomplete (missing optional fields, partial zones) is NOT
/// an error; it degrades to skipped overlays downstream.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed scan payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("scan payload has no recognizable shape")]
    UnrecognizedShape,
}

#[derive(Debug, Deserialize)]
struct RawPriceBar {
    time: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
}

#[derive(Debug, Deserialize)]
struct RawSeriesPoint {
    time: i64,
    value: f64,
}

#[derive(Debug, Deserialize)]
struct RawMarker {
    time: i64,
    #[serde(default)]
    position: Option<String>,
    #[serde(default)]
    shape: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    pattern_id: Option<i64>,
    #[serde(default)]
    nrb_id: Option<i64>,
    #[serde(default)]
    range_low: Option<f64>,
    #[serde(default)]
    range_high: Option<f64>,
    #[serde(default)]
    range_start_time: Option<i64>,
    #[serde(default)]
    range_end_time: Option<i64>,
    #[serde(default)]
    consolidation_zone_id: Option<i64>,
    #[serde(default)]
    nrb_group_id: Option<i64>,
    #[serde(default)]
    direction: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawZone {
    #[serde(alias = "zoneId")]
    zone_id: i64,
    #[serde(default, alias = "startTime")]
    start_time: Option<i64>,
    #[serde(default, alias = "endTime")]
    end_time: Option<i64>,
    #[serde(default, alias = "durationWeeks")]
    duration_weeks: Option<f64>,
    #[serde(default, alias = "firstValue")]
    first_value: Option<f64>,
    #[serde(default, alias = "minValue")]
    min_value: Option<f64>,
    #[serde(default, alias = "maxValue")]
    max_value: Option<f64>,
    #[serde(default, alias = "avgValue")]
    avg_value: Option<f64>,
    #[serde(default, alias = "rangePct")]
    range_pct: Option<f64>,
    #[serde(default, alias = "numNrbs")]
    num_nrbs: u32,
    #[serde(default, alias = "successRate3m")]
    success_rate_3m: Option<f64>,
    #[serde(default, alias = "successRate6m")]
    success_rate_6m: Option<f64>,
    #[serde(default, alias = "successRate12m")]
    success_rate_12m: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawNearTouch {
    min_diff_pct: f64,
}

#[derive(Debug, Deserialize)]
struct RawLevelGroup {
    group_id: i64,
    #[serde(default)]
    group_level: Option<f64>,
    #[serde(default)]
    group_start_time: Option<i64>,
    #[serde(default)]
    group_end_time: Option<i64>,
    #[serde(default)]
    group_nrb_count: Option<u32>,
    #[serde(default)]
    nrb_ids: Vec<i64>,
    #[serde(default)]
    group_duration_weeks: Option<f64>,
    #[serde(default)]
    success_rate_3m: Option<f64>,
    #[serde(default)]
    success_rate_6m: Option<f64>,
    #[serde(default)]
    success_rate_12m: Option<f64>,
    #[serde(default)]
    near_touches: Vec<RawNearTouch>,
}

#[derive(Debug, Default, Deserialize)]
struct RawDebugBlock {
    #[serde(default)]
    total_consolidation_duration_weeks: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawScanPayload {
    #[serde(default)]
    scrip: Option<String>,
    #[serde(default)]
    pattern: Option<String>,
    #[serde(default)]
    price_data: Vec<RawPriceBar>,
    #[serde(default)]
    markers: Option<Vec<RawMarker>>,
    // Older backend builds ship markers under this key instead
    #[serde(default)]
    triggers: Option<Vec<RawMarker>>,
    #[serde(default)]
    total_consolidation_duration_weeks: Option<f64>,
    #[serde(default)]
    debug: Option<RawDebugBlock>,
    #[serde(default)]
    series: Option<String>,
    #[serde(default)]
    series_data: Vec<RawSeriesPoint>,
    #[serde(default)]
    series_data_ema5: Vec<RawSeriesPoint>,
    #[serde(default)]
    series_data_ema10: Vec<RawSeriesPoint>,
    #[serde(default)]
    consolidation_zones: Vec<RawZone>,
    #[serde(default)]
    nrb_groups: Vec<RawLevelGroup>,
}

/// What the caller asked for, used to fill gaps the backend leaves blank.
#[derive(Debug, Clone)]
pub struct RequestEcho {
    pub symbol: String,
    pub pattern: PatternKind,
    pub series: SeriesSelector,
}

/// Normalize a raw scan response into a snapshot.
///
/// Accepts three shapes: the full payload object, the same object with
/// markers under `triggers`, and a bare top-level marker array. Missing
/// echo fields (symbol, pattern, series name) fall back to the request.
pub fn decode_scan(value: serde_json::Value, echo: &RequestEcho) -> Result<ScanSnapshot, DecodeError> {
    if value.is_array() {
        let raw: Vec<RawMarker> = serde_json::from_value(value)?;
        if DEBUG_FLAGS.print_decode_events {
            log::info!("scan payload was a bare marker array ({} markers)", raw.len());
        }
        return Ok(ScanSnapshot {
            symbol: echo.symbol.clone(),
            pattern: Some(echo.pattern),
            markers: raw.iter().map(normalize_marker).collect(),
            ..Default::default()
        });
    }
    if !value.is_object() {
        return Err(DecodeError::UnrecognizedShape);
    }

    let payload: RawScanPayload = serde_json::from_value(value)?;

    let raw_markers = payload.markers.or(payload.triggers).unwrap_or_default();
    let total_weeks = payload
        .total_consolidation_duration_weeks
        .or_else(|| payload.debug.and_then(|d| d.total_consolidation_duration_weeks));

    let series_name = payload
        .series
        .or_else(|| echo.series.query_value().map(str::to_string));

    if DEBUG_FLAGS.print_decode_events {
        log::info!(
            "decoded scan: {} bars, {} markers, {} zones, {} groups",
            payload.price_data.len(),
            raw_markers.len(),
            payload.consolidation_zones.len(),
            payload.nrb_groups.len()
        );
    }

    Ok(ScanSnapshot {
        symbol: payload.scrip.unwrap_or_else(|| echo.symbol.clone()),
        pattern: payload
            .pattern
            .as_deref()
            .and_then(pattern_from_name)
            .or(Some(echo.pattern)),
        price_data: payload
            .price_data
            .iter()
            .map(|b| PriceBar {
                time: b.time,
                open: b.open,
                high: b.high,
                low: b.low,
                close: b.close,
            })
            .collect(),
        markers: raw_markers.iter().map(normalize_marker).collect(),
        secondary: SecondarySeries {
            name: series_name,
            points: points(&payload.series_data),
            fast_smoothing: points(&payload.series_data_ema5),
            slow_smoothing: points(&payload.series_data_ema10),
        },
        zones: payload.consolidation_zones.iter().map(normalize_zone).collect(),
        groups: payload.nrb_groups.iter().map(normalize_group).collect(),
        total_consolidation_duration_weeks: total_weeks,
    })
}

fn pattern_from_name(name: &str) -> Option<PatternKind> {
    match name {
        "Bowl" => Some(PatternKind::Bowl),
        "Narrow Range Break" => Some(PatternKind::NarrowRangeBreak),
        _ => None,
    }
}

fn points(raw: &[RawSeriesPoint]) -> Vec<SeriesPoint> {
    raw.iter()
        .map(|p| SeriesPoint {
            time: p.time,
            value: p.value,
        })
        .collect()
}

fn normalize_marker(raw: &RawMarker) -> Marker {
    let range = match (raw.range_low, raw.range_high, raw.range_start_time, raw.range_end_time) {
        (Some(low), Some(high), Some(start_time), Some(end_time)) => Some(MarkerRange {
            low,
            high,
            start_time,
            end_time,
        }),
        _ => None,
    };

    Marker {
        time: raw.time,
        direction: match raw.direction.as_deref() {
            Some("Bullish Break") => Direction::Bullish,
            Some("Bearish Break") => Direction::Bearish,
            _ => Direction::None,
        },
        pattern_id: raw.pattern_id,
        nrb_id: raw.nrb_id,
        range,
        consolidation_zone_id: raw.consolidation_zone_id,
        group_id: raw.nrb_group_id,
        // "overlay" is a legacy alias the backend still emits
        position: match raw.position.as_deref() {
            Some("aboveBar") | Some("overlay") => MarkerPosition::AboveBar,
            Some("inBar") => MarkerPosition::InBar,
            _ => MarkerPosition::BelowBar,
        },
        shape: match raw.shape.as_deref() {
            Some("arrowUp") => MarkerShape::ArrowUp,
            Some("arrowDown") => MarkerShape::ArrowDown,
            Some("square") => MarkerShape::Square,
            _ => MarkerShape::Circle,
        },
        text: raw.text.clone(),
    }
}

fn normalize_zone(raw: &RawZone) -> ConsolidationZone {
    ConsolidationZone {
        zone_id: raw.zone_id,
        start_time: raw.start_time,
        end_time: raw.end_time,
        duration_weeks: raw.duration_weeks,
        first_value: raw.first_value,
        min_value: raw.min_value,
        max_value: raw.max_value,
        avg_value: raw.avg_value,
        range_pct: raw.range_pct,
        num_nrbs: raw.num_nrbs,
        success_rate_3m: raw.success_rate_3m,
        success_rate_6m: raw.success_rate_6m,
        success_rate_12m: raw.success_rate_12m,
    }
}

fn normalize_group(raw: &RawLevelGroup) -> LevelGroup {
    LevelGroup {
        group_id: raw.group_id,
        level: raw.group_level,
        start_time: raw.group_start_time,
        end_time: raw.group_end_time,
        nrb_count: raw.group_nrb_count.unwrap_or(0),
        nrb_ids: raw.nrb_ids.clone(),
        duration_weeks: raw.group_duration_weeks,
        success_rate_3m: raw.success_rate_3m,
        success_rate_6m: raw.success_rate_6m,
        success_rate_12m: raw.success_rate_12m,
        near_touches: raw
            .near_touches
            .iter()
            .map(|t| NearTouch {
                min_diff_pct: t.min_diff_pct,
            })
            .collect(),
    }
}

/// Response of the 52-week-high endpoint. The figure itself may be null for
/// thin or freshly listed symbols.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Week52High {
    pub scrip: String,
    #[serde(rename = "52week_high")]
    pub value: Option<f64>,
    pub cutoff_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn echo() -> RequestEcho {
        RequestEcho {
            symbol: "TCS".to_string(),
            pattern: PatternKind::NarrowRangeBreak,
            series: SeriesSelector::ClosingPrice,
        }
    }

    #[test]
    fn test_full_payload_decodes() {
        let value = json!({
            "scrip": "INFY",
            "pattern": "Narrow Range Break",
            "price_data": [{"time": 100, "open": 1.0, "high": 2.0, "low": 0.5, "close": 1.5}],
            "markers": [{
                "time": 100,
                "position": "belowBar",
                "shape": "arrowUp",
                "direction": "Bullish Break",
                "range_low": 0.9, "range_high": 1.1,
                "range_start_time": 50, "range_end_time": 150,
                "consolidation_zone_id": 3
            }],
            "consolidation_zones": [{"zone_id": 3, "start_time": 50, "end_time": 150,
                                     "max_value": 1.2, "num_nrbs": 2}],
            "nrb_groups": [{"group_id": 7, "group_level": 1.1, "group_start_time": 50,
                            "group_end_time": 150, "group_nrb_count": 2,
                            "near_touches": [{"min_diff_pct": 1.2}]}],
            "total_consolidation_duration_weeks": 12.5
        });

        let snap = decode_scan(value, &echo()).unwrap();
        assert_eq!(snap.symbol, "INFY");
        assert_eq!(snap.pattern, Some(PatternKind::NarrowRangeBreak));
        assert_eq!(snap.price_data.len(), 1);
        assert_eq!(snap.markers[0].direction, Direction::Bullish);
        assert!(snap.markers[0].valid_range().is_some());
        assert_eq!(snap.zones[0].zone_id, 3);
        assert_eq!(snap.groups[0].nrb_count, 2);
        assert_eq!(snap.groups[0].near_touches[0].min_diff_pct, 1.2);
        assert_eq!(snap.total_consolidation_duration_weeks, Some(12.5));
    }

    #[test]
    fn test_markers_fall_back_to_triggers_key() {
        let value = json!({
            "scrip": "TCS",
            "pattern": "Bowl",
            "price_data": [],
            "triggers": [{"time": 42}]
        });
        let snap = decode_scan(value, &echo()).unwrap();
        assert_eq!(snap.markers.len(), 1);
        assert_eq!(snap.markers[0].time, 42);
    }

    #[test]
    fn test_bare_array_payload_becomes_markers() {
        let value = json!([{"time": 1}, {"time": 2}]);
        let snap = decode_scan(value, &echo()).unwrap();
        assert_eq!(snap.markers.len(), 2);
        assert_eq!(snap.symbol, "TCS", "symbol echoes the request");
        assert_eq!(snap.pattern, Some(PatternKind::NarrowRangeBreak));
    }

    #[test]
    fn test_scalar_payload_is_rejected() {
        let err = decode_scan(json!(42), &echo()).unwrap_err();
        assert!(matches!(err, DecodeError::UnrecognizedShape));
    }

    #[test]
    fn test_overlay_position_maps_above_bar() {
        let value = json!({"markers": [{"time": 1, "position": "overlay"}]});
        let snap = decode_scan(value, &echo()).unwrap();
        assert_eq!(snap.markers[0].position, MarkerPosition::AboveBar);
    }

    #[test]
    fn test_missing_position_defaults_below_bar() {
        let value = json!({"markers": [{"time": 1}]});
        let snap = decode_scan(value, &echo()).unwrap();
        assert_eq!(snap.markers[0].position, MarkerPosition::BelowBar);
        assert_eq!(snap.markers[0].shape, MarkerShape::Circle);
        assert_eq!(snap.markers[0].direction, Direction::None);
    }

    #[test]
    fn test_partial_range_is_dropped() {
        let value = json!({"markers": [{"time": 1, "range_low": 0.9, "range_high": 1.1}]});
        let snap = decode_scan(value, &echo()).unwrap();
        assert!(snap.markers[0].range.is_none());
    }

    #[test]
    fn test_camel_case_zone_aliases() {
        let value = json!({
            "consolidation_zones": [{"zoneId": 5, "startTime": 10, "endTime": 20,
                                     "maxValue": 2.5, "numNrbs": 1}]
        });
        let snap = decode_scan(value, &echo()).unwrap();
        assert_eq!(snap.zones[0].zone_id, 5);
        assert_eq!(snap.zones[0].drawable_span(), Some((10, 20, 2.5)));
    }

    #[test]
    fn test_debug_block_supplies_total_weeks() {
        let value = json!({"debug": {"total_consolidation_duration_weeks": 8.0}});
        let snap = decode_scan(value, &echo()).unwrap();
        assert_eq!(snap.total_consolidation_duration_weeks, Some(8.0));
    }

    #[test]
    fn test_week52_high_with_null_value() {
        let raw = json!({"scrip": "TCS", "52week_high": null, "cutoff_date": "2026-08-01"});
        let parsed: Week52High = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.value, None);
        assert_eq!(parsed.cutoff_date, "2026-08-01");
    }

    #[test]
    fn test_series_name_echoes_request_when_absent() {
        let value = json!({"series_data": [{"time": 1, "value": 2.0}]});
        let echo = RequestEcho {
            series: SeriesSelector::Ema21,
            ..self::echo()
        };
        let snap = decode_scan(value, &echo).unwrap();
        assert_eq!(snap.secondary.name.as_deref(), Some("ema21"));
        assert!(snap.secondary.is_present());
    }
}
