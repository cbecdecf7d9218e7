/// Directional tag carried by break markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Bullish,
    Bearish,
    #[default]
    None,
}

/// Rendering position hint for a marker relative to its bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerPosition {
    AboveBar,
    #[default]
    BelowBar,
    InBar,
}

/// Rendering shape hint for a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerShape {
    ArrowUp,
    ArrowDown,
    #[default]
    Circle,
    Square,
}

/// Enclosing low/high range of an NRB-type marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerRange {
    pub low: f64,
    pub high: f64,
    pub start_time: i64,
    pub end_time: i64,
}

impl MarkerRange {
    /// Range invariant: start must precede end.
    pub fn is_valid(&self) -> bool {
        self.start_time < self.end_time
    }
}

/// A single point-in-time annotation tied to a price/series value.
///
/// Created fresh on every scan response; the working set is fully replaced,
/// never merged, on each new analysis request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Marker {
    pub time: i64,
    pub direction: Direction,
    pub pattern_id: Option<i64>,
    pub nrb_id: Option<i64>,
    pub range: Option<MarkerRange>,
    pub consolidation_zone_id: Option<i64>,
    pub group_id: Option<i64>,
    pub position: MarkerPosition,
    pub shape: MarkerShape,
    pub text: Option<String>,
}

impl Marker {
    pub fn is_break(&self) -> bool {
        !matches!(self.direction, Direction::None)
    }

    /// Bowl membership test used when splitting markers between the bowl
    /// clustering path and the plain marker path.
    pub fn is_bowl_marker(&self, scan_is_bowl: bool) -> bool {
        if scan_is_bowl && self.pattern_id.is_some() {
            return true;
        }
        self.text
            .as_deref()
            .map(|t| t.to_uppercase().contains("BOWL"))
            .unwrap_or(false)
    }

    /// NRB markers carry a complete, well-formed enclosing range.
    pub fn valid_range(&self) -> Option<&MarkerRange> {
        self.range.as_ref().filter(|r| r.is_valid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bowl_membership_by_pattern_id() {
        let marker = Marker {
            time: 100,
            pattern_id: Some(3),
            ..Default::default()
        };
        assert!(marker.is_bowl_marker(true));
        assert!(
            !marker.is_bowl_marker(false),
            "pattern_id only counts during a bowl scan"
        );
    }

    #[test]
    fn test_bowl_membership_by_text() {
        let marker = Marker {
            time: 100,
            text: Some("Bowl bottom".to_string()),
            ..Default::default()
        };
        assert!(marker.is_bowl_marker(false));
    }

    #[test]
    fn test_invalid_range_is_dropped() {
        let marker = Marker {
            time: 100,
            range: Some(MarkerRange {
                low: 10.0,
                high: 12.0,
                start_time: 200,
                end_time: 200,
            }),
            ..Default::default()
        };
        assert!(marker.valid_range().is_none(), "zero-duration range");
    }
}
