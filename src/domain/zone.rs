/// A backend-identified price band and time span of low-volatility trading.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConsolidationZone {
    pub zone_id: i64,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub duration_weeks: Option<f64>,
    pub first_value: Option<f64>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub avg_value: Option<f64>,
    pub range_pct: Option<f64>,
    pub num_nrbs: u32,
    pub success_rate_3m: Option<f64>,
    pub success_rate_6m: Option<f64>,
    pub success_rate_12m: Option<f64>,
}

impl ConsolidationZone {
    /// A zone is drawable when its bounds are complete and monotonic.
    /// Anything else is expected data variability, skipped silently.
    pub fn drawable_span(&self) -> Option<(i64, i64, f64)> {
        let start = self.start_time?;
        let end = self.end_time?;
        let max_value = self.max_value?;
        if start < end {
            Some((start, end, max_value))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_monotonic_zone_is_not_drawable() {
        let zone = ConsolidationZone {
            zone_id: 1,
            start_time: Some(200),
            end_time: Some(100),
            max_value: Some(50.0),
            ..Default::default()
        };
        assert!(zone.drawable_span().is_none());
    }

    #[test]
    fn test_partial_zone_is_not_drawable() {
        let zone = ConsolidationZone {
            zone_id: 1,
            start_time: Some(100),
            end_time: Some(200),
            ..Default::default()
        };
        assert!(zone.drawable_span().is_none(), "missing max_value");
    }
}
