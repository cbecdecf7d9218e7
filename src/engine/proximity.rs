use crate::config::analysis::ProximityBands;
use crate::domain::NearTouch;

/// Near-touch attempt counts per proximity band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProximityCounts {
    pub very_close: u32,
    pub close: u32,
    pub moderate: u32,
}

/// Count how many near touches approached a level within each band.
///
/// Bands are mutually exclusive and evaluated in order: a record lands in the
/// first band whose (exclusive) upper bound it is under; at or beyond the
/// outermost bound it is not counted at all. Each record counts exactly once.
pub fn bucket_near_touches(touches: &[NearTouch], bands: &ProximityBands) -> ProximityCounts {
    let mut counts = ProximityCounts::default();
    for touch in touches {
        if touch.min_diff_pct < bands.very_close_pct {
            counts.very_close += 1;
        } else if touch.min_diff_pct < bands.close_pct {
            counts.close += 1;
        } else if touch.min_diff_pct < bands.moderate_pct {
            counts.moderate += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RECONCILE;

    fn touch(min_diff_pct: f64) -> NearTouch {
        NearTouch { min_diff_pct }
    }

    #[test]
    fn test_bands_are_mutually_exclusive() {
        let counts = bucket_near_touches(&[touch(1.9)], &RECONCILE.proximity);
        assert_eq!(
            counts,
            ProximityCounts {
                very_close: 1,
                close: 0,
                moderate: 0
            }
        );
    }

    #[test]
    fn test_close_boundary_is_exclusive() {
        // 5.0 is not under the close bound, so it falls through to moderate
        let counts = bucket_near_touches(&[touch(5.0)], &RECONCILE.proximity);
        assert_eq!(
            counts,
            ProximityCounts {
                very_close: 0,
                close: 0,
                moderate: 1
            }
        );
    }

    #[test]
    fn test_outermost_boundary_counts_nothing() {
        let counts = bucket_near_touches(&[touch(10.0)], &RECONCILE.proximity);
        assert_eq!(counts, ProximityCounts::default());
    }

    #[test]
    fn test_each_record_counts_once() {
        let touches = vec![touch(0.5), touch(1.99), touch(2.0), touch(4.9), touch(9.99), touch(25.0)];
        let counts = bucket_near_touches(&touches, &RECONCILE.proximity);
        assert_eq!(counts.very_close, 2);
        assert_eq!(counts.close, 2);
        assert_eq!(counts.moderate, 1);
    }

    #[test]
    fn test_empty_list_yields_zeros() {
        let counts = bucket_near_touches(&[], &RECONCILE.proximity);
        assert_eq!(counts, ProximityCounts::default());
    }
}
