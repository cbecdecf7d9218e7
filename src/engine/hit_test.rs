use crate::config::ReconcileConfig;
use crate::domain::LevelGroup;
use crate::engine::snapshot::OverlaySelection;

/// Screen/data coordinate mapping the hit-test needs from the active plot.
///
/// Implemented by the plot view over egui_plot's transform; tests supply a
/// fixed mock. Either direction may fail when the pointer is outside the
/// plot rect.
pub trait ChartTransform {
    fn time_at_x(&self, x: f32) -> Option<i64>;
    fn y_at_price(&self, price: f64) -> Option<f32>;
}

/// Resolve which level group, if any, the pointer is hovering.
///
/// A group qualifies when it is currently visible under the display toggles,
/// its span contains the pointer's time (inclusive at both ends), and the
/// vertical distance between the pointer and the group's level is strictly
/// under the pixel threshold. The first qualifying group in list order wins;
/// later groups are not considered even if they are closer.
pub fn hover_hit_test<'a>(
    pointer: (f32, f32),
    groups: &'a [LevelGroup],
    selection: &OverlaySelection,
    transform: &dyn ChartTransform,
    config: &ReconcileConfig,
) -> Option<&'a LevelGroup> {
    let (px, py) = pointer;
    let time = transform.time_at_x(px)?;

    groups.iter().find(|group| {
        if !selection.group_visible(group, config) {
            return false;
        }
        let Some(span) = group.line() else {
            return false;
        };
        if !span.contains_time(time) {
            return false;
        }
        match transform.y_at_price(span.level) {
            Some(level_y) => (py - level_y).abs() < config.hover_threshold_px,
            None => false,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RECONCILE;
    use crate::utils::TimeUtils;

    const WEEK: i64 = TimeUtils::SECONDS_IN_W;

    /// Linear mapping: 1px = 1 week horizontally, 1px = 1 price unit
    /// vertically (inverted, screen y grows downward from price 500).
    struct LinearTransform;

    impl ChartTransform for LinearTransform {
        fn time_at_x(&self, x: f32) -> Option<i64> {
            if x < 0.0 {
                None
            } else {
                Some(x as i64 * WEEK)
            }
        }

        fn y_at_price(&self, price: f64) -> Option<f32> {
            Some((500.0 - price) as f32)
        }
    }

    fn historical(group_id: i64, level: f64, start_weeks: i64, end_weeks: i64) -> LevelGroup {
        LevelGroup {
            group_id,
            level: Some(level),
            start_time: Some(start_weeks * WEEK),
            end_time: Some(end_weeks * WEEK),
            nrb_count: 1,
            duration_weeks: Some((end_weeks - start_weeks) as f64),
            ..Default::default()
        }
    }

    #[test]
    fn test_hit_within_threshold_and_span() {
        let groups = vec![historical(1, 100.0, 0, 30)];
        // price 100 -> y 400; pointer 29px above, inside the 30px threshold
        let hit = hover_hit_test(
            (10.0, 371.0),
            &groups,
            &OverlaySelection::default(),
            &LinearTransform,
            &RECONCILE,
        );
        assert_eq!(hit.map(|g| g.group_id), Some(1));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let groups = vec![historical(1, 100.0, 0, 30)];
        let hit = hover_hit_test(
            (10.0, 370.0),
            &groups,
            &OverlaySelection::default(),
            &LinearTransform,
            &RECONCILE,
        );
        assert!(hit.is_none(), "exactly 30px away is a miss");
    }

    #[test]
    fn test_span_ends_are_inclusive() {
        let groups = vec![historical(1, 100.0, 5, 30)];
        let selection = OverlaySelection::default();
        let at_start = hover_hit_test((5.0, 400.0), &groups, &selection, &LinearTransform, &RECONCILE);
        let at_end = hover_hit_test((30.0, 400.0), &groups, &selection, &LinearTransform, &RECONCILE);
        let past_end = hover_hit_test((31.0, 400.0), &groups, &selection, &LinearTransform, &RECONCILE);
        assert!(at_start.is_some());
        assert!(at_end.is_some());
        assert!(past_end.is_none());
    }

    #[test]
    fn test_first_match_wins_over_closer_later_group() {
        // Both spans contain the pointer time and both levels are inside the
        // threshold, but the second group is closer to the pointer.
        let groups = vec![historical(1, 100.0, 0, 30), historical(2, 110.0, 0, 30)];
        // price 100 -> y 400, price 110 -> y 390; pointer at y 389 is 11px
        // from group 1's line and 1px from group 2's, both under threshold
        let hit = hover_hit_test(
            (10.0, 389.0),
            &groups,
            &OverlaySelection::default(),
            &LinearTransform,
            &RECONCILE,
        );
        assert_eq!(hit.map(|g| g.group_id), Some(1), "list order decides, not distance");
    }

    #[test]
    fn test_hidden_historical_group_never_matches() {
        let groups = vec![historical(1, 100.0, 0, 30)];
        let selection = OverlaySelection {
            show_historical: false,
            ..Default::default()
        };
        let hit = hover_hit_test((10.0, 400.0), &groups, &selection, &LinearTransform, &RECONCILE);
        assert!(hit.is_none(), "a group whose line is hidden is not hoverable");
    }

    #[test]
    fn test_pointer_outside_plot_misses() {
        let groups = vec![historical(1, 100.0, 0, 30)];
        let hit = hover_hit_test(
            (-5.0, 400.0),
            &groups,
            &OverlaySelection::default(),
            &LinearTransform,
            &RECONCILE,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_incomplete_group_is_skipped() {
        let mut group = historical(1, 100.0, 0, 30);
        group.level = None;
        let groups = [group];
        let hit = hover_hit_test(
            (10.0, 400.0),
            &groups,
            &OverlaySelection::default(),
            &LinearTransform,
            &RECONCILE,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_historical_cluster_group_follows_historical_toggle() {
        // Qualifies as both historical and cluster; its line is drawn as
        // historical, so the historical toggle governs hovering too.
        let mut group = historical(1, 100.0, 0, 30);
        group.nrb_count = 3;
        let groups = [group];

        let historical_off = OverlaySelection {
            show_historical: false,
            ..Default::default()
        };
        let hit = hover_hit_test((10.0, 400.0), &groups, &historical_off, &LinearTransform, &RECONCILE);
        assert!(hit.is_none(), "the cluster toggle must not resurrect a hidden historical line");

        let clusters_off = OverlaySelection {
            show_clusters: false,
            ..Default::default()
        };
        let hit = hover_hit_test((10.0, 400.0), &groups, &clusters_off, &LinearTransform, &RECONCILE);
        assert!(hit.is_some(), "the line is historical, so only the historical toggle gates it");
    }
}
