use crate::config::ReconcileConfig;
use crate::domain::{LevelGroup, LevelLineSpan};

/// Rendering classification of a surviving level line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelLineKind {
    /// Long-duration level: solid line plus a dimmed dotted companion below.
    Historical,
    /// Multi-NRB group: dashed line, exempt from overlap suppression.
    Cluster,
}

/// One line the chart should draw for a level group.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelLine {
    pub group_id: i64,
    pub kind: LevelLineKind,
    pub span: LevelLineSpan,
    /// Companion line level (historical lines only).
    pub companion_level: Option<f64>,
}

/// Reduce the group list to the set of drawable level lines.
///
/// Historical candidates (duration over the configured threshold) go through
/// "king of the hill" suppression: candidates are folded in backend order,
/// spans are compared with a fixed buffer extension on both sides, and on the
/// first overlap the strictly higher level replaces the incumbent while a
/// lower or equal one is discarded. A candidate resolves against at most one
/// incumbent. Cluster groups are drawn independently of suppression; groups
/// that are neither historical nor clusters produce no line. Groups with an
/// incomplete line (missing level or span) are skipped entirely.
///
/// Output is deterministic for a given input order: the scan is strictly
/// first-match-wins over a `Vec`, no map iteration order is involved.
pub fn reconcile_level_lines(groups: &[LevelGroup], config: &ReconcileConfig) -> Vec<LevelLine> {
    let mut historical_candidates: Vec<(i64, LevelLineSpan)> = Vec::new();
    let mut other_lines: Vec<LevelLine> = Vec::new();

    for group in groups {
        let Some(span) = group.line() else {
            continue;
        };
        if group.is_historical(config) {
            historical_candidates.push((group.group_id, span));
        } else if group.is_cluster(config) {
            other_lines.push(LevelLine {
                group_id: group.group_id,
                kind: LevelLineKind::Cluster,
                span,
                companion_level: None,
            });
        }
    }

    let mut final_historical: Vec<(i64, LevelLineSpan)> = Vec::new();
    for (group_id, span) in historical_candidates {
        let incumbent = final_historical
            .iter()
            .position(|(_, existing)| existing.overlaps(&span, config.overlap_buffer_secs));

        match incumbent {
            Some(idx) => {
                if span.level > final_historical[idx].1.level {
                    final_historical[idx] = (group_id, span);
                }
            }
            None => final_historical.push((group_id, span)),
        }
    }

    let mut lines: Vec<LevelLine> = final_historical
        .into_iter()
        .map(|(group_id, span)| LevelLine {
            group_id,
            kind: LevelLineKind::Historical,
            span,
            companion_level: Some(span.level * config.companion_level_ratio),
        })
        .collect();
    lines.append(&mut other_lines);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RECONCILE;
    use crate::utils::TimeUtils;

    const WEEK: i64 = TimeUtils::SECONDS_IN_W;

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

    fn cluster(group_id: i64, level: f64) -> LevelGroup {
        LevelGroup {
            group_id,
            level: Some(level),
            start_time: Some(0),
            end_time: Some(4 * WEEK),
            nrb_count: 3,
            duration_weeks: Some(4.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_higher_level_wins_regardless_of_input_order() {
        let low_first = vec![historical(1, 90.0, 0, 30), historical(2, 110.0, 10, 40)];
        let high_first = vec![historical(2, 110.0, 10, 40), historical(1, 90.0, 0, 30)];

        for groups in [low_first, high_first] {
            let lines = reconcile_level_lines(&groups, &RECONCILE);
            let historical: Vec<_> = lines
                .iter()
                .filter(|l| l.kind == LevelLineKind::Historical)
                .collect();
            assert_eq!(historical.len(), 1);
            assert_eq!(
                historical[0].group_id, 2,
                "the higher-level candidate must survive either way"
            );
        }
    }

    #[test]
    fn test_suppression_is_idempotent() {
        let groups = vec![
            historical(1, 90.0, 0, 30),
            historical(2, 110.0, 10, 40),
            historical(3, 80.0, 5, 35),
        ];
        let first = reconcile_level_lines(&groups, &RECONCILE);
        let second = reconcile_level_lines(&groups, &RECONCILE);
        assert_eq!(first, second);
    }

    #[test]
    fn test_distant_candidates_survive_independently() {
        // Spans more than the 365-day buffer apart in both directions
        let far_apart_weeks = 60 + 53; // 53 weeks > 365 days
        let groups = vec![
            historical(1, 200.0, 0, 30),
            historical(2, 50.0, 30 + far_apart_weeks, 60 + far_apart_weeks),
        ];
        let lines = reconcile_level_lines(&groups, &RECONCILE);
        assert_eq!(
            lines.len(),
            2,
            "non-overlapping candidates keep both lines regardless of level"
        );
    }

    #[test]
    fn test_candidate_resolves_against_first_incumbent_only() {
        // Two accepted lines far apart; a third overlaps both edges of the
        // buffer window but must only be compared against the first.
        let groups = vec![
            historical(1, 100.0, 0, 30),
            historical(2, 100.0, 150, 180),
            historical(3, 120.0, 60, 120),
        ];
        let lines = reconcile_level_lines(&groups, &RECONCILE);
        let ids: Vec<i64> = lines.iter().map(|l| l.group_id).collect();
        assert_eq!(ids, vec![3, 2], "candidate 3 replaces 1 and stops scanning");
    }

    #[test]
    fn test_incomplete_groups_are_skipped_entirely() {
        let mut no_level = historical(1, 0.0, 0, 30);
        no_level.level = None;
        let mut no_span = historical(2, 100.0, 0, 30);
        no_span.start_time = None;

        let lines = reconcile_level_lines(&[no_level, no_span], &RECONCILE);
        assert!(lines.is_empty());
    }

    #[test]
    fn test_cluster_lines_bypass_suppression() {
        // A cluster overlapping a higher historical line still gets drawn
        let groups = vec![historical(1, 200.0, 0, 30), cluster(9, 50.0)];
        let lines = reconcile_level_lines(&groups, &RECONCILE);
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().any(|l| l.kind == LevelLineKind::Cluster && l.group_id == 9));
    }

    #[test]
    fn test_plain_groups_produce_no_line() {
        let plain = LevelGroup {
            group_id: 5,
            level: Some(75.0),
            start_time: Some(0),
            end_time: Some(WEEK),
            nrb_count: 1,
            duration_weeks: Some(1.0),
            ..Default::default()
        };
        assert!(reconcile_level_lines(&[plain], &RECONCILE).is_empty());
    }

    #[test]
    fn test_historical_line_carries_companion_at_ninety_pct() {
        let lines = reconcile_level_lines(&[historical(1, 100.0, 0, 30)], &RECONCILE);
        assert_eq!(lines[0].companion_level, Some(90.0));
    }

    #[test]
    fn test_equal_level_keeps_incumbent() {
        let groups = vec![historical(1, 100.0, 0, 30), historical(2, 100.0, 5, 35)];
        let lines = reconcile_level_lines(&groups, &RECONCILE);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].group_id, 1, "replacement requires a strictly greater level");
    }
}
