use std::collections::BTreeMap;

use itertools::Itertools;

use crate::config::ReconcileConfig;
use crate::domain::Marker;

/// Sentinel cluster key for markers without a backend-supplied pattern id.
pub const NO_PATTERN_ID: i64 = -1;

/// Partition bowl markers into pattern instances.
///
/// Primary path groups strictly by `pattern_id`. When the backend supplied no
/// usable ids (grouping collapses to a single sentinel-keyed group), the
/// markers are re-clustered by temporal adjacency instead: sorted by time, a
/// gap strictly greater than `cluster_gap_secs` starts a new cluster.
///
/// Members of each cluster come back time-ordered; clusters are disjoint.
/// A `BTreeMap` keeps iteration order deterministic across render passes.
pub fn cluster_markers(
    markers: &[Marker],
    config: &ReconcileConfig,
) -> BTreeMap<i64, Vec<Marker>> {
    let mut clusters: BTreeMap<i64, Vec<Marker>> = BTreeMap::new();

    for marker in markers {
        let id = marker.pattern_id.unwrap_or(NO_PATTERN_ID);
        clusters.entry(id).or_default().push(marker.clone());
    }

    let ids_unusable = clusters.len() == 1 && clusters.contains_key(&NO_PATTERN_ID);
    if ids_unusable && !markers.is_empty() {
        clusters.clear();

        let sorted: Vec<&Marker> = markers.iter().sorted_by_key(|m| m.time).collect();
        let mut cluster_id: i64 = 0;
        let mut last_time: Option<i64> = None;

        for marker in sorted {
            let starts_new = match last_time {
                None => true,
                Some(last) => marker.time - last > config.cluster_gap_secs,
            };
            if starts_new {
                cluster_id += 1;
            }
            clusters.entry(cluster_id).or_default().push(marker.clone());
            last_time = Some(marker.time);
        }
    }

    for members in clusters.values_mut() {
        members.sort_by_key(|m| m.time);
    }

    clusters
}

/// Deterministic palette slot for a cluster id: absolute value modulo the
/// palette length. The same id always maps to the same slot.
pub fn palette_index(cluster_id: i64, palette_len: usize) -> usize {
    debug_assert!(palette_len > 0);
    (cluster_id.unsigned_abs() as usize) % palette_len
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RECONCILE;

    fn marker_at(time: i64, pattern_id: Option<i64>) -> Marker {
        Marker {
            time,
            pattern_id,
            ..Default::default()
        }
    }

    #[test]
    fn test_grouping_by_explicit_ids() {
        let markers = vec![
            marker_at(300, Some(7)),
            marker_at(100, Some(2)),
            marker_at(200, Some(7)),
        ];
        let clusters = cluster_markers(&markers, &RECONCILE);

        assert_eq!(clusters.len(), 2);
        assert_eq!(
            clusters[&7].iter().map(|m| m.time).collect::<Vec<_>>(),
            vec![200, 300],
            "members must be time-ordered"
        );
        assert_eq!(clusters[&2].len(), 1);
    }

    #[test]
    fn test_explicit_ids_are_deterministic() {
        let markers = vec![
            marker_at(300, Some(7)),
            marker_at(100, Some(2)),
            marker_at(200, Some(7)),
        ];
        let first = cluster_markers(&markers, &RECONCILE);
        let second = cluster_markers(&markers, &RECONCILE);
        assert_eq!(first, second);
        for id in first.keys() {
            assert_eq!(
                palette_index(*id, 10),
                palette_index(*id, 10),
                "same id must yield the same palette slot"
            );
        }
    }

    #[test]
    fn test_mixed_ids_keep_sentinel_group() {
        // Some markers carry ids: no fallback, the sentinel group stays as-is.
        let markers = vec![marker_at(100, Some(1)), marker_at(200, None)];
        let clusters = cluster_markers(&markers, &RECONCILE);
        assert_eq!(clusters.len(), 2);
        assert!(clusters.contains_key(&NO_PATTERN_ID));
    }

    #[test]
    fn test_fallback_gap_exactly_thirty_days_stays_together() {
        let markers = vec![marker_at(0, None), marker_at(RECONCILE.cluster_gap_secs, None)];
        let clusters = cluster_markers(&markers, &RECONCILE);
        assert_eq!(clusters.len(), 1, "a gap of exactly 30 days must not split");
        assert_eq!(clusters[&1].len(), 2);
    }

    #[test]
    fn test_fallback_gap_one_second_over_splits() {
        let markers = vec![
            marker_at(0, None),
            marker_at(RECONCILE.cluster_gap_secs + 1, None),
        ];
        let clusters = cluster_markers(&markers, &RECONCILE);
        assert_eq!(clusters.len(), 2, "one second over 30 days must split");
    }

    #[test]
    fn test_fallback_clusters_are_disjoint_and_ordered() {
        let markers = vec![
            marker_at(2_700_000 + RECONCILE.cluster_gap_secs, None),
            marker_at(0, None),
            marker_at(100, None),
            marker_at(2_600_000 + RECONCILE.cluster_gap_secs, None),
        ];
        let clusters = cluster_markers(&markers, &RECONCILE);
        assert_eq!(clusters.len(), 2);
        assert_eq!(
            clusters[&1].iter().map(|m| m.time).collect::<Vec<_>>(),
            vec![0, 100]
        );
        assert_eq!(
            clusters[&2].iter().map(|m| m.time).collect::<Vec<_>>(),
            vec![
                2_600_000 + RECONCILE.cluster_gap_secs,
                2_700_000 + RECONCILE.cluster_gap_secs
            ]
        );

        let total: usize = clusters.values().map(|v| v.len()).sum();
        assert_eq!(total, markers.len(), "every marker belongs to exactly one cluster");
    }

    #[test]
    fn test_empty_markers_yield_no_clusters() {
        let clusters = cluster_markers(&[], &RECONCILE);
        assert!(clusters.is_empty());
    }

    #[test]
    fn test_palette_index_handles_negative_ids() {
        assert_eq!(palette_index(-1, 10), 1);
        assert_eq!(palette_index(23, 10), 3);
        assert_eq!(palette_index(i64::MIN, 10), (i64::MIN.unsigned_abs() % 10) as usize);
    }
}
