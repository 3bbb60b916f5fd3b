//! Region clustering: group vertical rules into disjoint table regions.
//!
//! Starting from an unvisited vertical, the cluster absorbs every other
//! unvisited vertical whose span overlaps the cluster's running
//! `[bottom, top]` envelope (within tolerance). Absorbing a segment can
//! widen the envelope, so the candidate set is re-scanned until one full
//! pass adds nothing. The resulting partition does not depend on input
//! order.

use crate::geometry::BBox;
use crate::primitives::RuleSegment;

/// A connected group of vertical rules and its vertical envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRegion {
    /// Member verticals, in their original relative order.
    pub verticals: Vec<RuleSegment>,
    /// Highest `y1` among the members.
    pub top: f64,
    /// Lowest `y0` among the members.
    pub bottom: f64,
}

impl TableRegion {
    /// Whether `bbox` overlaps this region's vertical band within `tolerance`.
    pub fn overlaps(&self, bbox: &BBox, tolerance: f64) -> bool {
        bbox.overlaps_band(self.top, self.bottom, tolerance)
    }
}

/// Partition verticals into table regions, ordered top of page first.
///
/// Every input vertical ends up in exactly one region.
pub fn cluster_verticals(verticals: Vec<RuleSegment>, tolerance: f64) -> Vec<TableRegion> {
    let n = verticals.len();
    let mut visited = vec![false; n];
    let mut groups: Vec<(Vec<usize>, f64, f64)> = Vec::new();

    for seed in 0..n {
        if visited[seed] {
            continue;
        }
        visited[seed] = true;
        let mut members = vec![seed];
        let mut top = verticals[seed].bbox.y1;
        let mut bottom = verticals[seed].bbox.y0;

        loop {
            let mut grew = false;
            for (j, candidate) in verticals.iter().enumerate() {
                if visited[j] || !candidate.bbox.overlaps_band(top, bottom, tolerance) {
                    continue;
                }
                visited[j] = true;
                members.push(j);
                top = top.max(candidate.bbox.y1);
                bottom = bottom.min(candidate.bbox.y0);
                grew = true;
            }
            if !grew {
                break;
            }
        }

        members.sort_unstable();
        groups.push((members, top, bottom));
    }

    let mut slots: Vec<Option<RuleSegment>> = verticals.into_iter().map(Some).collect();
    let mut regions: Vec<TableRegion> = groups
        .into_iter()
        .map(|(members, top, bottom)| TableRegion {
            verticals: members.iter().filter_map(|&i| slots[i].take()).collect(),
            top,
            bottom,
        })
        .collect();

    regions.sort_by(|a, b| b.top.total_cmp(&a.top));
    tracing::debug!(regions = regions.len(), verticals = n, "clustered table regions");
    regions
}

/// Move every item overlapping the band `[bottom, top]` out of `items`.
///
/// Items that do not overlap stay in `items` in their original order.
pub fn claim_band<T, F>(items: &mut Vec<T>, top: f64, bottom: f64, tolerance: f64, bbox: F) -> Vec<T>
where
    F: Fn(&T) -> &BBox,
{
    let (claimed, rest): (Vec<T>, Vec<T>) = std::mem::take(items)
        .into_iter()
        .partition(|item| bbox(item).overlaps_band(top, bottom, tolerance));
    *items = rest;
    claimed
}
