//! Rule snapping: collapse repeated observations of the same drawn rule.
//!
//! Layout engines often emit a single visual rule as two or more thin
//! rectangles a fraction of a unit apart. Snapping runs in two phases over
//! the observed segments of one orientation:
//!
//! 1. **Anchor clustering**: each segment is attached to the closest
//!    already-accepted canonical line whose anchor (`x0` for verticals,
//!    `y0` for horizontals) lies strictly within `search_distance`, and
//!    takes that line's perpendicular coordinates. Segments with no such
//!    line open a new canonical line.
//! 2. **Collinear join**: segments sharing a canonical line are merged
//!    when their spans overlap or touch within `search_distance`, so the
//!    surviving segment covers the union of both spans.
//!
//! The output is a fixed point: snapping it again changes nothing.

use crate::geometry::Orientation;
use crate::primitives::RuleSegment;

/// Snap a list of same-orientation segments into canonical lines.
///
/// Output order is the order in which canonical lines were first
/// observed, and within one line by span start.
pub fn snap_rules(segments: Vec<RuleSegment>, search_distance: f64) -> Vec<RuleSegment> {
    if segments.is_empty() {
        return Vec::new();
    }

    // Phase 1: assign every observation to a canonical line.
    let mut lines: Vec<CanonicalLine> = Vec::new();
    for segment in segments {
        match closest_line(&lines, segment.anchor(), search_distance) {
            Some(idx) => lines[idx].absorb(segment),
            None => lines.push(CanonicalLine::open(segment)),
        }
    }

    // Phase 2: merge overlapping spans on each line.
    let mut result = Vec::new();
    for line in lines {
        result.extend(join_collinear(line.members, search_distance));
    }
    result
}

/// Snap verticals and horizontals of a mixed list, returning `(verticals, horizontals)`.
pub fn snap_all(
    segments: Vec<RuleSegment>,
    search_distance: f64,
) -> (Vec<RuleSegment>, Vec<RuleSegment>) {
    let (verticals, horizontals): (Vec<_>, Vec<_>) = segments
        .into_iter()
        .partition(|s| s.orientation == Orientation::Vertical);
    (
        snap_rules(verticals, search_distance),
        snap_rules(horizontals, search_distance),
    )
}

/// Observations attached to one canonical line.
struct CanonicalLine {
    anchor: f64,
    members: Vec<RuleSegment>,
}

impl CanonicalLine {
    fn open(segment: RuleSegment) -> Self {
        Self {
            anchor: segment.anchor(),
            members: vec![segment],
        }
    }

    /// Align `segment` to this line's perpendicular coordinates and keep it.
    fn absorb(&mut self, mut segment: RuleSegment) {
        let proto = &self.members[0];
        match segment.orientation {
            Orientation::Vertical => {
                segment.bbox.x0 = proto.bbox.x0;
                segment.bbox.x1 = proto.bbox.x1;
            }
            Orientation::Horizontal => {
                segment.bbox.y0 = proto.bbox.y0;
                segment.bbox.y1 = proto.bbox.y1;
            }
        }
        self.members.push(segment);
    }
}

/// Index of the canonical line nearest to `anchor`, if any lies within tolerance.
fn closest_line(lines: &[CanonicalLine], anchor: f64, tolerance: f64) -> Option<usize> {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| (i, (line.anchor - anchor).abs()))
        .filter(|(_, dist)| *dist < tolerance)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

/// Merge overlapping or adjacent segments that share one canonical line.
fn join_collinear(mut members: Vec<RuleSegment>, tolerance: f64) -> Vec<RuleSegment> {
    members.sort_by(|a, b| a.span().0.total_cmp(&b.span().0));

    let mut merged: Vec<RuleSegment> = Vec::with_capacity(members.len());
    for segment in members {
        let (start, end) = segment.span();
        match merged.last_mut() {
            Some(current) if start <= current.span().1 + tolerance => {
                let (cur_start, cur_end) = current.span();
                if end > cur_end {
                    current.set_span(cur_start, end);
                }
            }
            _ => merged.push(segment),
        }
    }
    merged
}
