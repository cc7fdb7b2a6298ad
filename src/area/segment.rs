use std::cmp::Ordering;
use std::fmt;

use crate::osm::{NodeRef, Way};

use super::proto_ring::RingId;

/// An undirected way segment between two node refs.
///
/// Normalized so that `first` has the smaller location (smaller x, then
/// smaller y). Equality and ordering look at the two locations only; the ring
/// link is transient state of a single assembly run.
#[derive(Debug, Clone, Copy)]
pub struct Segment {
    first: NodeRef,
    second: NodeRef,
    ring: Option<RingId>,
}

impl Segment {
    /// Creates a normalized segment. The two refs should not share a location.
    #[must_use]
    pub fn new(a: NodeRef, b: NodeRef) -> Self {
        let (first, second) = if b.location < a.location { (b, a) } else { (a, b) };
        Self {
            first,
            second,
            ring: None,
        }
    }

    #[must_use]
    pub fn first(&self) -> &NodeRef {
        &self.first
    }

    #[must_use]
    pub fn second(&self) -> &NodeRef {
        &self.second
    }

    /// The ring currently containing this segment, if it has been placed.
    #[must_use]
    pub fn ring(&self) -> Option<RingId> {
        self.ring
    }

    pub fn set_ring(&mut self, ring: Option<RingId>) {
        self.ring = ring;
    }

    /// Copy without the ring link, for keeping beyond one assembly run.
    #[must_use]
    pub fn detached(&self) -> Self {
        Self {
            ring: None,
            ..*self
        }
    }

    /// Returns `true` if `other` starts right of this segment's x-range.
    /// Both segments must be normalized; with a sorted list no later
    /// segment can overlap this one either.
    #[must_use]
    pub fn is_left_of(&self, other: &Segment) -> bool {
        self.second.location.x() < other.first.location.x()
    }
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Segment {}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Segment {
    fn cmp(&self, other: &Self) -> Ordering {
        self.first
            .location
            .cmp(&other.first.location)
            .then_with(|| self.second.location.cmp(&other.second.location))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}--{}", self.first, self.second)
    }
}

/// Splits all ways into segments, skipping zero-length ones.
#[must_use]
pub fn extract_segments(ways: &[Way]) -> Vec<Segment> {
    let total: usize = ways.iter().map(|w| w.nodes.len().saturating_sub(1)).sum();
    let mut segments = Vec::with_capacity(total);
    for way in ways {
        segments.extend(
            way.nodes
                .windows(2)
                .filter(|pair| !pair[0].same_location(&pair[1]))
                .map(|pair| Segment::new(pair[0], pair[1])),
        );
    }
    segments
}

/// A run of identical segments removed (fully or down to one) by
/// [`cancel_duplicate_segments`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateRun {
    pub segment: Segment,
    pub count: usize,
}

impl DuplicateRun {
    /// Whether one copy of the segment survived cancellation.
    #[must_use]
    pub fn has_survivor(&self) -> bool {
        self.count % 2 == 1
    }
}

/// Removes identical segments two at a time from a sorted list.
///
/// Of `n` identical segments, `n % 2` remain. Returns every run of two or
/// more identical segments that was found.
pub fn cancel_duplicate_segments(segments: &mut Vec<Segment>) -> Vec<DuplicateRun> {
    let mut runs = Vec::new();
    let mut kept = Vec::with_capacity(segments.len());
    for run in segments.chunk_by(|a, b| a == b) {
        if run.len() > 1 {
            runs.push(DuplicateRun {
                segment: run[0],
                count: run.len(),
            });
        }
        if run.len() % 2 == 1 {
            kept.push(run[0]);
        }
    }
    *segments = kept;
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Location;

    fn n(id: i64, x: i32, y: i32) -> NodeRef {
        NodeRef::new(id, Location::new(x, y))
    }

    #[test]
    fn normalization_puts_smaller_location_first() {
        let s = Segment::new(n(1, 5, 0), n(2, 1, 9));
        assert_eq!(s.first().id, 2);
        assert_eq!(s.second().id, 1);

        let s = Segment::new(n(1, 3, 7), n(2, 3, 2));
        assert_eq!(s.first().location, Location::new(3, 2));
    }

    #[test]
    fn equality_ignores_direction_and_ids() {
        let a = Segment::new(n(1, 0, 0), n(2, 4, 4));
        let b = Segment::new(n(9, 4, 4), n(8, 0, 0));
        assert_eq!(a, b);
    }

    #[test]
    fn ordering_by_first_then_second() {
        let a = Segment::new(n(1, 0, 0), n(2, 0, 10));
        let b = Segment::new(n(1, 0, 0), n(3, 10, 0));
        let c = Segment::new(n(4, 0, 10), n(5, 10, 10));
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn extraction_skips_degenerate_pairs() {
        let ways = vec![
            Way::new(1, vec![n(1, 0, 0), n(2, 0, 0), n(3, 5, 0), n(4, 5, 5)]),
            Way::new(2, vec![n(5, 7, 7)]),
            Way::new(3, vec![]),
        ];
        let segments = extract_segments(&ways);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], Segment::new(n(2, 0, 0), n(3, 5, 0)));
    }

    #[test]
    fn cancellation_keeps_count_mod_two() {
        let seg = Segment::new(n(1, 0, 0), n(2, 1, 1));
        let other = Segment::new(n(3, 2, 2), n(4, 3, 3));
        for copies in 1..=6 {
            let mut segments = vec![seg; copies];
            segments.push(other);
            let runs = cancel_duplicate_segments(&mut segments);
            let survivors = segments.iter().filter(|s| **s == seg).count();
            assert_eq!(survivors, copies % 2, "copies = {copies}");
            assert!(segments.contains(&other));
            assert_eq!(runs.len(), usize::from(copies > 1));
        }
    }

    #[test]
    fn duplicate_run_reports_survivor() {
        let seg = Segment::new(n(1, 0, 0), n(2, 1, 1));
        let mut segments = vec![seg; 3];
        let runs = cancel_duplicate_segments(&mut segments);
        assert_eq!(runs, vec![DuplicateRun { segment: seg, count: 3 }]);
        assert!(runs[0].has_survivor());
    }
}
