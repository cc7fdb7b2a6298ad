use crate::error::Result;
use crate::math::intersect_2d::{segment_intersection, y_range_overlap};
use crate::math::polygon_2d::Winding;
use crate::osm::{Area, NodeRef, OuterRing, Relation, Way};

use super::classify::classify_rings;
use super::problem::Problem;
use super::proto_ring::{ProtoRing, RingId, RingStore};
use super::segment::{cancel_duplicate_segments, extract_segments, Segment};

/// Emits a `tracing` debug event when debug output is enabled.
macro_rules! debug_trace {
    ($self:ident, $($arg:tt)+) => {
        if $self.config.debug {
            tracing::debug!($($arg)+);
        }
    };
}

/// Settings of an [`Assembler`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssemblerConfig {
    /// Keep a list of the problems found in the input.
    pub remember_problems: bool,
    /// Trace every assembly step through `tracing` at debug level.
    pub debug: bool,
}

impl AssemblerConfig {
    #[must_use]
    pub fn with_remember_problems(mut self, remember: bool) -> Self {
        self.remember_problems = remember;
        self
    }

    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Where a segment attaches to an open ring.
#[derive(Debug, Clone, Copy)]
enum Junction {
    /// Append the node at the ring's end.
    End(NodeRef),
    /// Prepend the node at the ring's start.
    Start(NodeRef),
}

/// Assembles areas from multipolygon relations and their member ways.
///
/// One assembler handles one relation at a time. The segments and rings of a
/// run are cleared on entry, so an instance can be reused sequentially but
/// must not be shared between threads; use one assembler per worker.
#[derive(Debug, Default)]
pub struct Assembler {
    config: AssemblerConfig,
    problems: Vec<Problem>,
    segments: Vec<Segment>,
    rings: RingStore,
}

impl Assembler {
    /// Creates an assembler with the given settings.
    #[must_use]
    pub fn new(config: AssemblerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn config(&self) -> AssemblerConfig {
        self.config
    }

    /// Enables or disables debug tracing. Has no effect on the result.
    pub fn enable_debug_output(&mut self, debug: bool) {
        self.config.debug = debug;
    }

    /// Enables or disables collection of problems found in the input.
    pub fn remember_problems(&mut self, remember: bool) {
        self.config.remember_problems = remember;
    }

    /// Problems collected so far, across all relations assembled.
    #[must_use]
    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    pub fn clear_problems(&mut self) {
        self.problems.clear();
    }

    /// Assembles the area of a relation from its member ways.
    ///
    /// Invalid geometry (crossing segments, rings that do not close) yields an
    /// area without rings. So does an inner ring outside every outer ring,
    /// which only broken ring bookkeeping can produce.
    ///
    /// # Errors
    ///
    /// Returns `AreaError::RingNotFound` if ring bookkeeping breaks; this
    /// indicates a bug, not bad input.
    pub fn assemble(&mut self, relation: &Relation, ways: &[Way]) -> Result<Area> {
        self.rings.clear();

        self.segments = extract_segments(ways);
        debug_trace!(
            self,
            relation = relation.id,
            ways = ways.len(),
            closed_ways = ways.iter().filter(|w| w.is_closed()).count(),
            segments = self.segments.len(),
            "assembling relation"
        );

        self.segments.sort();
        self.erase_duplicate_segments();

        // Areas without rings are invalid. This is what the caller sees
        // unless assembly runs to completion.
        let mut area = Area::from_relation(relation);

        if self.find_intersections() {
            debug_trace!(self, relation = relation.id, "segments intersect");
            return Ok(area);
        }

        self.build_rings()?;

        if self.check_for_open_rings() {
            debug_trace!(self, relation = relation.id, "not all rings are closed");
            return Ok(area);
        }

        if let Some(rings) = self.nest_rings()? {
            area.rings = rings;
        }
        Ok(area)
    }

    /// Assembles a sequence of relations, one area per relation.
    ///
    /// # Errors
    ///
    /// Stops at the first internal error; invalid geometry does not stop it.
    pub fn assemble_all<'a, I>(&mut self, input: I) -> Result<Vec<Area>>
    where
        I: IntoIterator<Item = (&'a Relation, &'a [Way])>,
    {
        input
            .into_iter()
            .map(|(relation, ways)| self.assemble(relation, ways))
            .collect()
    }

    /// Removes pairs of identical segments from the sorted segment list.
    fn erase_duplicate_segments(&mut self) {
        for run in cancel_duplicate_segments(&mut self.segments) {
            debug_trace!(
                self,
                segment = %run.segment,
                count = run.count,
                "erased duplicate segments"
            );
            if run.has_survivor() && self.config.remember_problems {
                self.problems.push(Problem::Overlap {
                    segment: run.segment.detached(),
                });
            }
        }
    }

    /// Checks all pairs of segments for intersections.
    ///
    /// Relies on the segments being sorted: once a later segment starts right
    /// of the current one's x-range, no following segment can reach it.
    fn find_intersections(&mut self) -> bool {
        let mut found = false;
        for (i, s1) in self.segments.iter().enumerate() {
            for s2 in &self.segments[i + 1..] {
                if s1 == s2 {
                    debug_trace!(self, segment = %s1, "overlapping segment");
                    continue;
                }
                if s1.is_left_of(s2) {
                    break;
                }
                let (a0, a1) = (s1.first().location, s1.second().location);
                let (b0, b1) = (s2.first().location, s2.second().location);
                if !y_range_overlap(a0, a1, b0, b1) {
                    continue;
                }
                if let Some(location) = segment_intersection(a0, a1, b0, b1) {
                    found = true;
                    debug_trace!(
                        self,
                        first = %s1,
                        second = %s2,
                        at = %location,
                        "segments intersecting"
                    );
                    if self.config.remember_problems {
                        self.problems.push(Problem::SelfIntersection {
                            location,
                            first: s1.detached(),
                            second: s2.detached(),
                        });
                    }
                }
            }
        }
        found
    }

    /// Adds all segments, in sorted order, to rings.
    fn build_rings(&mut self) -> Result<()> {
        for index in 0..self.segments.len() {
            let segment = self.segments[index];
            debug_trace!(self, segment = %segment, "check segment");

            match self.find_junction(&segment)? {
                Some((ring, junction)) => self.combine_rings(index, ring, junction)?,
                None => {
                    debug_trace!(self, segment = %segment, "new ring for segment");
                    let ring = self.rings.insert(ProtoRing::new(&segment));
                    self.segments[index].set_ring(Some(ring));
                }
            }
        }

        if self.config.debug {
            for (id, ring) in self.rings.iter() {
                tracing::debug!(?id, ring = %ring, closed = ring.is_closed(), "ring");
            }
        }
        Ok(())
    }

    /// First open ring, in creation order, one of whose ends meets the segment.
    fn find_junction(&self, segment: &Segment) -> Result<Option<(RingId, Junction)>> {
        let (first, second) = (segment.first(), segment.second());
        for &id in self.rings.ids() {
            let ring = self.rings.ring(id)?;
            if ring.is_closed() {
                continue;
            }
            let junction = if ring.last().same_location(first) {
                Junction::End(*second)
            } else if ring.last().same_location(second) {
                Junction::End(*first)
            } else if ring.first().same_location(first) {
                Junction::Start(*second)
            } else if ring.first().same_location(second) {
                Junction::Start(*first)
            } else {
                continue;
            };
            return Ok(Some((id, junction)));
        }
        Ok(None)
    }

    /// Extends a ring with a segment, then splits off a closed loop or merges
    /// with another open ring as needed.
    ///
    /// A ring closed by the new node is done. Splitting off a loop leaves the
    /// rest of the ring open, so the merge check still runs after a split.
    /// After a merge, loops pinched off inside the ring are split off too.
    fn combine_rings(&mut self, index: usize, id: RingId, junction: Junction) -> Result<()> {
        self.segments[index].set_ring(Some(id));

        let ring = self.rings.ring_mut(id)?;
        let at_end = match junction {
            Junction::End(node) => {
                ring.add_node_end(node);
                true
            }
            Junction::Start(node) => {
                ring.add_node_start(node);
                false
            }
        };

        if ring.is_closed() {
            debug_trace!(self, ?id, "ring now closed");
            return Ok(());
        }

        let subring = if at_end {
            ring.split_end()
        } else {
            ring.split_start()
        };
        if let Some(subring) = subring {
            debug_trace!(self, subring = %subring, "split off closed subring");
            let sub_id = self.rings.insert(subring);
            self.relink_subring(sub_id)?;
        }

        let merged = if at_end {
            self.combine_rings_end(id)?
        } else {
            self.combine_rings_start(id)?
        };
        if let Some(old) = merged {
            self.update_ring_link_in_segments(old, id);
            // The merge point can repeat a location further inside the ring
            // (a hole touching its outer ring at a vertex).
            while let Some(subring) = self.rings.ring_mut(id)?.split_pinch() {
                debug_trace!(self, subring = %subring, "split off pinched subring");
                let sub_id = self.rings.insert(subring);
                self.relink_subring(sub_id)?;
            }
        }
        Ok(())
    }

    /// Appends the open ring that has an end where ring `id` ends, if any,
    /// reversing it first when it runs the other way.
    /// Returns the id of the absorbed ring.
    fn combine_rings_end(&mut self, id: RingId) -> Result<Option<RingId>> {
        let end = *self.rings.ring(id)?.last();
        let Some(other) = self.find_open_ring(id, |r| {
            r.first().same_location(&end) || r.last().same_location(&end)
        })?
        else {
            return Ok(None);
        };
        let mut absorbed = self.rings.remove(other)?;
        if !absorbed.first().same_location(&end) {
            absorbed.reverse();
        }
        self.rings.ring_mut(id)?.merge_end(&absorbed);
        debug_trace!(self, ?id, ?other, "merged ring at end");
        Ok(Some(other))
    }

    /// Prepends the open ring that has an end where ring `id` starts, if any,
    /// reversing it first when it runs the other way.
    /// Returns the id of the absorbed ring.
    fn combine_rings_start(&mut self, id: RingId) -> Result<Option<RingId>> {
        let start = *self.rings.ring(id)?.first();
        let Some(other) = self.find_open_ring(id, |r| {
            r.last().same_location(&start) || r.first().same_location(&start)
        })?
        else {
            return Ok(None);
        };
        let mut absorbed = self.rings.remove(other)?;
        if !absorbed.last().same_location(&start) {
            absorbed.reverse();
        }
        self.rings.ring_mut(id)?.merge_start(&absorbed);
        debug_trace!(self, ?id, ?other, "merged ring at start");
        Ok(Some(other))
    }

    fn find_open_ring<F>(&self, exclude: RingId, matches: F) -> Result<Option<RingId>>
    where
        F: Fn(&ProtoRing) -> bool,
    {
        for &other in self.rings.ids() {
            if other == exclude {
                continue;
            }
            let ring = self.rings.ring(other)?;
            if !ring.is_closed() && matches(ring) {
                return Ok(Some(other));
            }
        }
        Ok(None)
    }

    /// Points every segment of a merged-away ring at the surviving ring.
    fn update_ring_link_in_segments(&mut self, old: RingId, new: RingId) {
        for segment in &mut self.segments {
            if segment.ring() == Some(old) {
                segment.set_ring(Some(new));
            }
        }
    }

    /// Points the segments along a freshly split-off ring at that ring.
    fn relink_subring(&mut self, id: RingId) -> Result<()> {
        let nodes = self.rings.ring(id)?.nodes().to_vec();
        for pair in nodes.windows(2) {
            let key = Segment::new(pair[0], pair[1]);
            if let Ok(pos) = self.segments.binary_search(&key) {
                self.segments[pos].set_ring(Some(id));
            }
        }
        Ok(())
    }

    /// Records the ends of all open rings as problems.
    ///
    /// Returns `true` if any ring is open.
    fn check_for_open_rings(&mut self) -> bool {
        let mut open_rings = false;
        for (_, ring) in self.rings.iter() {
            if ring.is_closed() {
                continue;
            }
            open_rings = true;
            if self.config.remember_problems {
                self.problems.push(Problem::RingNotClosed {
                    node: *ring.first(),
                });
                self.problems.push(Problem::RingNotClosed { node: *ring.last() });
            }
        }
        open_rings
    }

    /// Classifies the closed rings and builds the output rings.
    ///
    /// Returns `None` if an inner ring has no outer ring. Depth parity never
    /// leaves one behind for consistently linked rings, so this only guards
    /// the links set up while stitching.
    fn nest_rings(&mut self) -> Result<Option<Vec<OuterRing>>> {
        let orphans = classify_rings(&self.segments, &mut self.rings)?;
        if orphans.is_empty() {
            return self.collect_rings().map(Some);
        }
        for id in orphans {
            let node = *self.rings.ring(id)?.first();
            debug_trace!(self, node = %node, "inner ring without outer ring");
            if self.config.remember_problems {
                self.problems.push(Problem::InnerWithoutOuter { node });
            }
        }
        Ok(None)
    }

    /// Builds the output rings: each outer ring counter-clockwise, followed by
    /// its inner rings clockwise.
    fn collect_rings(&self) -> Result<Vec<OuterRing>> {
        let mut result = Vec::new();
        for (_, ring) in self.rings.iter().filter(|(_, ring)| ring.is_outer()) {
            debug_trace!(self, ring = %ring, inner = ring.inner_rings().len(), "outer ring");
            let inner = ring
                .inner_rings()
                .iter()
                .map(|&inner| {
                    self.rings
                        .ring(inner)
                        .map(|r| r.nodes_with_winding(Winding::Clockwise))
                })
                .collect::<Result<Vec<_>>>()?;
            result.push(OuterRing {
                nodes: ring.nodes_with_winding(Winding::CounterClockwise),
                inner,
            });
        }
        Ok(result)
    }
}
