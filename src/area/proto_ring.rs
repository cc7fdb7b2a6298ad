use std::collections::HashMap;
use std::fmt;

use slotmap::SlotMap;

use crate::error::{AreaError, Result};
use crate::math::polygon_2d::{winding, Winding};
use crate::math::Location;
use crate::osm::NodeRef;

use super::segment::Segment;

slotmap::new_key_type! {
    /// Handle of a ring in a [`RingStore`].
    pub struct RingId;
}

/// Whether a closed ring bounds the area or a hole in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingRole {
    Outer,
    Inner,
}

/// A ring under construction.
///
/// Holds a chain of node refs that grows at both ends while segments are
/// added. It is closed once the first and last node share a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtoRing {
    nodes: Vec<NodeRef>,
    inner: Vec<RingId>,
    role: Option<RingRole>,
}

impl ProtoRing {
    /// Starts a ring from a single segment.
    #[must_use]
    pub fn new(segment: &Segment) -> Self {
        Self::from_nodes(vec![*segment.first(), *segment.second()])
    }

    #[must_use]
    pub fn from_nodes(nodes: Vec<NodeRef>) -> Self {
        Self {
            nodes,
            inner: Vec::new(),
            role: None,
        }
    }

    #[must_use]
    pub fn nodes(&self) -> &[NodeRef] {
        &self.nodes
    }

    /// Node locations in ring order.
    #[must_use]
    pub fn locations(&self) -> Vec<Location> {
        self.nodes.iter().map(|n| n.location).collect()
    }

    /// First node. Rings always hold at least two nodes.
    #[must_use]
    pub fn first(&self) -> &NodeRef {
        &self.nodes[0]
    }

    #[must_use]
    pub fn last(&self) -> &NodeRef {
        &self.nodes[self.nodes.len() - 1]
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.first().same_location(self.last())
    }

    pub fn add_node_end(&mut self, node: NodeRef) {
        self.nodes.push(node);
    }

    pub fn add_node_start(&mut self, node: NodeRef) {
        self.nodes.insert(0, node);
    }

    /// Reverses the direction of the chain.
    pub fn reverse(&mut self) {
        self.nodes.reverse();
    }

    /// Appends `other`, which must start where this ring ends.
    pub fn merge_end(&mut self, other: &ProtoRing) {
        self.nodes.extend_from_slice(&other.nodes[1..]);
    }

    /// Prepends `other`, which must end where this ring starts.
    pub fn merge_start(&mut self, other: &ProtoRing) {
        let mut nodes = Vec::with_capacity(self.nodes.len() + other.nodes.len() - 1);
        nodes.extend_from_slice(&other.nodes);
        nodes.extend_from_slice(&self.nodes[1..]);
        self.nodes = nodes;
    }

    /// Cuts off a loop closed by the node just added at the end.
    ///
    /// If the last node also appears earlier in the chain (but not as the
    /// first node), the loop from that occurrence to the end is returned as
    /// a new closed ring and this ring is shortened to end at the occurrence.
    pub fn split_end(&mut self) -> Option<ProtoRing> {
        let loc = self.last().location;
        let end = self.nodes.len() - 1;
        let pos = (1..end).find(|&i| self.nodes[i].location == loc)?;
        let subring = ProtoRing::from_nodes(self.nodes.split_off(pos));
        self.nodes.push(subring.nodes[0]);
        Some(subring)
    }

    /// Cuts off a loop closed by the node just added at the start.
    ///
    /// Mirror image of [`ProtoRing::split_end`]: the loop from the start to
    /// the next occurrence of the first node's location becomes a new ring.
    pub fn split_start(&mut self) -> Option<ProtoRing> {
        let loc = self.first().location;
        let end = self.nodes.len() - 1;
        let pos = (1..end).find(|&i| self.nodes[i].location == loc)?;
        let subring = ProtoRing::from_nodes(self.nodes[..=pos].to_vec());
        self.nodes.drain(..pos);
        Some(subring)
    }

    /// Cuts off a loop between two inner occurrences of the same location.
    ///
    /// Merging two chains can bring a location into the ring twice away from
    /// its ends. The shortest such loop found scanning from the start is
    /// returned as a new closed ring; this ring keeps one copy of the
    /// location. The first and last node of a closed ring do not count as a
    /// repeat.
    pub fn split_pinch(&mut self) -> Option<ProtoRing> {
        let last = self.nodes.len() - 1;
        let mut seen: HashMap<Location, usize> = HashMap::new();
        let mut pinch = None;
        for (j, node) in self.nodes.iter().enumerate() {
            if let Some(i) = seen.insert(node.location, j) {
                if !(i == 0 && j == last) {
                    pinch = Some((i, j));
                    break;
                }
            }
        }
        let (i, j) = pinch?;
        let subring = ProtoRing::from_nodes(self.nodes[i..=j].to_vec());
        self.nodes.drain(i + 1..=j);
        Some(subring)
    }

    /// Traversal direction, meaningful once closed.
    #[must_use]
    pub fn winding(&self) -> Winding {
        winding(&self.locations())
    }

    /// The ring's smallest segment. Its first node is the ring's smallest
    /// location.
    #[must_use]
    pub fn min_segment(&self) -> Option<Segment> {
        self.nodes
            .windows(2)
            .filter(|pair| !pair[0].same_location(&pair[1]))
            .map(|pair| Segment::new(pair[0], pair[1]))
            .min()
    }

    /// Node sequence in the requested traversal direction.
    #[must_use]
    pub fn nodes_with_winding(&self, target: Winding) -> Vec<NodeRef> {
        let mut nodes = self.nodes.clone();
        if self.winding() != target {
            nodes.reverse();
        }
        nodes
    }

    pub fn set_role(&mut self, role: RingRole) {
        self.role = Some(role);
    }

    #[must_use]
    pub fn is_outer(&self) -> bool {
        self.role == Some(RingRole::Outer)
    }

    /// Inner rings attached to this outer ring.
    #[must_use]
    pub fn inner_rings(&self) -> &[RingId] {
        &self.inner
    }

    pub fn add_inner_ring(&mut self, ring: RingId) {
        self.inner.push(ring);
    }
}

impl fmt::Display for ProtoRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", node.id)?;
        }
        write!(f, "]")
    }
}

/// Arena owning the rings of one assembly run.
///
/// Rings reference each other (and segments reference rings) by [`RingId`].
/// Removing a ring invalidates its id; lookups of stale ids fail instead of
/// silently hitting a reused slot.
#[derive(Debug, Default)]
pub struct RingStore {
    rings: SlotMap<RingId, ProtoRing>,
    order: Vec<RingId>,
}

impl RingStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.rings.clear();
        self.order.clear();
    }

    /// Inserts a ring and returns its id.
    pub fn insert(&mut self, ring: ProtoRing) -> RingId {
        let id = self.rings.insert(ring);
        self.order.push(id);
        id
    }

    /// Removes a ring, returning it.
    ///
    /// # Errors
    ///
    /// Returns `AreaError::RingNotFound` if the id is stale.
    pub fn remove(&mut self, id: RingId) -> Result<ProtoRing> {
        let ring = self.rings.remove(id).ok_or(AreaError::RingNotFound)?;
        self.order.retain(|&r| r != id);
        Ok(ring)
    }

    /// Returns a reference to the ring.
    ///
    /// # Errors
    ///
    /// Returns `AreaError::RingNotFound` if the id is stale.
    pub fn ring(&self, id: RingId) -> Result<&ProtoRing> {
        self.rings.get(id).ok_or(AreaError::RingNotFound)
    }

    /// Returns a mutable reference to the ring.
    ///
    /// # Errors
    ///
    /// Returns `AreaError::RingNotFound` if the id is stale.
    pub fn ring_mut(&mut self, id: RingId) -> Result<&mut ProtoRing> {
        self.rings.get_mut(id).ok_or(AreaError::RingNotFound)
    }

    /// Ids of all live rings in the order they were created.
    #[must_use]
    pub fn ids(&self) -> &[RingId] {
        &self.order
    }

    /// Live rings in the order they were created.
    pub fn iter(&self) -> impl Iterator<Item = (RingId, &ProtoRing)> {
        self.order
            .iter()
            .filter_map(|&id| self.rings.get(id).map(|ring| (id, ring)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
