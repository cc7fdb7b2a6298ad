use slotmap::SecondaryMap;

use crate::error::Result;
use crate::math::ray_2d::LeftRay;

use super::proto_ring::{RingId, RingRole, RingStore};
use super::segment::Segment;

/// Decides for every (closed) ring whether it is outer or inner, and attaches
/// each inner ring to the outer ring directly containing it.
///
/// From each ring a ray is cast to the left, starting right next to the
/// ring's smallest location. Every other ring it crosses an odd number of
/// times contains the ring. The nesting depth is the number of containing
/// rings: even depth means outer, odd depth inner. The parent of an inner ring
/// is the container one level up.
///
/// Returns the inner rings that no outer ring contains, in creation order.
///
/// # Errors
///
/// Returns `AreaError::RingNotFound` if a segment still links to a ring that
/// no longer exists.
pub fn classify_rings(segments: &[Segment], rings: &mut RingStore) -> Result<Vec<RingId>> {
    let order = rings.ids().to_vec();

    let mut containers: SecondaryMap<RingId, Vec<RingId>> = SecondaryMap::new();
    for &id in &order {
        containers.insert(id, containing_rings(segments, rings, &order, id)?);
    }

    let mut orphans = Vec::new();
    for &id in &order {
        let depth = containers[id].len();
        if depth % 2 == 0 {
            rings.ring_mut(id)?.set_role(RingRole::Outer);
            continue;
        }

        rings.ring_mut(id)?.set_role(RingRole::Inner);
        let parent = containers[id]
            .iter()
            .copied()
            .find(|&c| containers[c].len() + 1 == depth);
        match parent {
            Some(parent) => rings.ring_mut(parent)?.add_inner_ring(id),
            None => orphans.push(id),
        }
    }
    Ok(orphans)
}

/// Rings containing the given ring, in creation order.
fn containing_rings(
    segments: &[Segment],
    rings: &RingStore,
    order: &[RingId],
    id: RingId,
) -> Result<Vec<RingId>> {
    let Some(reference) = rings.ring(id)?.min_segment() else {
        return Ok(Vec::new());
    };
    let ray = LeftRay::new(reference.first().location, reference.second().location);

    let mut crossings: SecondaryMap<RingId, usize> = SecondaryMap::new();
    for segment in segments {
        let Some(owner) = segment.ring() else {
            continue;
        };
        if owner == id {
            continue;
        }
        rings.ring(owner)?;
        if ray
            .left_hit(segment.first().location, segment.second().location)
            .is_some()
        {
            if let Some(count) = crossings.entry(owner) {
                *count.or_insert(0) += 1;
            }
        }
    }

    Ok(order
        .iter()
        .copied()
        .filter(|&r| crossings.get(r).is_some_and(|c| c % 2 == 1))
        .collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::area::proto_ring::ProtoRing;
    use crate::math::Location;
    use crate::osm::NodeRef;

    fn ring_of(points: &[(i32, i32)], first_id: i64) -> ProtoRing {
        let mut nodes: Vec<NodeRef> = points
            .iter()
            .zip(first_id..)
            .map(|(&(x, y), id)| NodeRef::new(id, Location::new(x, y)))
            .collect();
        nodes.push(nodes[0]);
        ProtoRing::from_nodes(nodes)
    }

    fn square(x0: i32, y0: i32, size: i32, first_id: i64) -> ProtoRing {
        ring_of(
            &[(x0, y0), (x0 + size, y0), (x0 + size, y0 + size), (x0, y0 + size)],
            first_id,
        )
    }

    /// Registers the ring and links segments for all of its edges.
    fn add(store: &mut RingStore, segments: &mut Vec<Segment>, ring: ProtoRing) -> RingId {
        let edges: Vec<Segment> = ring
            .nodes()
            .windows(2)
            .map(|p| Segment::new(p[0], p[1]))
            .collect();
        let id = store.insert(ring);
        for mut seg in edges {
            seg.set_ring(Some(id));
            segments.push(seg);
        }
        id
    }

    fn outer_rings(store: &RingStore) -> Vec<RingId> {
        store
            .iter()
            .filter(|(_, ring)| ring.is_outer())
            .map(|(id, _)| id)
            .collect()
    }

    #[test]
    fn single_ring_is_outer() {
        let mut store = RingStore::new();
        let mut segments = Vec::new();
        let a = add(&mut store, &mut segments, square(0, 0, 10, 1));

        let orphans = classify_rings(&segments, &mut store).unwrap();
        assert!(orphans.is_empty());
        assert_eq!(outer_rings(&store), vec![a]);
    }

    #[test]
    fn hole_and_island_nest_three_levels() {
        let mut store = RingStore::new();
        let mut segments = Vec::new();
        let outer = add(&mut store, &mut segments, square(0, 0, 100, 1));
        let hole = add(&mut store, &mut segments, square(10, 10, 80, 10));
        let island = add(&mut store, &mut segments, square(20, 20, 60, 20));
        let island_hole = add(&mut store, &mut segments, square(40, 40, 10, 30));
        let other_hole = add(&mut store, &mut segments, square(60, 60, 10, 40));

        let orphans = classify_rings(&segments, &mut store).unwrap();
        assert!(orphans.is_empty());
        assert_eq!(outer_rings(&store), vec![outer, island]);
        assert_eq!(store.ring(outer).unwrap().inner_rings(), &[hole]);
        assert_eq!(
            store.ring(island).unwrap().inner_rings(),
            &[island_hole, other_hole]
        );
        assert!(!store.ring(hole).unwrap().is_outer());
    }

    #[test]
    fn disjoint_outer_rings_keep_their_holes() {
        let mut store = RingStore::new();
        let mut segments = Vec::new();
        let left = add(&mut store, &mut segments, square(0, 0, 10, 1));
        let right = add(&mut store, &mut segments, square(20, 0, 10, 10));
        let right_hole = add(&mut store, &mut segments, square(22, 2, 4, 20));

        classify_rings(&segments, &mut store).unwrap();
        assert_eq!(outer_rings(&store), vec![left, right]);
        assert!(store.ring(left).unwrap().inner_rings().is_empty());
        assert_eq!(store.ring(right).unwrap().inner_rings(), &[right_hole]);
    }

    #[test]
    fn hole_touching_outer_at_a_vertex() {
        let mut store = RingStore::new();
        let mut segments = Vec::new();
        let outer = add(&mut store, &mut segments, square(0, 0, 10, 1));
        // Triangle hole whose smallest location is the outer ring's corner.
        let hole = add(
            &mut store,
            &mut segments,
            ring_of(&[(0, 0), (6, 2), (2, 6)], 10),
        );

        classify_rings(&segments, &mut store).unwrap();
        assert_eq!(outer_rings(&store), vec![outer]);
        assert_eq!(store.ring(outer).unwrap().inner_rings(), &[hole]);
    }

    #[test]
    fn inconsistent_containment_yields_orphan() {
        let mut store = RingStore::new();
        let mut segments = Vec::new();
        // The ring's own nodes sit inside the big square, while its linked
        // segments claim a square around everything else.
        let small = store.insert(square(40, 40, 10, 1));
        let big = add(&mut store, &mut segments, square(0, 0, 100, 10));
        for seg in square(-10, -10, 200, 20).nodes().windows(2) {
            let mut seg = Segment::new(seg[0], seg[1]);
            seg.set_ring(Some(small));
            segments.push(seg);
        }

        let orphans = classify_rings(&segments, &mut store).unwrap();
        assert_eq!(orphans, vec![small, big]);
        assert!(outer_rings(&store).is_empty());
    }

    #[test]
    fn stale_ring_link_is_an_error() {
        let mut store = RingStore::new();
        let mut segments = Vec::new();
        add(&mut store, &mut segments, square(0, 0, 10, 1));
        let gone = add(&mut store, &mut segments, square(20, 0, 10, 10));
        store.remove(gone).unwrap();

        assert!(classify_rings(&segments, &mut store).is_err());
    }
}
