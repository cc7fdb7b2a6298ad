use super::NodeRef;

/// A way with all node locations resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Way {
    pub id: i64,
    /// The nodes of the way in order.
    pub nodes: Vec<NodeRef>,
}

impl Way {
    #[must_use]
    pub fn new(id: i64, nodes: Vec<NodeRef>) -> Self {
        Self { id, nodes }
    }

    /// Returns `true` if the way has at least two nodes and ends where it starts.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        match (self.nodes.first(), self.nodes.last()) {
            (Some(first), Some(last)) => self.nodes.len() > 1 && first.same_location(last),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Location;

    fn n(id: i64, x: i32, y: i32) -> NodeRef {
        NodeRef::new(id, Location::new(x, y))
    }

    #[test]
    fn closed_by_location() {
        let way = Way::new(1, vec![n(1, 0, 0), n(2, 1, 0), n(3, 1, 1), n(4, 0, 0)]);
        assert!(way.is_closed());
    }

    #[test]
    fn open_and_short_ways() {
        assert!(!Way::new(1, vec![n(1, 0, 0), n(2, 1, 0)]).is_closed());
        assert!(!Way::new(1, vec![n(1, 0, 0)]).is_closed());
        assert!(!Way::new(1, vec![]).is_closed());
    }
}
