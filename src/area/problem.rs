use std::fmt;

use crate::math::Location;
use crate::osm::NodeRef;

use super::segment::Segment;

/// A defect found in the input geometry of a relation.
///
/// Problems are only collected while the assembler is told to remember them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    /// Two segments cross or touch somewhere other than a shared endpoint.
    SelfIntersection {
        location: Location,
        first: Segment,
        second: Segment,
    },
    /// An end of a ring that could not be closed.
    RingNotClosed { node: NodeRef },
    /// An odd number (three or more) of identical segments; one was kept.
    Overlap { segment: Segment },
    /// An inner ring that no outer ring contains.
    InnerWithoutOuter { node: NodeRef },
}

impl Problem {
    /// Stable label of the problem type.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SelfIntersection { .. } => "intersection",
            Self::RingNotClosed { .. } => "ring_not_closed",
            Self::Overlap { .. } => "overlap",
            Self::InnerWithoutOuter { .. } => "inner_without_outer",
        }
    }

    /// Where the problem is.
    #[must_use]
    pub fn location(&self) -> Location {
        match self {
            Self::SelfIntersection { location, .. } => *location,
            Self::RingNotClosed { node } | Self::InnerWithoutOuter { node } => node.location,
            Self::Overlap { segment } => segment.first().location,
        }
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelfIntersection {
                location,
                first,
                second,
            } => write!(f, "{} at {location} between {first} and {second}", self.kind()),
            Self::RingNotClosed { node } | Self::InnerWithoutOuter { node } => {
                write!(f, "{} at {node}", self.kind())
            }
            Self::Overlap { segment } => write!(f, "{} on {segment}", self.kind()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_and_location() {
        let node = NodeRef::new(3, Location::new(10, 20));
        let problem = Problem::RingNotClosed { node };
        assert_eq!(problem.kind(), "ring_not_closed");
        assert_eq!(problem.location(), Location::new(10, 20));

        let segment = Segment::new(node, NodeRef::new(4, Location::new(0, 0)));
        let problem = Problem::Overlap { segment };
        assert_eq!(problem.kind(), "overlap");
        assert_eq!(problem.location(), Location::new(0, 0));
    }

    #[test]
    fn display_names_the_kind() {
        let a = NodeRef::new(1, Location::new(0, 0));
        let b = NodeRef::new(2, Location::new(10, 10));
        let c = NodeRef::new(3, Location::new(0, 10));
        let d = NodeRef::new(4, Location::new(10, 0));
        let problem = Problem::SelfIntersection {
            location: Location::new(5, 5),
            first: Segment::new(a, b),
            second: Segment::new(c, d),
        };
        assert!(problem.to_string().starts_with("intersection at "));
    }
}
