use std::fmt;

use crate::math::Location;

/// A node id together with its resolved location.
///
/// The assembler only ever compares node refs by location; the id is carried
/// along so that output rings reference the original nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NodeRef {
    pub id: i64,
    pub location: Location,
}

impl NodeRef {
    #[must_use]
    pub const fn new(id: i64, location: Location) -> Self {
        Self { id, location }
    }

    /// Returns `true` if both refs sit at the same location.
    #[must_use]
    pub fn same_location(&self, other: &NodeRef) -> bool {
        self.location == other.location
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.id, self.location)
    }
}
