use super::{NodeRef, Relation, Tag};

/// An outer boundary together with the holes it contains.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OuterRing {
    /// Closed node sequence, counter-clockwise.
    pub nodes: Vec<NodeRef>,
    /// Closed node sequences of the inner rings, clockwise.
    pub inner: Vec<Vec<NodeRef>>,
}

/// An area assembled from a multipolygon relation.
///
/// An area without rings is invalid: it is what the assembler produces when
/// the relation's geometry could not be assembled. It still carries the
/// relation's attributes and tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Area {
    /// `2 * relation_id + 1`, disjoint from areas built from closed ways.
    pub id: i64,
    pub version: u32,
    pub changeset: u64,
    pub timestamp: i64,
    pub visible: bool,
    pub uid: u32,
    pub user: String,
    pub tags: Vec<Tag>,
    pub rings: Vec<OuterRing>,
}

impl Area {
    /// Creates an area with the relation's attributes and tags but no rings.
    #[must_use]
    pub fn from_relation(relation: &Relation) -> Self {
        Self {
            id: relation.id * 2 + 1,
            version: relation.version,
            changeset: relation.changeset,
            timestamp: relation.timestamp,
            visible: relation.visible,
            uid: relation.uid,
            user: relation.user.clone(),
            tags: relation.tags.clone(),
            rings: Vec::new(),
        }
    }

    /// Id of the relation this area was built from.
    #[must_use]
    pub fn orig_id(&self) -> i64 {
        (self.id - 1) / 2
    }

    /// Returns `false` if assembly failed and the area has no rings.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.rings.is_empty()
    }

    /// Number of outer and inner rings.
    #[must_use]
    pub fn num_rings(&self) -> (usize, usize) {
        let inner = self.rings.iter().map(|r| r.inner.len()).sum();
        (self.rings.len(), inner)
    }
}
