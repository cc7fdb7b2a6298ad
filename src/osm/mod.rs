pub mod area;
pub mod node_ref;
pub mod relation;
pub mod way;

pub use area::{Area, OuterRing};
pub use node_ref::NodeRef;
pub use relation::{Relation, Tag};
pub use way::Way;
