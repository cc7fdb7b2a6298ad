pub mod area;
pub mod error;
pub mod math;
pub mod osm;

pub use area::{Assembler, AssemblerConfig, Problem};
pub use error::{AreaError, Result};
pub use math::Location;
pub use osm::{Area, NodeRef, OuterRing, Relation, Tag, Way};
