pub mod assembler;
pub mod classify;
pub mod problem;
pub mod proto_ring;
pub mod segment;

pub use assembler::{Assembler, AssemblerConfig};
pub use classify::classify_rings;
pub use problem::Problem;
pub use proto_ring::{ProtoRing, RingId, RingRole, RingStore};
pub use segment::{cancel_duplicate_segments, extract_segments, DuplicateRun, Segment};
