//! Interactive drafting operations.
//!
//! Every operation is a pure function from entities to new entity
//! descriptions. Infeasible geometry (parallel lines, empty intersection
//! sets, no boundary ahead) is reported as `None` or an empty collection so
//! an interactive session can no-op instead of aborting.

pub mod break_at;
pub mod extend;
pub mod fillet;
pub mod intersect;
pub mod offset;
pub mod transform;
pub mod trim;
