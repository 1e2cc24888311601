//! Binary mesh format: packed vertex/index meshes with a bitmask-selected
//! vertex layout, a versioned binary encoding and structural transformations
//! (attribute conversion, compaction, shape grouping, bounding volumes and
//! 16-bit index partitioning).

pub mod error;
pub mod math;
pub mod mesh;

pub use error::{Error, Result};
