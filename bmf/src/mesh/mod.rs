pub mod attributes;
mod billboard;
mod binary_mesh;
mod bounds;
mod codec;
mod compaction;
mod conversion;
pub mod generator;
pub mod generators;
mod grouping;
pub mod index;
mod index_reduction;
pub mod shape;
pub mod triangle;
pub mod vertex;
mod vertex_data;
mod verify;

pub use attributes::*;
pub use billboard::*;
pub use binary_mesh::*;
pub use bounds::*;
pub use codec::FILE_VERSION;
pub use generator::*;
pub use index::IndexType;
pub use shape::*;
pub use triangle::*;
pub use vertex::*;
pub use vertex_data::*;
