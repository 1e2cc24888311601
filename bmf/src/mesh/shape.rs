use crate::math::*;

/// A contiguous triangle range of a mesh. Indices stored for a shape are local:
/// index 0 addresses the vertex at `vertex_offset`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Shape {
    pub index_offset: u32,
    pub index_count: u32,
    pub vertex_offset: u32,
    pub vertex_count: u32,
    pub material_id: u32,
    pub bbox: AABB,
    pub sphere: Sphere,
}

impl Shape {
    /// Shape covering whole buffers, with volumes left at their defaults.
    pub fn covering(index_count: u32, vertex_count: u32) -> Self {
        Self { index_count, vertex_count, ..Default::default() }
    }

    pub fn num_triangles(&self) -> u32 {
        self.index_count / 3
    }

    pub fn index_range(&self) -> std::ops::Range<usize> {
        let start = self.index_offset as usize;
        start..start + self.index_count as usize
    }

    pub fn vertex_range(&self) -> std::ops::Range<usize> {
        let start = self.vertex_offset as usize;
        start..start + self.vertex_count as usize
    }
}
