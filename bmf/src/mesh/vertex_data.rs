use super::attributes::*;
use super::vertex::VertexRef;
use crate::math::*;

/// Shape-independent view shared by indexed and billboard meshes.
pub trait VertexData {
    fn attributes(&self) -> Attributes;
    fn vertices(&self) -> &[f32];
    fn bounding_box(&self) -> &AABB;
    fn bounding_sphere(&self) -> &Sphere;

    fn stride(&self) -> usize {
        stride(self.attributes())
    }

    fn num_vertices(&self) -> usize {
        match self.stride() {
            0 => 0,
            stride => self.vertices().len() / stride,
        }
    }

    fn vertex(&self, index: usize) -> VertexRef<'_> {
        VertexRef::at(self.attributes(), self.vertices(), index)
    }

    fn iter_vertices(&self) -> impl Iterator<Item = VertexRef<'_>> {
        (0..self.num_vertices()).map(|i| self.vertex(i))
    }
}
