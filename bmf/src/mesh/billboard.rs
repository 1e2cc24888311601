use super::attributes::*;
use super::vertex_data::VertexData;
use crate::math::*;

/// Non-indexed mesh, one vertex per billboard / point sprite. Extents are
/// usually carried in the Width, Height and Depth attributes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BillboardMesh {
    pub(crate) attributes: Attributes,
    pub(crate) vertices: Vec<f32>,
    pub(crate) bbox: AABB,
    pub(crate) sphere: Sphere,
}

impl BillboardMesh {
    pub fn new(attributes: Attributes, vertices: Vec<f32>) -> Self {
        Self { attributes, vertices, bbox: AABB::default(), sphere: Sphere::default() }
    }

    pub fn vertices_mut(&mut self) -> &mut Vec<f32> {
        &mut self.vertices
    }
}

impl VertexData for BillboardMesh {
    fn attributes(&self) -> Attributes {
        self.attributes
    }

    fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    fn bounding_box(&self) -> &AABB {
        &self.bbox
    }

    fn bounding_sphere(&self) -> &Sphere {
        &self.sphere
    }
}
