use crate::math::*;
use crate::mesh::*;

/// Smooth normals: the average of the face normals around each vertex.
#[derive(Debug, Clone, Copy, Default)]
pub struct InterpolatedNormalGenerator;

impl InterpolatedNormalGenerator {
    pub fn interpolated_normal(triangles: &[Triangle<'_>]) -> Vec3 {
        let mut sum = Vec3::ZERO;
        for tri in triangles {
            sum += tri.flat_normal();
        }
        (sum / triangles.len() as f32).normalized()
    }
}

impl VertexGenerator for InterpolatedNormalGenerator {
    fn required_attributes(&self) -> Attributes {
        Attributes::POSITION
    }

    fn output_attributes(&self, input: Attributes) -> Attributes {
        input | Attributes::NORMAL
    }
}

impl MultiVertexGenerator for InterpolatedNormalGenerator {
    fn generate(&self, triangles: &[Triangle<'_>], out_vertices: &mut Vec<OwnedVertex>, _out_indices: &mut Vec<u32>) {
        let Some(first) = triangles.first() else {
            return;
        };
        let source = &first.vertices[0];

        let mut vertex = OwnedVertex::new(self.output_attributes(source.attributes()));
        source.copy_attributes_to(&mut vertex);
        vertex.set(Attributes::NORMAL, &Self::interpolated_normal(triangles).to_array());

        out_vertices.push(vertex);
    }
}
