use crate::math::*;
use crate::mesh::*;

/// Maximum L1 distance between two normals that still share a vertex.
pub const NORMAL_EQUAL_EPSILON: f32 = 0.0001;

/// Splits vertices so that every face gets its own normal. Faces with
/// (almost) the same normal keep sharing a vertex.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatNormalGenerator;

impl VertexGenerator for FlatNormalGenerator {
    fn required_attributes(&self) -> Attributes {
        Attributes::POSITION
    }

    fn output_attributes(&self, input: Attributes) -> Attributes {
        input | Attributes::NORMAL
    }
}

impl MultiVertexGenerator for FlatNormalGenerator {
    fn generate(&self, triangles: &[Triangle<'_>], out_vertices: &mut Vec<OwnedVertex>, out_indices: &mut Vec<u32>) {
        for tri in triangles {
            let n = tri.flat_normal();

            let existing = out_vertices.iter().position(|v| {
                let diff = (n - Vec3::from_slice(v.get(Attributes::NORMAL))).abs();
                diff.x + diff.y + diff.z <= NORMAL_EQUAL_EPSILON
            });

            match existing {
                Some(index) => out_indices.push(index as u32),
                None => {
                    let source = &tri.vertices[0];
                    let mut vertex = OwnedVertex::new(self.output_attributes(source.attributes()));
                    source.copy_attributes_to(&mut vertex);
                    vertex.set(Attributes::NORMAL, &n.to_array());

                    out_indices.push(out_vertices.len() as u32);
                    out_vertices.push(vertex);
                }
            }
        }
    }
}
