use super::attributes::*;
use super::binary_mesh::BinaryMesh;
use super::bounds::bounding_sphere;
use super::index::IndexType;
use super::shape::Shape;
use super::vertex_data::VertexData;
use crate::math::*;
use crate::{Error, Result};
use rayon::prelude::*;

impl<I: IndexType> BinaryMesh<I> {
    /// One single-shape mesh per shape. Offsets are rebased to zero and the
    /// shape's volumes become the volumes of the new mesh.
    pub fn split_shapes(&self) -> Result<Vec<BinaryMesh<I>>> {
        let stride = self.stride();
        self.shapes
            .par_iter()
            .enumerate()
            .map(|(n, s)| {
                let out_of_range = |reason| Error::Verify { reason, shape: Some(n) };
                let indices = self.indices.get(s.index_range()).ok_or(out_of_range("shape index count out of range"))?;
                let range = s.vertex_range();
                let vertices = self
                    .vertices
                    .get(range.start * stride..range.end * stride)
                    .ok_or(out_of_range("shape index out of range"))?;

                Ok(BinaryMesh {
                    attributes: self.attributes,
                    vertices: vertices.to_vec(),
                    indices: indices.to_vec(),
                    shapes: vec![Shape { index_offset: 0, vertex_offset: 0, ..*s }],
                    bbox: s.bbox,
                    sphere: s.sphere,
                })
            })
            .collect()
    }

    /// Concatenates meshes with identical attributes. Shape offsets are shifted
    /// by what precedes them; index values stay local to their shape. The box
    /// is the union of all shape boxes, the sphere is computed from scratch.
    pub fn merge_shapes(meshes: &[BinaryMesh<I>]) -> Result<BinaryMesh<I>> {
        let Some(first) = meshes.first() else {
            return Ok(BinaryMesh::default());
        };
        let attributes = first.attributes;

        let mut num_floats = 0;
        let mut num_indices = 0;
        let mut num_shapes = 0;
        for m in meshes {
            if m.attributes != attributes {
                return Err(Error::AttributeMismatch { expected: attributes, found: m.attributes });
            }
            num_floats += m.vertices.len();
            num_indices += m.indices.len();
            num_shapes += m.shapes.len();
        }

        let mut res = BinaryMesh {
            attributes,
            vertices: Vec::with_capacity(num_floats),
            indices: Vec::with_capacity(num_indices),
            shapes: Vec::with_capacity(num_shapes),
            bbox: AABB::empty(),
            sphere: Sphere::default(),
        };

        for m in meshes {
            let vertex_offset = res.num_vertices() as u32;
            let index_offset = res.indices.len() as u32;

            res.vertices.extend_from_slice(&m.vertices);
            res.indices.extend_from_slice(&m.indices);
            for s in &m.shapes {
                res.bbox = res.bbox.union_with(&s.bbox);
                res.shapes.push(Shape {
                    index_offset: s.index_offset + index_offset,
                    vertex_offset: s.vertex_offset + vertex_offset,
                    ..*s
                });
            }
        }

        if attributes.contains(Attributes::POSITION) {
            res.sphere = bounding_sphere(attributes, &res.vertices)?;
        }
        Ok(res)
    }
}
