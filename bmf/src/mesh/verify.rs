use super::attributes::*;
use super::billboard::BillboardMesh;
use super::binary_mesh::BinaryMesh;
use super::bounds::*;
use super::index::IndexType;
use super::vertex_data::VertexData;
use crate::math::*;
use crate::{Error, Result};

// Checks shared by both mesh flavors.
fn verify_layout(attributes: Attributes, vertices: &[f32]) -> Result<()> {
    if attributes.is_empty() {
        return Err(Error::verify("no attributes provided"));
    }
    if !attributes.is_valid() {
        return Err(Error::verify("non existent attribute flags were set"));
    }
    if vertices.len() % stride(attributes) != 0 {
        return Err(Error::verify("vertices are not a multiple of the underlying attribute element stride"));
    }
    Ok(())
}

impl<I: IndexType> BinaryMesh<I> {
    /// Checks every structural invariant and reports the first violation.
    pub fn verify(&self) -> Result<()> {
        if self.attributes.is_empty() {
            return Err(Error::verify("no attributes provided"));
        }
        if self.indices.len() % 3 != 0 {
            return Err(Error::verify("indices are not a multiple of 3"));
        }
        verify_layout(self.attributes, &self.vertices)?;

        let has_position = self.attributes.contains(Attributes::POSITION);
        let num_indices = self.indices.len();
        let num_vertices = self.num_vertices();
        let mut vertex_offset = 0usize;
        let mut global_bbox = AABB::empty();

        for (n, s) in self.shapes.iter().enumerate() {
            let fail = |reason| Err(Error::Verify { reason, shape: Some(n) });
            let index_offset = s.index_offset as usize;
            let index_count = s.index_count as usize;

            if s.vertex_offset as usize != vertex_offset {
                return fail("shape vertex offset is not tightly packed");
            }
            if index_offset % 3 != 0 {
                return fail("shape index offset is not a multiple of 3");
            }
            if index_offset >= num_indices {
                return fail("shape index offset out of range");
            }
            if index_count % 3 != 0 {
                return fail("shape index count is not a multiple of 3");
            }
            if index_offset + index_count > num_indices {
                return fail("shape index count out of range");
            }
            if index_count == 0 {
                return fail("shape zero index count");
            }
            if s.vertex_count == 0 {
                return fail("shape zero vertex count");
            }

            let max_index = self.indices[s.index_range()].iter().map(|i| i.to_u32()).max().unwrap_or(0);
            if s.vertex_count != max_index + 1 {
                return fail("shape invalid vertex count");
            }

            vertex_offset += max_index as usize + 1;
            if vertex_offset > num_vertices {
                return fail("shape index out of range");
            }

            if has_position {
                let (bbox, sphere) = self.shape_bounding_volumes(s)?;
                if s.bbox != bbox {
                    return fail("shape bounding box not correct");
                }
                if s.sphere != sphere {
                    return fail("shape bounding sphere not correct");
                }
                global_bbox = global_bbox.union_with(&s.bbox);
            }
        }

        if self.shapes.is_empty() {
            return Err(Error::verify("no shapes"));
        }
        if self.vertices.is_empty() {
            return Err(Error::verify("no vertices"));
        }
        if self.indices.is_empty() {
            return Err(Error::verify("no indices"));
        }

        if has_position {
            if self.bbox != global_bbox {
                return Err(Error::verify("global bounding box not correct"));
            }
            if self.sphere != bounding_sphere(self.attributes, &self.vertices)? {
                return Err(Error::verify("global bounding sphere not correct"));
            }
        }
        Ok(())
    }
}

impl BillboardMesh {
    pub fn verify(&self) -> Result<()> {
        verify_layout(self.attributes, &self.vertices)?;

        if self.vertices.is_empty() {
            return Err(Error::verify("no vertices"));
        }

        if self.attributes.contains(Attributes::POSITION) {
            if self.bbox != bounding_box(self.attributes, &self.vertices)? {
                return Err(Error::verify("global bounding box not correct"));
            }
            if self.sphere != bounding_sphere(self.attributes, &self.vertices)? {
                return Err(Error::verify("global bounding sphere not correct"));
            }
        }
        Ok(())
    }
}
