use super::attributes::*;
use super::index::{IndexType, convert_index};
use super::shape::Shape;
use super::vertex_data::VertexData;
use crate::math::*;
use crate::{Error, Result};

/// Indexed triangle mesh made of one or more shapes.
///
/// Vertices are interleaved with the layout given by `attributes`. Every shape
/// owns a contiguous vertex range and a contiguous index range; its indices
/// are relative to its own vertex range.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BinaryMesh<I: IndexType> {
    pub(crate) attributes: Attributes,
    pub(crate) vertices: Vec<f32>,
    pub(crate) indices: Vec<I>,
    pub(crate) shapes: Vec<Shape>,
    pub(crate) bbox: AABB,
    pub(crate) sphere: Sphere,
}

pub type BinaryMesh16 = BinaryMesh<u16>;
pub type BinaryMesh32 = BinaryMesh<u32>;

impl<I: IndexType> BinaryMesh<I> {
    /// Takes the buffers as they are. Bounding volumes start out at their
    /// defaults, call `generate_bounding_volumes` to fill them in.
    pub fn new(attributes: Attributes, vertices: Vec<f32>, indices: Vec<I>, shapes: Vec<Shape>) -> Self {
        Self { attributes, vertices, indices, shapes, bbox: AABB::default(), sphere: Sphere::default() }
    }

    pub fn indices(&self) -> &[I] {
        &self.indices
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn vertices_mut(&mut self) -> &mut Vec<f32> {
        &mut self.vertices
    }

    pub fn indices_mut(&mut self) -> &mut Vec<I> {
        &mut self.indices
    }

    pub fn shapes_mut(&mut self) -> &mut Vec<Shape> {
        &mut self.shapes
    }

    pub fn bounding_box_mut(&mut self) -> &mut AABB {
        &mut self.bbox
    }

    pub fn bounding_sphere_mut(&mut self) -> &mut Sphere {
        &mut self.sphere
    }

    pub fn num_indices(&self) -> usize {
        self.indices.len()
    }

    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Indices with each shape's vertex offset added, i.e. addressing the whole vertex buffer.
    /// Sums beyond `u32::MAX` saturate; shapes outside the index buffer contribute nothing.
    pub fn summed_indices(&self) -> Vec<u32> {
        let mut res = Vec::with_capacity(self.indices.len());
        for s in &self.shapes {
            let indices = self.indices.get(s.index_range()).unwrap_or_default();
            res.extend(indices.iter().map(|i| i.to_u32().saturating_add(s.vertex_offset)));
        }
        res
    }

    /// Material id of every triangle, in shape order.
    pub fn material_id_per_triangle(&self) -> Vec<u32> {
        let mut res = Vec::with_capacity(self.num_triangles());
        for s in &self.shapes {
            res.extend(std::iter::repeat_n(s.material_id, s.num_triangles() as usize));
        }
        res
    }

    /// Same mesh with a different index type. Fails if an index does not fit.
    pub fn with_index_type<J: IndexType>(self) -> Result<BinaryMesh<J>> {
        let indices = self.indices.iter().map(|i| convert_index::<J>(i.to_u32())).collect::<Result<Vec<J>>>()?;
        Ok(BinaryMesh {
            attributes: self.attributes,
            vertices: self.vertices,
            indices,
            shapes: self.shapes,
            bbox: self.bbox,
            sphere: self.sphere,
        })
    }

    pub(crate) fn expect_single_shape(&self, operation: &'static str) -> Result<()> {
        if self.shapes.len() != 1 {
            return Err(Error::ExpectedSingleShape { operation, count: self.shapes.len() });
        }
        Ok(())
    }

    /// Every index must address an existing vertex.
    pub(crate) fn expect_indices_in_range(&self) -> Result<()> {
        let vertex_count = self.num_vertices();
        match self.indices.iter().find(|i| i.to_usize() >= vertex_count) {
            Some(i) => Err(Error::IndexOutOfRange { index: i.to_u32(), vertex_count }),
            None => Ok(()),
        }
    }
}

impl BinaryMesh32 {
    pub fn try_into_16(self) -> Result<BinaryMesh16> {
        self.with_index_type()
    }
}

impl BinaryMesh16 {
    pub fn into_32(self) -> BinaryMesh32 {
        BinaryMesh32 {
            attributes: self.attributes,
            vertices: self.vertices,
            indices: self.indices.into_iter().map(u32::from).collect(),
            shapes: self.shapes,
            bbox: self.bbox,
            sphere: self.sphere,
        }
    }
}

impl<I: IndexType> VertexData for BinaryMesh<I> {
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
