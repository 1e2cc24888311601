use super::attributes::*;
use super::billboard::BillboardMesh;
use super::binary_mesh::BinaryMesh;
use super::index::IndexType;
use super::shape::Shape;
use super::vertex::{Vertex, VertexRef};
use crate::math::*;
use crate::{Error, Result};
use rayon::prelude::*;

// Largest billboard extent of a vertex, 0 without billboard attributes.
fn billboard_radius(vertex: &VertexRef<'_>) -> f32 {
    (vertex.attributes() & Attributes::BILLBOARD)
        .singles()
        .fold(0.0f32, |radius, attr| radius.max(vertex.get(attr)[0]))
}

fn expect_position(attributes: Attributes) -> Result<()> {
    if !attributes.contains(Attributes::POSITION) {
        return Err(Error::MissingPosition);
    }
    Ok(())
}

fn vertex_refs(attributes: Attributes, vertices: &[f32]) -> impl Iterator<Item = VertexRef<'_>> {
    let stride = stride(attributes).max(1);
    vertices.chunks_exact(stride).map(move |data| VertexRef::new(attributes, data))
}

fn finite_position(n: usize, vertex: &VertexRef<'_>) -> Result<Vec3> {
    let p = vertex.position();
    if !p.is_finite() {
        return Err(Error::NonFinitePosition { vertex: n });
    }
    Ok(p)
}

/// Bounding box of the positions, grown by the billboard extent of each vertex.
/// Fails on a non-finite position.
pub fn bounding_box(attributes: Attributes, vertices: &[f32]) -> Result<AABB> {
    expect_position(attributes)?;

    let mut bbox = AABB::empty();
    for (n, v) in vertex_refs(attributes, vertices).enumerate() {
        bbox.include_sphere(finite_position(n, &v)?, billboard_radius(&v));
    }
    Ok(bbox)
}

/// Approximate bounding sphere of the positions, grown by the largest billboard extent.
pub fn bounding_sphere(attributes: Attributes, vertices: &[f32]) -> Result<Sphere> {
    expect_position(attributes)?;

    let mut positions = Vec::with_capacity(vertices.len() / stride(attributes));
    let mut max_radius = 0.0f32;
    for (n, v) in vertex_refs(attributes, vertices).enumerate() {
        positions.push(finite_position(n, &v)?);
        max_radius = max_radius.max(billboard_radius(&v));
    }

    if positions.len() < 2 {
        return Ok(Sphere::min());
    }

    let mut sphere = Sphere::from_points(&positions);
    sphere.radius += max_radius;
    Ok(sphere)
}

fn shape_volumes(attributes: Attributes, vertices: &[f32], shape: &Shape) -> Result<(AABB, Sphere)> {
    let stride = stride(attributes);
    let range = shape.vertex_range();
    let data = vertices
        .get(range.start * stride..range.end * stride)
        .ok_or(Error::Verify { reason: "shape index out of range", shape: None })?;
    Ok((bounding_box(attributes, data)?, bounding_sphere(attributes, data)?))
}

impl<I: IndexType> BinaryMesh<I> {
    /// Volumes of the vertex range of one shape, as `verify` expects them.
    pub fn shape_bounding_volumes(&self, shape: &Shape) -> Result<(AABB, Sphere)> {
        shape_volumes(self.attributes, &self.vertices, shape)
    }

    /// Recomputes the volumes of every shape, the global box as their union
    /// and the global sphere from all vertices.
    pub fn generate_bounding_volumes(&mut self) -> Result<()> {
        expect_position(self.attributes)?;

        let attributes = self.attributes;
        let vertices = &self.vertices;
        self.shapes.par_iter_mut().try_for_each(|s| {
            (s.bbox, s.sphere) = shape_volumes(attributes, vertices, s)?;
            Ok::<(), Error>(())
        })?;

        self.bbox = self.shapes.iter().fold(AABB::empty(), |bbox, s| bbox.union_with(&s.bbox));
        self.sphere = bounding_sphere(self.attributes, &self.vertices)?;
        Ok(())
    }
}

impl BillboardMesh {
    pub fn generate_bounding_volumes(&mut self) -> Result<()> {
        self.bbox = bounding_box(self.attributes, &self.vertices)?;
        self.sphere = bounding_sphere(self.attributes, &self.vertices)?;
        Ok(())
    }
}
