use super::attributes::*;
use crate::math::Vec3;
use arrayvec::ArrayVec;
use std::hash::{Hash, Hasher};

/// Read access to one vertex record of `stride(attributes)` floats.
pub trait Vertex {
    fn attributes(&self) -> Attributes;

    /// All floats of the vertex, exactly `stride(attributes)` long.
    fn data(&self) -> &[f32];

    /// Floats of a single attribute. Panics if the attribute is absent.
    fn get(&self, attr: Attributes) -> &[f32] {
        let attributes = self.attributes();
        assert!(attributes.contains(attr), "vertex {:?} has no attribute {:?}", attributes, attr);
        let offset = element_offset(attributes, attr);
        &self.data()[offset..offset + element_count(attr)]
    }

    fn position(&self) -> Vec3 {
        Vec3::from_slice(self.get(Attributes::POSITION))
    }

    /// Copies every attribute present in both vertices; attributes only `out` has stay untouched.
    fn copy_attributes_to<V: VertexMut + ?Sized>(&self, out: &mut V) {
        let common = self.attributes() & out.attributes();
        for attr in common.singles() {
            out.get_mut(attr).copy_from_slice(self.get(attr));
        }
    }

    /// Same attributes and bit-identical data. NaN and -0.0 are distinct values here.
    fn bit_equals<V: Vertex + ?Sized>(&self, other: &V) -> bool {
        self.attributes() == other.attributes()
            && self.data().len() == other.data().len()
            && self.data().iter().zip(other.data()).all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

pub trait VertexMut: Vertex {
    fn data_mut(&mut self) -> &mut [f32];

    fn get_mut(&mut self, attr: Attributes) -> &mut [f32] {
        let attributes = self.attributes();
        assert!(attributes.contains(attr), "vertex {:?} has no attribute {:?}", attributes, attr);
        let offset = element_offset(attributes, attr);
        &mut self.data_mut()[offset..offset + element_count(attr)]
    }

    /// Panics if the attribute is absent or `values` is shorter than the attribute.
    fn set(&mut self, attr: Attributes, values: &[f32]) {
        let count = element_count(attr);
        assert!(values.len() >= count, "attribute {:?} needs {} values, got {}", attr, count, values.len());
        self.get_mut(attr).copy_from_slice(&values[..count]);
    }
}

/// Borrowed window into a vertex buffer.
#[derive(Debug, Clone, Copy)]
pub struct VertexRef<'a> {
    attributes: Attributes,
    data: &'a [f32],
}

impl<'a> VertexRef<'a> {
    pub fn new(attributes: Attributes, data: &'a [f32]) -> Self {
        Self { attributes, data: &data[..stride(attributes)] }
    }

    /// The `index`-th vertex of an interleaved buffer.
    pub fn at(attributes: Attributes, vertices: &'a [f32], index: usize) -> Self {
        let stride = stride(attributes);
        Self { attributes, data: &vertices[index * stride..(index + 1) * stride] }
    }

    pub fn as_slice(&self) -> &'a [f32] {
        self.data
    }
}

impl Vertex for VertexRef<'_> {
    fn attributes(&self) -> Attributes {
        self.attributes
    }

    fn data(&self) -> &[f32] {
        self.data
    }
}

impl PartialEq for VertexRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.bit_equals(other)
    }
}

impl Eq for VertexRef<'_> {}

impl Hash for VertexRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.attributes.hash(state);
        for v in self.data {
            v.to_bits().hash(state);
        }
    }
}

/// Mutable window into a vertex buffer.
#[derive(Debug)]
pub struct VertexRefMut<'a> {
    attributes: Attributes,
    data: &'a mut [f32],
}

impl<'a> VertexRefMut<'a> {
    pub fn new(attributes: Attributes, data: &'a mut [f32]) -> Self {
        let stride = stride(attributes);
        Self { attributes, data: &mut data[..stride] }
    }
}

impl Vertex for VertexRefMut<'_> {
    fn attributes(&self) -> Attributes {
        self.attributes
    }

    fn data(&self) -> &[f32] {
        self.data
    }
}

impl VertexMut for VertexRefMut<'_> {
    fn data_mut(&mut self) -> &mut [f32] {
        self.data
    }
}

/// Vertex that owns its data. Stored inline, so creating one never allocates.
#[derive(Debug, Clone)]
pub struct OwnedVertex {
    attributes: Attributes,
    data: ArrayVec<f32, MAX_STRIDE>,
}

impl OwnedVertex {
    /// Zero-initialized vertex.
    pub fn new(attributes: Attributes) -> Self {
        let mut data = ArrayVec::new();
        for _ in 0..stride(attributes) {
            data.push(0.0);
        }
        Self { attributes, data }
    }

    /// Copies the first `stride(attributes)` floats of `values`.
    pub fn from_slice(attributes: Attributes, values: &[f32]) -> Self {
        let mut data = ArrayVec::new();
        data.extend(values[..stride(attributes)].iter().copied());
        Self { attributes, data }
    }

    pub fn from_vertex<V: Vertex + ?Sized>(vertex: &V) -> Self {
        Self::from_slice(vertex.attributes(), vertex.data())
    }
}

impl Vertex for OwnedVertex {
    fn attributes(&self) -> Attributes {
        self.attributes
    }

    fn data(&self) -> &[f32] {
        &self.data
    }
}

impl VertexMut for OwnedVertex {
    fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }
}

impl PartialEq for OwnedVertex {
    fn eq(&self, other: &Self) -> bool {
        self.bit_equals(other)
    }
}

impl Eq for OwnedVertex {}
