use super::attributes::Attributes;
use super::vertex::{Vertex, VertexRef};
use crate::math::*;

/// Three vertices of one triangle. During multi-vertex generation, vertex 0 is
/// the vertex being generated.
#[derive(Debug, Clone, Copy)]
pub struct Triangle<'a> {
    pub vertices: [VertexRef<'a>; 3],
}

impl<'a> Triangle<'a> {
    pub fn new(v0: VertexRef<'a>, v1: VertexRef<'a>, v2: VertexRef<'a>) -> Self {
        Self { vertices: [v0, v1, v2] }
    }

    pub fn attributes(&self) -> Attributes {
        self.vertices[0].attributes()
    }

    /// Normalized face normal following the winding order. Requires Position.
    pub fn flat_normal(&self) -> Vec3 {
        let p0 = self.vertices[0].position();
        let p1 = self.vertices[1].position();
        let p2 = self.vertices[2].position();
        cross(p1 - p0, p2 - p0).normalized()
    }
}

/// Positions of the three index slots of a triangle inside the index buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexTriangle {
    pub slots: [usize; 3],
}

impl IndexTriangle {
    /// Slots of the `n`-th triangle of a triangle list.
    pub fn nth(n: usize) -> Self {
        let base = n * 3;
        Self { slots: [base, base + 1, base + 2] }
    }

    // [a, b, c] -> [b, c, a]
    pub fn rotate_left(&mut self) {
        self.slots.rotate_left(1);
    }

    // [a, b, c] -> [c, a, b]
    pub fn rotate_right(&mut self) {
        self.slots.rotate_right(1);
    }

    /// Rotates so that the slot at `corner` comes first. Winding is preserved.
    pub fn rotated(self, corner: usize) -> Self {
        let mut res = self;
        res.slots.rotate_left(corner % 3);
        res
    }
}
