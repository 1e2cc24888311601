use super::attributes::*;
use super::billboard::BillboardMesh;
use super::binary_mesh::BinaryMesh;
use super::generator::*;
use super::index::{IndexType, convert_index};
use super::triangle::{IndexTriangle, Triangle};
use super::vertex::*;
use super::vertex_data::VertexData;
use crate::{Error, Result};
use log::debug;

// Rebuilds every vertex with the layout `to`, keeping the attributes both layouts share.
fn relayout(from: Attributes, to: Attributes, vertices: &[f32], mut fill: impl FnMut(&mut VertexRefMut<'_>)) -> Vec<f32> {
    let old_stride = stride(from);
    let new_stride = stride(to);
    let count = if old_stride == 0 { 0 } else { vertices.len() / old_stride };

    let mut res = vec![0.0; count * new_stride];
    for i in 0..count {
        let src = VertexRef::at(from, vertices, i);
        let mut dst = VertexRefMut::new(to, &mut res[i * new_stride..]);
        src.copy_attributes_to(&mut dst);
        fill(&mut dst);
    }
    res
}

fn narrow(from: Attributes, to: Attributes, vertices: &[f32]) -> Vec<f32> {
    debug!("removing attributes {:?}", from - to);
    relayout(from, to, vertices, |_| {})
}

fn use_single_vertex_generator(
    generator: &dyn SingleVertexGenerator,
    attributes: Attributes,
    vertices: &[f32],
) -> (Attributes, Vec<f32>) {
    let out = generator.output_attributes(attributes);
    debug!("generating {:?} per vertex", out - attributes);
    (out, relayout(attributes, out, vertices, |v| generator.generate(v)))
}

/// Triangles around each vertex, in triangle order. A triangle is listed once
/// per distinct vertex it references.
struct Adjacency {
    offsets: Vec<usize>,
    triangles: Vec<usize>,
}

impl Adjacency {
    fn new(indices: &[u32], num_vertices: usize) -> Self {
        let distinct = |t: &[u32]| {
            let mut res = [Some(t[0]), None, None];
            if t[1] != t[0] {
                res[1] = Some(t[1]);
            }
            if t[2] != t[0] && t[2] != t[1] {
                res[2] = Some(t[2]);
            }
            res.into_iter().flatten()
        };

        let mut offsets = vec![0usize; num_vertices + 1];
        for t in indices.chunks_exact(3) {
            for v in distinct(t) {
                offsets[v as usize + 1] += 1;
            }
        }
        for i in 0..num_vertices {
            offsets[i + 1] += offsets[i];
        }

        let mut cursor = offsets.clone();
        let mut triangles = vec![0usize; offsets[num_vertices]];
        for (n, t) in indices.chunks_exact(3).enumerate() {
            for v in distinct(t) {
                triangles[cursor[v as usize]] = n;
                cursor[v as usize] += 1;
            }
        }

        Self { offsets, triangles }
    }

    fn triangles_of(&self, vertex: usize) -> &[usize] {
        &self.triangles[self.offsets[vertex]..self.offsets[vertex + 1]]
    }
}

struct Generated {
    vertices: Vec<f32>,
    indices: Vec<u32>,
    num_vertices: usize,
}

fn run_multi_vertex_generator(
    generator: &dyn MultiVertexGenerator,
    attributes: Attributes,
    vertices: &[f32],
    indices: &[u32],
    num_vertices: usize,
) -> Result<Generated> {
    let out_attributes = generator.output_attributes(attributes);
    let adjacency = Adjacency::new(indices, num_vertices);

    let mut res = Generated {
        vertices: Vec::with_capacity(stride(out_attributes) * num_vertices),
        indices: indices.to_vec(),
        num_vertices: 0,
    };

    let mut index_triangles: Vec<IndexTriangle> = Vec::with_capacity(16);
    let mut triangles: Vec<Triangle<'_>> = Vec::with_capacity(16);
    let mut out_vertices: Vec<OwnedVertex> = Vec::with_capacity(16);
    let mut out_indices: Vec<u32> = Vec::with_capacity(16);

    for v in 0..num_vertices {
        index_triangles.clear();
        triangles.clear();
        out_vertices.clear();
        out_indices.clear();

        let vertex = v as u32;
        for &n in adjacency.triangles_of(v) {
            let tri = IndexTriangle::nth(n);
            let [_, b, c] = tri.slots;
            let corner = if indices[c] == vertex {
                2
            } else if indices[b] == vertex {
                1
            } else {
                0
            };
            let rotated = tri.rotated(corner);
            let vertex_at = |k: usize| VertexRef::at(attributes, vertices, indices[rotated.slots[k]] as usize);
            triangles.push(Triangle::new(vertex_at(0), vertex_at(1), vertex_at(2)));
            index_triangles.push(rotated);
        }

        // not referenced by any triangle
        if triangles.is_empty() {
            continue;
        }

        generator.generate(&triangles, &mut out_vertices, &mut out_indices);

        if out_vertices.is_empty() {
            return Err(Error::InvalidGeneratorOutput("no vertex generated"));
        }
        if out_vertices.iter().any(|o| o.attributes() != out_attributes) {
            return Err(Error::InvalidGeneratorOutput("generated vertex has unexpected attributes"));
        }
        if out_vertices.len() > 1 {
            if out_indices.len() != triangles.len() {
                return Err(Error::InvalidGeneratorOutput("expected one index per triangle"));
            }
            if out_indices.iter().any(|&i| i as usize >= out_vertices.len()) {
                return Err(Error::InvalidGeneratorOutput("index does not address a generated vertex"));
            }
        }

        let start = res.num_vertices as u32;
        for o in &out_vertices {
            res.vertices.extend_from_slice(o.data());
        }
        res.num_vertices += out_vertices.len();

        for (i, tri) in index_triangles.iter().enumerate() {
            let value = if out_vertices.len() == 1 { start } else { start + out_indices[i] };
            for &slot in &tri.slots {
                if indices[slot] == vertex {
                    res.indices[slot] = value;
                }
            }
        }
    }

    Ok(res)
}

impl<I: IndexType> BinaryMesh<I> {
    /// Converts the vertex layout to `target`. Attributes that are dropped are
    /// removed, missing ones are produced by the first generator in
    /// `generators` that brings the mesh closer to `target`, until `target` is
    /// reached. Multi-vertex generators require a single shape.
    pub fn change_attributes(&mut self, target: Attributes, generators: &[Generator]) -> Result<()> {
        let had_position = self.attributes.contains(Attributes::POSITION);
        let mut topology_changed = false;

        while self.attributes != target {
            if self.attributes.contains(target) {
                self.vertices = narrow(self.attributes, target, &self.vertices);
                self.attributes = target;
                continue;
            }

            match select_generator(generators, self.attributes, target, true)? {
                Generator::Single(generator) => {
                    (self.attributes, self.vertices) =
                        use_single_vertex_generator(generator.as_ref(), self.attributes, &self.vertices);
                }
                Generator::Multi(generator) => {
                    self.use_multi_vertex_generator(generator.as_ref())?;
                    topology_changed = true;
                }
            }
        }

        if self.attributes.contains(Attributes::POSITION) && (topology_changed || !had_position) {
            self.generate_bounding_volumes()?;
        }
        Ok(())
    }

    fn use_multi_vertex_generator(&mut self, generator: &dyn MultiVertexGenerator) -> Result<()> {
        self.expect_single_shape("change_attributes")?;
        self.expect_indices_in_range()?;

        let out_attributes = generator.output_attributes(self.attributes);
        let indices: Vec<u32> = self.indices.iter().map(|i| i.to_u32()).collect();
        let generated =
            run_multi_vertex_generator(generator, self.attributes, &self.vertices, &indices, self.num_vertices())?;

        debug!(
            "generated {:?} from triangles: {} -> {} vertices",
            out_attributes - self.attributes,
            self.num_vertices(),
            generated.num_vertices
        );

        self.indices = generated.indices.into_iter().map(convert_index::<I>).collect::<Result<Vec<I>>>()?;
        self.vertices = generated.vertices;
        self.attributes = out_attributes;
        // index ranges stay, only index values changed
        self.shapes[0].vertex_count = generated.num_vertices as u32;
        Ok(())
    }
}

impl BillboardMesh {
    /// Like `BinaryMesh::change_attributes`, without topology there is no
    /// use for multi-vertex generators; only single-vertex ones are considered.
    pub fn change_attributes(&mut self, target: Attributes, generators: &[Generator]) -> Result<()> {
        let had_position = self.attributes.contains(Attributes::POSITION);

        while self.attributes != target {
            if self.attributes.contains(target) {
                self.vertices = narrow(self.attributes, target, &self.vertices);
                self.attributes = target;
                continue;
            }

            let Generator::Single(generator) = select_generator(generators, self.attributes, target, false)? else {
                return Err(Error::NoMatchingGenerator { from: self.attributes, to: target });
            };
            (self.attributes, self.vertices) =
                use_single_vertex_generator(generator.as_ref(), self.attributes, &self.vertices);
        }

        if self.attributes.contains(Attributes::POSITION) && !had_position {
            self.generate_bounding_volumes()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacency_lists_each_triangle_once_per_vertex() {
        // second triangle is degenerate
        let indices = [0, 1, 2, 2, 2, 3];
        let adjacency = Adjacency::new(&indices, 5);
        assert_eq!(adjacency.triangles_of(0), &[0]);
        assert_eq!(adjacency.triangles_of(2), &[0, 1]);
        assert_eq!(adjacency.triangles_of(3), &[1]);
        assert!(adjacency.triangles_of(4).is_empty());
    }

    #[test]
    fn relayout_keeps_common_attributes() {
        let from = Attributes::POSITION | Attributes::TEXCOORD0;
        let to = Attributes::TEXCOORD0 | Attributes::COLOR;
        let vertices = [1.0, 2.0, 3.0, 0.5, 0.25, 4.0, 5.0, 6.0, 0.75, 1.0];

        let res = relayout(from, to, &vertices, |v| v.set(Attributes::COLOR, &[1.0; 4]));
        assert_eq!(res, [0.5, 0.25, 1.0, 1.0, 1.0, 1.0, 0.75, 1.0, 1.0, 1.0, 1.0, 1.0]);
    }
}
