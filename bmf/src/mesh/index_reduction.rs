use super::attributes::Attributes;
use super::binary_mesh::*;
use super::index::convert_index;
use super::shape::Shape;
use super::vertex_data::VertexData;
use crate::{Error, Result};
use log::debug;

const MAX_16_BIT_VERTICES: usize = 1 << 16;

struct Partition {
    fitting: Vec<u32>,
    rest: Vec<u32>,
    max_fitting: u32,
}

// Stable split into triangles addressable with 16 bits and the others.
fn partition_triangles(indices: &[u32]) -> Partition {
    let mut res = Partition { fitting: Vec::new(), rest: Vec::new(), max_fitting: 0 };
    for tri in indices.chunks_exact(3) {
        if tri.iter().all(|&i| (i as usize) < MAX_16_BIT_VERTICES) {
            res.fitting.extend_from_slice(tri);
            res.max_fitting = tri.iter().fold(res.max_fitting, |max, &i| max.max(i));
        } else {
            res.rest.extend_from_slice(tri);
        }
    }
    res
}

impl BinaryMesh32 {
    /// Splits the mesh into meshes with 16-bit indices. Each output mesh has a
    /// single shape; vertex values are kept, only redistributed and renumbered.
    pub fn force_16_bit_indices(self) -> Result<Vec<BinaryMesh16>> {
        self.expect_single_shape("force_16_bit_indices")?;
        self.expect_indices_in_range()?;

        let has_position = self.attributes.contains(Attributes::POSITION);
        let mut remaining = self;
        let mut chunks = Vec::new();

        while !remaining.vertices.is_empty() {
            if remaining.num_vertices() <= MAX_16_BIT_VERTICES {
                let mut chunk = remaining.with_index_type::<u16>()?;
                if has_position {
                    chunk.generate_bounding_volumes()?;
                }
                debug!("16-bit chunk {}: {} vertices, rest of the mesh", chunks.len(), chunk.num_vertices());
                chunks.push(chunk);
                break;
            }

            if remaining.indices.is_empty() {
                break;
            }

            let Partition { fitting, rest, max_fitting } = partition_triangles(&remaining.indices);
            if fitting.is_empty() {
                return Err(Error::IndexPartition);
            }

            let stride = remaining.stride();
            let vertex_count = max_fitting as usize + 1;
            let shape = Shape {
                index_count: fitting.len() as u32,
                vertex_count: vertex_count as u32,
                material_id: remaining.shapes[0].material_id,
                ..Default::default()
            };
            let indices = fitting.into_iter().map(convert_index::<u16>).collect::<Result<Vec<u16>>>()?;
            let mut chunk = BinaryMesh16::new(
                remaining.attributes,
                remaining.vertices[..vertex_count * stride].to_vec(),
                indices,
                vec![shape],
            );
            chunk.remove_unused_vertices()?;
            if has_position {
                chunk.generate_bounding_volumes()?;
            }
            debug!("16-bit chunk {}: {} vertices, {} triangles", chunks.len(), chunk.num_vertices(), chunk.num_triangles());
            chunks.push(chunk);

            remaining.shapes[0].index_offset = 0;
            remaining.shapes[0].index_count = rest.len() as u32;
            remaining.indices = rest;
            remaining.remove_unused_vertices()?;
        }

        Ok(chunks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_is_stable() {
        let indices = [0, 1, 2, 70000, 1, 2, 5, 4, 3, 65535, 65536, 0];
        let p = partition_triangles(&indices);
        assert_eq!(p.fitting, vec![0, 1, 2, 5, 4, 3]);
        assert_eq!(p.rest, vec![70000, 1, 2, 65535, 65536, 0]);
        assert_eq!(p.max_fitting, 5);
    }
}
