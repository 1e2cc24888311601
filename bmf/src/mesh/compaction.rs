use super::attributes::Attributes;
use super::binary_mesh::BinaryMesh;
use super::index::{IndexType, convert_index};
use super::vertex::VertexRef;
use super::vertex_data::VertexData;
use crate::Result;
use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use log::debug;

impl<I: IndexType> BinaryMesh<I> {
    /// Merges bit-identical vertices, keeping the first occurrence of each.
    /// Only the index values and the vertex count of the shape change.
    pub fn remove_duplicate_vertices(&mut self) -> Result<()> {
        self.expect_single_shape("remove_duplicate_vertices")?;
        self.expect_indices_in_range()?;

        let attributes = self.attributes;
        let stride = self.stride();
        let num_vertices = self.num_vertices();

        let mut remap = vec![0u32; num_vertices];
        let mut unique: Vec<f32> = Vec::with_capacity(self.vertices.len());
        {
            let mut first_seen: HashMap<VertexRef<'_>, u32> = HashMap::with_capacity(num_vertices);
            for (i, target) in remap.iter_mut().enumerate() {
                let v = VertexRef::at(attributes, &self.vertices, i);
                *target = match first_seen.entry(v) {
                    Entry::Occupied(e) => *e.get(),
                    Entry::Vacant(e) => {
                        let index = (unique.len() / stride) as u32;
                        unique.extend_from_slice(v.as_slice());
                        *e.insert(index)
                    }
                };
            }
            if first_seen.len() == num_vertices {
                return Ok(());
            }
        }

        let num_unique = unique.len() / stride;
        debug!("removed {} duplicate vertices, {} left", num_vertices - num_unique, num_unique);

        for index in &mut self.indices {
            *index = convert_index(remap[index.to_usize()])?;
        }
        self.vertices = unique;
        self.shapes[0].vertex_count = num_unique as u32;
        Ok(())
    }

    /// Drops vertices no index refers to. Vertices in front of the first unused
    /// one keep their position, and so do the indices referring to them.
    /// Bounding volumes are regenerated if vertices were removed and positions are present.
    pub fn remove_unused_vertices(&mut self) -> Result<()> {
        self.expect_single_shape("remove_unused_vertices")?;
        self.expect_indices_in_range()?;

        let stride = self.stride();
        let num_vertices = self.num_vertices();

        let mut used = vec![false; num_vertices];
        for index in &self.indices {
            used[index.to_usize()] = true;
        }

        let Some(first_unused) = used.iter().position(|u| !u) else {
            return Ok(());
        };

        // remap[i - first_unused] is the new position of vertex i
        let mut remap = vec![0u32; num_vertices - first_unused];
        let mut next = first_unused;
        for i in first_unused..num_vertices {
            remap[i - first_unused] = next as u32;
            if used[i] {
                if next != i {
                    self.vertices.copy_within(i * stride..(i + 1) * stride, next * stride);
                }
                next += 1;
            }
        }
        self.vertices.truncate(next * stride);

        debug!("removed {} unused vertices, {} left", num_vertices - next, next);

        for index in &mut self.indices {
            let i = index.to_usize();
            if i >= first_unused {
                *index = convert_index(remap[i - first_unused])?;
            }
        }
        self.shapes[0].vertex_count = next as u32;

        if self.attributes.contains(Attributes::POSITION) {
            self.generate_bounding_volumes()?;
        }
        Ok(())
    }
}
