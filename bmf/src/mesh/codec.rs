//! Binary file format, little-endian throughout:
//!
//! ```text
//! signature   NUL-terminated ("BMF" billboard, "BMF16", "BMF32")
//! version     u32
//! attributes  u32
//! bbox        6 x f32
//! sphere      4 x f32
//! vertices    u32 float count, f32 data
//! -- indexed meshes only --
//! index width u8 (2 or 4)
//! indices     u32 count, u16/u32 data
//! shapes      u32 count, 5 x u32 + 6 x f32 + 4 x f32 each
//! --
//! "EOF"
//! ```

use super::attributes::Attributes;
use super::billboard::BillboardMesh;
use super::binary_mesh::BinaryMesh;
use super::index::IndexType;
use super::shape::Shape;
use super::vertex_data::VertexData;
use crate::math::*;
use crate::{Error, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

pub const FILE_VERSION: u32 = 2;

const BILLBOARD_SIGNATURE: &str = "BMF";
const END_SIGNATURE: &[u8; 3] = b"EOF";
const MAX_SIGNATURE_LEN: usize = 16;

fn write_u32<W: Write>(w: &mut W, value: u32) -> Result<()> {
    w.write_all(&value.to_le_bytes())?;
    Ok(())
}

fn write_f32s<W: Write>(w: &mut W, values: &[f32]) -> Result<()> {
    let mut bytes = Vec::with_capacity(values.len() * 4);
    for v in values {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    w.write_all(&bytes)?;
    Ok(())
}

// Reads exactly `len` bytes without trusting `len` for the allocation up front.
fn read_bytes<R: Read>(r: &mut R, len: usize) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    r.by_ref().take(len as u64).read_to_end(&mut bytes)?;
    if bytes.len() != len {
        return Err(std::io::Error::from(ErrorKind::UnexpectedEof).into());
    }
    Ok(bytes)
}

fn read_u8<R: Read>(r: &mut R) -> Result<u8> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

fn read_u32<R: Read>(r: &mut R) -> Result<u32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

fn read_f32s<R: Read>(r: &mut R, count: usize) -> Result<Vec<f32>> {
    let bytes = read_bytes(r, count * 4)?;
    Ok(bytes.chunks_exact(4).map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]])).collect())
}

fn read_array<R: Read, const N: usize>(r: &mut R) -> Result<[f32; N]> {
    let mut res = [0.0; N];
    for (dst, src) in res.iter_mut().zip(read_f32s(r, N)?) {
        *dst = src;
    }
    Ok(res)
}

fn write_header<W: Write>(w: &mut W, signature: &str) -> Result<()> {
    w.write_all(signature.as_bytes())?;
    w.write_all(&[0])?;
    write_u32(w, FILE_VERSION)
}

fn read_header<R: Read>(r: &mut R, expected: &'static str) -> Result<()> {
    let mut found = Vec::new();
    loop {
        match read_u8(r)? {
            0 => break,
            c if found.len() < MAX_SIGNATURE_LEN => found.push(c),
            _ => break,
        }
    }
    if found != expected.as_bytes() {
        return Err(Error::InvalidSignature { expected, found: String::from_utf8_lossy(&found).into_owned() });
    }

    let version = read_u32(r)?;
    if version != FILE_VERSION {
        return Err(Error::InvalidVersion { expected: FILE_VERSION, found: version });
    }
    Ok(())
}

fn write_end<W: Write>(w: &mut W) -> Result<()> {
    w.write_all(END_SIGNATURE)?;
    Ok(())
}

fn read_end<R: Read>(r: &mut R) -> Result<()> {
    let mut end = [0u8; 3];
    match r.read_exact(&mut end) {
        Ok(()) if &end == END_SIGNATURE => Ok(()),
        Ok(()) => Err(Error::InvalidEndOfFile),
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(Error::InvalidEndOfFile),
        Err(e) => Err(e.into()),
    }
}

// attributes, volumes and vertices
fn write_vertex_data<W: Write, M: VertexData>(w: &mut W, mesh: &M) -> Result<()> {
    write_u32(w, mesh.attributes().bits())?;
    write_f32s(w, &mesh.bounding_box().to_array())?;
    write_f32s(w, &mesh.bounding_sphere().to_array())?;
    write_u32(w, mesh.vertices().len() as u32)?;
    write_f32s(w, mesh.vertices())
}

struct VertexSection {
    attributes: Attributes,
    bbox: AABB,
    sphere: Sphere,
    vertices: Vec<f32>,
}

fn read_vertex_data<R: Read>(r: &mut R) -> Result<VertexSection> {
    let attributes = Attributes::from_bits_retain(read_u32(r)?);
    let bbox = AABB::from_array(read_array(r)?);
    let sphere = Sphere::from_array(read_array(r)?);
    let count = read_u32(r)? as usize;
    let vertices = read_f32s(r, count)?;
    Ok(VertexSection { attributes, bbox, sphere, vertices })
}

fn write_shape<W: Write>(w: &mut W, s: &Shape) -> Result<()> {
    for value in [s.index_offset, s.index_count, s.vertex_offset, s.vertex_count, s.material_id] {
        write_u32(w, value)?;
    }
    write_f32s(w, &s.bbox.to_array())?;
    write_f32s(w, &s.sphere.to_array())
}

fn read_shape<R: Read>(r: &mut R) -> Result<Shape> {
    Ok(Shape {
        index_offset: read_u32(r)?,
        index_count: read_u32(r)?,
        vertex_offset: read_u32(r)?,
        vertex_count: read_u32(r)?,
        material_id: read_u32(r)?,
        bbox: AABB::from_array(read_array(r)?),
        sphere: Sphere::from_array(read_array(r)?),
    })
}

impl<I: IndexType> BinaryMesh<I> {
    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        write_header(w, I::SIGNATURE)?;
        write_vertex_data(w, self)?;

        w.write_all(&[I::BYTES])?;
        write_u32(w, self.indices.len() as u32)?;
        let mut bytes = Vec::with_capacity(self.indices.len() * I::BYTES as usize);
        for i in &self.indices {
            i.write_le(&mut bytes);
        }
        w.write_all(&bytes)?;

        write_u32(w, self.shapes.len() as u32)?;
        for s in &self.shapes {
            write_shape(w, s)?;
        }

        write_end(w)
    }

    pub fn read_from<R: Read>(r: &mut R) -> Result<Self> {
        read_header(r, I::SIGNATURE)?;
        let section = read_vertex_data(r)?;

        let width = read_u8(r)?;
        if width != I::BYTES {
            return Err(Error::IndexWidthMismatch { expected: I::BYTES, found: width });
        }
        let count = read_u32(r)? as usize;
        let bytes = read_bytes(r, count * I::BYTES as usize)?;
        let indices = bytes.chunks_exact(I::BYTES as usize).map(I::read_le).collect();

        let num_shapes = read_u32(r)? as usize;
        let mut shapes = Vec::new();
        for _ in 0..num_shapes {
            shapes.push(read_shape(r)?);
        }

        read_end(r)?;

        Ok(BinaryMesh {
            attributes: section.attributes,
            vertices: section.vertices,
            indices,
            shapes,
            bbox: section.bbox,
            sphere: section.sphere,
        })
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut w = BufWriter::new(File::create(path)?);
        self.write_to(&mut w)?;
        w.flush()?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut r = BufReader::new(File::open(path)?);
        Self::read_from(&mut r)
    }
}

impl BillboardMesh {
    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        write_header(w, BILLBOARD_SIGNATURE)?;
        write_vertex_data(w, self)?;
        write_end(w)
    }

    pub fn read_from<R: Read>(r: &mut R) -> Result<Self> {
        read_header(r, BILLBOARD_SIGNATURE)?;
        let section = read_vertex_data(r)?;
        read_end(r)?;

        Ok(BillboardMesh {
            attributes: section.attributes,
            vertices: section.vertices,
            bbox: section.bbox,
            sphere: section.sphere,
        })
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut w = BufWriter::new(File::create(path)?);
        self.write_to(&mut w)?;
        w.flush()?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut r = BufReader::new(File::open(path)?);
        Self::read_from(&mut r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(signature: &str, version: u32) -> Vec<u8> {
        let mut bytes = signature.as_bytes().to_vec();
        bytes.push(0);
        bytes.extend_from_slice(&version.to_le_bytes());
        bytes
    }

    #[test]
    fn layout() {
        let mesh = BillboardMesh::new(Attributes::WIDTH, vec![1.5]);
        let mut bytes = Vec::new();
        mesh.write_to(&mut bytes).unwrap();

        let mut expected = header("BMF", FILE_VERSION);
        expected.extend_from_slice(&(1u32 << 9).to_le_bytes());
        expected.extend_from_slice(&[0u8; 40]);
        expected.extend_from_slice(&1u32.to_le_bytes());
        expected.extend_from_slice(&1.5f32.to_le_bytes());
        expected.extend_from_slice(b"EOF");
        assert_eq!(bytes, expected);
    }

    #[test]
    fn wrong_signature() {
        let bytes = header("BMF16", FILE_VERSION);
        let err = BinaryMesh::<u32>::read_from(&mut bytes.as_slice()).unwrap_err();
        assert!(matches!(err, Error::InvalidSignature { expected: "BMF32", ref found } if found == "BMF16"));
    }

    #[test]
    fn wrong_version() {
        let bytes = header("BMF32", 1);
        let err = BinaryMesh::<u32>::read_from(&mut bytes.as_slice()).unwrap_err();
        assert!(matches!(err, Error::InvalidVersion { expected: FILE_VERSION, found: 1 }));
    }

    #[test]
    fn huge_count_in_truncated_stream() {
        let mut bytes = header("BMF", FILE_VERSION);
        bytes.extend_from_slice(&1u32.to_le_bytes());
        bytes.extend_from_slice(&[0u8; 40]);
        bytes.extend_from_slice(&u32::MAX.to_le_bytes());
        let err = BillboardMesh::read_from(&mut bytes.as_slice()).unwrap_err();
        assert!(matches!(err, Error::Io(ref e) if e.kind() == ErrorKind::UnexpectedEof));
    }

    #[test]
    fn missing_end_marker() {
        let mesh = BillboardMesh::new(Attributes::WIDTH, vec![1.5]);
        let mut bytes = Vec::new();
        mesh.write_to(&mut bytes).unwrap();
        bytes.truncate(bytes.len() - 1);
        assert!(matches!(BillboardMesh::read_from(&mut bytes.as_slice()), Err(Error::InvalidEndOfFile)));
    }
}
