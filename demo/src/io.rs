use anyhow::{Context, Result, anyhow, bail};
use bmf::mesh::*;
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use wavefront_obj::obj;

/// Any of the three file flavors.
pub enum LoadedMesh {
    Billboard(BillboardMesh),
    Mesh16(BinaryMesh16),
    Mesh32(BinaryMesh32),
}

// The NUL-terminated signature at the start of the file.
fn read_signature(path: &Path) -> Result<String> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut signature = Vec::new();
    for byte in BufReader::new(file).bytes().take(16) {
        match byte? {
            0 => break,
            c => signature.push(c),
        }
    }
    Ok(String::from_utf8_lossy(&signature).into_owned())
}

pub fn load<P: AsRef<Path>>(path: P) -> Result<LoadedMesh> {
    let path = path.as_ref();
    let signature = read_signature(path)?;
    let context = || format!("failed to load {}", path.display());
    let mesh = match signature.as_str() {
        "BMF" => LoadedMesh::Billboard(BillboardMesh::load_from_file(path).with_context(context)?),
        "BMF16" => LoadedMesh::Mesh16(BinaryMesh16::load_from_file(path).with_context(context)?),
        "BMF32" => LoadedMesh::Mesh32(BinaryMesh32::load_from_file(path).with_context(context)?),
        other => bail!("{} is not a mesh file (signature {other:?})", path.display()),
    };
    debug!("loaded {} as {signature}", path.display());
    Ok(mesh)
}

pub fn save<P: AsRef<Path>>(mesh: &LoadedMesh, path: P) -> Result<()> {
    let path = path.as_ref();
    let saved = match mesh {
        LoadedMesh::Billboard(m) => m.save_to_file(path),
        LoadedMesh::Mesh16(m) => m.save_to_file(path),
        LoadedMesh::Mesh32(m) => m.save_to_file(path),
    };
    saved.with_context(|| format!("failed to save {}", path.display()))?;
    info!("saved {}", path.display());
    Ok(())
}

fn position(object: &obj::Object, index: usize) -> Result<[f32; 3]> {
    let v = object.vertices.get(index).ok_or_else(|| anyhow!("vertex index {index} out of range"))?;
    Ok([v.x as f32, v.y as f32, v.z as f32])
}

fn normal(object: &obj::Object, index: usize) -> Result<[f32; 3]> {
    let n = object.normals.get(index).ok_or_else(|| anyhow!("normal index {index} out of range"))?;
    Ok([n.x as f32, n.y as f32, n.z as f32])
}

fn tex_coord(object: &obj::Object, index: usize) -> Result<[f32; 2]> {
    let t = object.tex_vertices.get(index).ok_or_else(|| anyhow!("texture coordinate index {index} out of range"))?;
    Ok([t.u as f32, t.v as f32])
}

fn triangles(geometry: &obj::Geometry) -> impl Iterator<Item = [obj::VTNIndex; 3]> + '_ {
    geometry.shapes.iter().filter_map(|shape| match shape.primitive {
        obj::Primitive::Triangle(v0, v1, v2) => Some([v0, v1, v2]),
        _ => None,
    })
}

// One single-shape mesh per geometry, with welded vertices.
fn import_geometry(
    object: &obj::Object,
    geometry: &obj::Geometry,
    attributes: Attributes,
    material_id: u32,
) -> Result<BinaryMesh32> {
    let mut vertices = Vec::new();
    for corner in triangles(geometry).flatten() {
        let (v, t, n) = corner;
        vertices.extend_from_slice(&position(object, v)?);
        if let Some(n) = n.filter(|_| attributes.contains(Attributes::NORMAL)) {
            vertices.extend_from_slice(&normal(object, n)?);
        }
        if let Some(t) = t.filter(|_| attributes.contains(Attributes::TEXCOORD0)) {
            vertices.extend_from_slice(&tex_coord(object, t)?);
        }
    }

    let num_vertices = (vertices.len() / attributes.stride()) as u32;
    let indices: Vec<u32> = (0..num_vertices).collect();
    let shape = Shape { material_id, ..Shape::covering(num_vertices, num_vertices) };
    let mut mesh = BinaryMesh32::new(attributes, vertices, indices, vec![shape]);
    mesh.remove_duplicate_vertices()?;
    mesh.generate_bounding_volumes()?;
    Ok(mesh)
}

/// Imports the triangles of every object. Normals and texture coordinates are
/// only kept when every triangle corner has them. Geometries become shapes,
/// materials are numbered in order of appearance.
pub fn import_obj<P: AsRef<Path>>(path: P) -> Result<BinaryMesh32> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let model = obj::parse(source)
        .map_err(|e| anyhow!("{}:{}: {}", path.display(), e.line_number, e.message))?;

    let corners = || {
        model.objects.iter().flat_map(|o| o.geometry.iter()).flat_map(|g| triangles(g).flatten())
    };
    let mut attributes = Attributes::POSITION;
    if corners().all(|(_, _, n)| n.is_some()) {
        attributes |= Attributes::NORMAL;
    }
    if corners().all(|(_, t, _)| t.is_some()) {
        attributes |= Attributes::TEXCOORD0;
    }

    let mut materials: Vec<&str> = Vec::new();
    let mut meshes = Vec::new();
    for object in &model.objects {
        for geometry in &object.geometry {
            if triangles(geometry).next().is_none() {
                continue;
            }
            let name = geometry.material_name.as_deref().unwrap_or("");
            let material_id = match materials.iter().position(|&m| m == name) {
                Some(id) => id,
                None => {
                    materials.push(name);
                    materials.len() - 1
                }
            };
            let mesh = import_geometry(object, geometry, attributes, material_id as u32)
                .with_context(|| format!("failed to import object {:?}", object.name))?;
            meshes.push(mesh);
        }
    }
    if meshes.is_empty() {
        bail!("{} contains no triangles", path.display());
    }

    let mut mesh = BinaryMesh32::merge_shapes(&meshes)?;
    mesh.generate_bounding_volumes()?;
    info!(
        "imported {}: {} shapes, {} vertices, {} triangles, {:?}",
        path.display(),
        mesh.shapes().len(),
        mesh.num_vertices(),
        mesh.num_triangles(),
        mesh.attributes()
    );
    Ok(mesh)
}
