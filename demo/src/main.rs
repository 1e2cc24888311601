use anyhow::{Context, Result, bail};
use bmf::math::*;
use bmf::mesh::generators::*;
use bmf::mesh::*;
use clap::{Args, Parser, Subcommand};
use log::info;
use std::path::{Path, PathBuf};

mod io;

use io::LoadedMesh;

#[derive(Parser)]
#[command(name = "bmf", version, about = "Inspect and transform binary mesh files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print attributes, counts, shapes and bounding volumes
    Info { input: PathBuf },
    /// Check the structural invariants of a mesh file
    Verify { input: PathBuf },
    /// Change the vertex attributes of a mesh
    Convert(ConvertArgs),
    /// Split a 32-bit mesh into meshes with 16-bit indices
    Split16 {
        input: PathBuf,
        /// Chunks are written to <prefix>.<n>.bmf16
        #[arg(long)]
        output_prefix: PathBuf,
    },
    /// Import the triangles of a Wavefront OBJ file as a 32-bit mesh
    ImportObj { input: PathBuf, output: PathBuf },
}

#[derive(Args)]
struct ConvertArgs {
    input: PathBuf,
    output: PathBuf,
    /// Comma-separated attribute names, e.g. position,normal,texcoord0
    #[arg(long, value_delimiter = ',', value_parser = parse_attribute)]
    attributes: Vec<Attributes>,
    /// Generate a normal per triangle
    #[arg(long, conflicts_with = "smooth_normals")]
    flat_normals: bool,
    /// Generate normals averaged over the adjacent triangles
    #[arg(long)]
    smooth_normals: bool,
    /// Fill missing colors with this RGBA value
    #[arg(long, value_delimiter = ',', num_args = 4)]
    color: Option<Vec<f32>>,
    /// Merge bit-identical vertices afterwards
    #[arg(long)]
    dedup: bool,
}

fn parse_attribute(name: &str) -> Result<Attributes, String> {
    Attributes::parse_name(name).ok_or_else(|| format!("unknown attribute {name:?}"))
}

fn print_volumes(bbox: &AABB, sphere: &Sphere) {
    println!("  bounding box: {:?} .. {:?}", bbox.min.to_array(), bbox.max.to_array());
    println!("  bounding sphere: {:?} r={}", sphere.center.to_array(), sphere.radius);
}

fn print_info(mesh: &LoadedMesh) {
    match mesh {
        LoadedMesh::Billboard(m) => {
            println!("billboards: {:?}, {} vertices", m.attributes(), m.num_vertices());
            print_volumes(m.bounding_box(), m.bounding_sphere());
        }
        LoadedMesh::Mesh16(m) => print_mesh_info("16-bit", m),
        LoadedMesh::Mesh32(m) => print_mesh_info("32-bit", m),
    }
}

fn print_mesh_info<I: IndexType>(kind: &str, mesh: &BinaryMesh<I>) {
    println!(
        "{kind} mesh: {:?}, {} vertices, {} triangles, {} shapes",
        mesh.attributes(),
        mesh.num_vertices(),
        mesh.num_triangles(),
        mesh.shapes().len()
    );
    print_volumes(mesh.bounding_box(), mesh.bounding_sphere());
    for (n, s) in mesh.shapes().iter().enumerate() {
        println!(
            "  shape {n}: material {}, {} triangles, {} vertices at {}",
            s.material_id,
            s.num_triangles(),
            s.vertex_count,
            s.vertex_offset
        );
    }
}

fn verify(mesh: &LoadedMesh) -> bmf::Result<()> {
    match mesh {
        LoadedMesh::Billboard(m) => m.verify(),
        LoadedMesh::Mesh16(m) => m.verify(),
        LoadedMesh::Mesh32(m) => m.verify(),
    }
}

fn generators(args: &ConvertArgs) -> Vec<Generator> {
    let mut generators = Vec::new();
    if let Some(color) = &args.color {
        let mut value = OwnedVertex::new(Attributes::COLOR);
        value.set(Attributes::COLOR, color);
        generators.push(Generator::single(ConstantValueGenerator::new(value)));
    }
    if args.flat_normals {
        generators.push(Generator::multi(FlatNormalGenerator));
    }
    if args.smooth_normals {
        generators.push(Generator::multi(InterpolatedNormalGenerator));
    }
    generators
}

fn convert_mesh<I: IndexType>(mesh: &mut BinaryMesh<I>, target: Attributes, args: &ConvertArgs) -> Result<()> {
    mesh.change_attributes(target, &generators(args))?;
    if args.dedup {
        let before = mesh.num_vertices();
        mesh.remove_duplicate_vertices()?;
        if mesh.attributes().contains(Attributes::POSITION) {
            mesh.generate_bounding_volumes()?;
        }
        info!("deduplicated {} vertices into {}", before, mesh.num_vertices());
    }
    Ok(())
}

fn convert(args: &ConvertArgs) -> Result<()> {
    let target = args.attributes.iter().fold(Attributes::empty(), |acc, &a| acc | a);
    if target.is_empty() {
        bail!("no target attributes given");
    }

    let mut mesh = io::load(&args.input)?;
    match &mut mesh {
        LoadedMesh::Billboard(m) => {
            if args.dedup {
                bail!("--dedup needs an indexed mesh");
            }
            m.change_attributes(target, &generators(args))?;
        }
        LoadedMesh::Mesh16(m) => convert_mesh(m, target, args)?,
        LoadedMesh::Mesh32(m) => convert_mesh(m, target, args)?,
    }
    verify(&mesh).context("converted mesh is not valid")?;
    io::save(&mesh, &args.output)
}

fn split16(input: &Path, output_prefix: &Path) -> Result<()> {
    let mesh = match io::load(input)? {
        LoadedMesh::Mesh32(m) => m,
        LoadedMesh::Mesh16(_) => bail!("{} already has 16-bit indices", input.display()),
        LoadedMesh::Billboard(_) => bail!("{} has no indices", input.display()),
    };

    let chunks = mesh.force_16_bit_indices()?;
    info!("{} split into {} chunks", input.display(), chunks.len());
    for (n, chunk) in chunks.into_iter().enumerate() {
        let mut path = output_prefix.as_os_str().to_owned();
        path.push(format!(".{n}.bmf16"));
        io::save(&LoadedMesh::Mesh16(chunk), PathBuf::from(path))?;
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Info { input } => print_info(&io::load(&input)?),
        Command::Verify { input } => {
            let mesh = io::load(&input)?;
            verify(&mesh).with_context(|| format!("{} is not valid", input.display()))?;
            println!("{}: ok", input.display());
        }
        Command::Convert(args) => convert(&args)?,
        Command::Split16 { input, output_prefix } => split16(&input, &output_prefix)?,
        Command::ImportObj { input, output } => {
            let mesh = io::import_obj(&input)?;
            mesh.verify().context("imported mesh is not valid")?;
            io::save(&LoadedMesh::Mesh32(mesh), output)?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    run(Cli::parse())
}
