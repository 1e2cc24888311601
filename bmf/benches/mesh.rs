use bmf::mesh::generators::*;
use bmf::mesh::*;
use criterion::{Bencher, BenchmarkId, Criterion, criterion_group, criterion_main};

// Height field of n x n quads, every quad with its own four vertices.
fn unwelded_grid(n: u32) -> BinaryMesh32 {
    let mut vertices = Vec::with_capacity((n * n * 12) as usize);
    let mut indices = Vec::with_capacity((n * n * 6) as usize);
    let height = |x: u32, y: u32| ((x * 31 + y * 17) % 5) as f32 * 0.1;
    for y in 0..n {
        for x in 0..n {
            let base = vertices.len() as u32 / 3;
            for (dx, dy) in [(0, 0), (1, 0), (1, 1), (0, 1)] {
                vertices.extend_from_slice(&[(x + dx) as f32, height(x + dx, y + dy), (y + dy) as f32]);
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
        }
    }
    let shape = Shape::covering(indices.len() as u32, vertices.len() as u32 / 3);
    BinaryMesh32::new(Attributes::POSITION, vertices, indices, vec![shape])
}

fn criterion_benchmark(c: &mut Criterion) {
    let small = unwelded_grid(64);
    let large = unwelded_grid(256);

    fn dedup(bencher: &mut Bencher, mesh: &BinaryMesh32) {
        bencher.iter(|| {
            let mut mesh = mesh.clone();
            mesh.remove_duplicate_vertices().unwrap();
            std::hint::black_box(mesh);
        })
    }
    let mut group = c.benchmark_group("Remove duplicates");
    group.bench_with_input(BenchmarkId::new("Grid", "64x64"), &small, dedup);
    group.bench_with_input(BenchmarkId::new("Grid", "256x256"), &large, dedup);
    group.finish();

    fn sphere(bencher: &mut Bencher, mesh: &BinaryMesh32) {
        bencher.iter(|| std::hint::black_box(bounding_sphere(mesh.attributes(), mesh.vertices()).unwrap()))
    }
    let mut group = c.benchmark_group("Bounding sphere");
    group.bench_with_input(BenchmarkId::new("Grid", "64x64"), &small, sphere);
    group.bench_with_input(BenchmarkId::new("Grid", "256x256"), &large, sphere);
    group.finish();

    let mut welded = small.clone();
    welded.remove_duplicate_vertices().unwrap();
    let flat: [Generator; 1] = [Generator::multi(FlatNormalGenerator)];
    let smooth: [Generator; 1] = [Generator::multi(InterpolatedNormalGenerator)];
    let target = Attributes::POSITION | Attributes::NORMAL;
    let mut group = c.benchmark_group("Generate normals");
    group.bench_function(BenchmarkId::new("Flat", "64x64"), |bencher| {
        bencher.iter(|| {
            let mut mesh = welded.clone();
            mesh.change_attributes(target, &flat).unwrap();
            std::hint::black_box(mesh);
        })
    });
    group.bench_function(BenchmarkId::new("Interpolated", "64x64"), |bencher| {
        bencher.iter(|| {
            let mut mesh = welded.clone();
            mesh.change_attributes(target, &smooth).unwrap();
            std::hint::black_box(mesh);
        })
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
