//! Benchmarks for free-form subdivision - icosahedron refinement workloads.

use asteroid_plugin::glam::Vec3;
use asteroid_plugin::{shapes, Displacement, FractalMesh, SubdivisionConfig};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

// ============================================================================
// Uniform refinement
// ============================================================================

/// Full uniform passes from the 20-face icosahedron.
fn bench_uniform_passes(c: &mut Criterion) {
  let mut group = c.benchmark_group("icosahedron_uniform");
  let input = shapes::icosahedron(1.0);

  for passes in [1u32, 3, 5] {
    group.throughput(Throughput::Elements(20 * 4u64.pow(passes)));
    group.bench_with_input(BenchmarkId::from_parameter(passes), &passes, |b, &passes| {
      b.iter(|| {
        let mut mesh = FractalMesh::from_input(&input, SubdivisionConfig::default()).unwrap();
        for _ in 0..passes {
          mesh.subdivide(0.0).unwrap();
        }
        black_box(mesh.triangle_count())
      })
    });
  }

  group.finish();
}

/// Compare displacement strategies on the same workload.
fn bench_displacement(c: &mut Criterion) {
  let mut group = c.benchmark_group("icosahedron_displacement");
  let input = shapes::icosahedron(1.0);

  let modes = [
    ("flat", Displacement::Flat),
    ("hash_noise", Displacement::default()),
    ("jitter", Displacement::Jitter { amount: 0.3, seed: 7 }),
  ];

  for (name, displacement) in modes {
    let config = SubdivisionConfig::default().with_displacement(displacement);
    group.bench_function(name, |b| {
      b.iter(|| {
        let mut mesh = FractalMesh::from_input(&input, config).unwrap();
        for _ in 0..4 {
          mesh.subdivide(0.0).unwrap();
        }
        black_box(mesh.vertex_count())
      })
    });
  }

  group.finish();
}

// ============================================================================
// Distance weighted refinement and flattening
// ============================================================================

fn bench_subdivide_near(c: &mut Criterion) {
  let input = shapes::icosahedron(1.0);
  let point = Vec3::new(0.0, 0.0, 1.2);

  c.bench_function("icosahedron_subdivide_near", |b| {
    b.iter(|| {
      let mut mesh = FractalMesh::from_input(&input, SubdivisionConfig::default()).unwrap();
      while mesh.subdivide_near(point, 0.02).unwrap() > 0 {}
      black_box(mesh.triangle_count())
    })
  });
}

fn bench_to_output(c: &mut Criterion) {
  let mut mesh = FractalMesh::from_input(&shapes::icosahedron(1.0), SubdivisionConfig::default()).unwrap();
  for _ in 0..5 {
    mesh.subdivide(0.0).unwrap();
  }

  c.bench_function("icosahedron_to_output_5", |b| b.iter(|| black_box(mesh.to_output().vertex_count())));
}

criterion_group!(
  benches,
  bench_uniform_passes,
  bench_displacement,
  bench_subdivide_near,
  bench_to_output
);
criterion_main!(benches);
