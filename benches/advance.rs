//! Benchmarks for the CPU simulation step and frame tessellation.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use stardrift::{mesh, FieldConfig, ParticleField};

fn bench_advance(c: &mut Criterion) {
    let mut group = c.benchmark_group("advance");

    for count in [150, 1_000, 10_000] {
        let config = FieldConfig::default().with_particle_count(count);

        group.bench_function(BenchmarkId::new("no_pointer", count), |b| {
            let mut field = ParticleField::seeded(1280.0, 720.0, config, 42);
            b.iter(|| {
                field.advance();
                black_box(field.particles().len())
            })
        });

        group.bench_function(BenchmarkId::new("pointer", count), |b| {
            let mut field = ParticleField::seeded(1280.0, 720.0, config, 42);
            field.set_pointer(640.0, 360.0);
            b.iter(|| {
                field.advance();
                black_box(field.particles().len())
            })
        });
    }

    group.finish();
}

fn bench_build_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_frame");

    for count in [150, 1_000] {
        let config = FieldConfig::default().with_particle_count(count);
        let mut field = ParticleField::seeded(1280.0, 720.0, config, 42);
        field.set_pointer(640.0, 360.0);

        // Warm the trails up to steady-state length.
        for _ in 0..300 {
            field.advance();
        }

        group.bench_function(BenchmarkId::from_parameter(count), |b| {
            let mut batch = Vec::new();
            b.iter(|| {
                mesh::build_frame(field.particles(), &mut batch);
                black_box(batch.len())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_advance, bench_build_frame);
criterion_main!(benches);
