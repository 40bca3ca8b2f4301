//! Criterion benchmarks for the scaling engine critical paths
//!
//! Benchmarks the operations dominating real workloads:
//! - Color distance: called many times per pixel
//! - Full-image scaling per factor
//! - Sequential vs parallel scaling

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use xbrz::color::ColorDistance;
use xbrz::parallel::scale_parallel;
use xbrz::{Scaler, ScalerConfig};

// =============================================================================
// Test Data Generators
// =============================================================================

/// Generate a sprite-like two-color image with diagonal features.
fn make_sprite(n: usize) -> Vec<u32> {
    let dark = 0xff20_3040u32;
    let light = 0xffe0_c890u32;
    let mut src = vec![dark; n * n];
    for y in 0..n {
        for x in 0..n {
            if (x * x + y * y) % 7 < 3 || x + y > n {
                src[y * n + x] = light;
            }
        }
    }
    src
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_color_distance(c: &mut Criterion) {
    let dist = ColorDistance::new(&ScalerConfig::default());
    c.bench_function("color_distance", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for p1 in (0u32..64).map(|i| 0xff00_0000 | (i * 0x0004_0810)) {
                acc += dist.dist(black_box(p1), black_box(0xff80_8080));
            }
            acc
        })
    });
}

fn bench_scale_factors(c: &mut Criterion) {
    let n = 64;
    let src = make_sprite(n);
    let mut group = c.benchmark_group("scale_image");
    group.throughput(Throughput::Elements((n * n) as u64));
    for factor in 2..=5usize {
        let scaler = Scaler::new(factor, ScalerConfig::default()).unwrap();
        let mut dst = vec![0u32; n * n * factor * factor];
        group.bench_with_input(BenchmarkId::from_parameter(factor), &factor, |b, _| {
            b.iter(|| scaler.scale_image(black_box(&src), n, n, &mut dst).unwrap())
        });
    }
    group.finish();
}

fn bench_parallel(c: &mut Criterion) {
    let n = 128;
    let src = make_sprite(n);
    let scaler = Scaler::new(4, ScalerConfig::default()).unwrap();
    let mut group = c.benchmark_group("parallel_4x");
    group.throughput(Throughput::Elements((n * n) as u64));

    let mut dst = vec![0u32; n * n * 16];
    group.bench_function("sequential", |b| {
        b.iter(|| scaler.scale_image(black_box(&src), n, n, &mut dst).unwrap())
    });
    group.bench_function("rayon", |b| {
        b.iter(|| scale_parallel(&scaler, black_box(&src), n, n, &mut dst).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_color_distance, bench_scale_factors, bench_parallel);
criterion_main!(benches);
