//! Execution-mode comparison for the video simulator.
//!
//! # Usage:
//! ```bash
//! # Run all video benchmarks
//! cargo bench --bench video
//!
//! # Run one size group
//! cargo bench --bench video -- video_128x128x64
//! ```

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::prelude::*;

use psfvideo::{simulate, ExecutionMode, FrameSources, PixelGrid};

/// Seeded synthetic sources uniformly scattered over the grid.
fn create_sources(sources: usize, frames: usize, extent: f64, rng: &mut StdRng) -> FrameSources {
    let count = sources * frames;
    let x: Vec<f64> = (0..count).map(|_| rng.random_range(0.0..extent)).collect();
    let y: Vec<f64> = (0..count).map(|_| rng.random_range(0.0..extent)).collect();

    FrameSources::from_flat(x, y, sources, frames).expect("bench shapes are consistent")
}

/// Benchmark all three modes for a specific video size - one group per size.
fn bench_video_by_size(c: &mut Criterion) {
    let sizes = [
        // (width, height, sources, frames)
        (64, 64, 4, 32),
        (128, 128, 8, 64),
        (256, 256, 8, 128),
    ];

    for (width, height, sources, frames) in sizes {
        let group_name = format!("video_{}x{}x{}", width, height, frames);
        let mut group = c.benchmark_group(&group_name);
        group.sample_size(20); // Keep wall time reasonable for big videos

        let mut rng = StdRng::seed_from_u64(42);
        let grid = PixelGrid::uniform(width, height, 1.0).expect("bench grid is non-empty");
        let srcs = create_sources(sources, frames, width as f64, &mut rng);

        group.bench_function("sequential", |b| {
            b.iter(|| simulate(black_box(&grid), black_box(&srcs), ExecutionMode::Sequential))
        });

        group.bench_function("vectorized", |b| {
            b.iter(|| simulate(black_box(&grid), black_box(&srcs), ExecutionMode::Vectorized))
        });

        group.bench_function("threaded", |b| {
            b.iter(|| simulate(black_box(&grid), black_box(&srcs), ExecutionMode::Threaded))
        });

        group.finish();
    }
}

criterion_group!(benches, bench_video_by_size);
criterion_main!(benches);
