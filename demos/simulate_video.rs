//! End-to-end demo: simulate a small microscopy video under all three
//! execution modes, time them, and confirm the results agree.
//!
//! ```bash
//! cargo run --release --example simulate_video
//! ```

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use psfvideo::{simulate, ExecutionMode, FrameSources, PixelGrid};

fn main() {
    let width = 256;
    let height = 256;
    let sources = 12;
    let frames = 200;

    println!("Simulating {width}x{height} pixels, {sources} sources, {frames} frames");

    let grid = PixelGrid::uniform(width, height, 1.0).expect("demo grid is non-empty");

    // Deterministic synthetic input: sources drift across the field of view.
    let mut rng = StdRng::seed_from_u64(7);
    let count = sources * frames;
    let x: Vec<f64> = (0..count)
        .map(|_| rng.random_range(0.0..width as f64))
        .collect();
    let y: Vec<f64> = (0..count)
        .map(|_| rng.random_range(0.0..height as f64))
        .collect();
    let srcs = FrameSources::from_flat(x, y, sources, frames).expect("demo shapes are consistent");

    let mut results = Vec::new();

    for mode in [
        ExecutionMode::Sequential,
        ExecutionMode::Vectorized,
        ExecutionMode::Threaded,
    ] {
        let start = Instant::now();
        let video = simulate(&grid, &srcs, mode);
        let elapsed = start.elapsed();

        let total: f64 = video.iter().sum();
        println!("{mode:?}: {elapsed:?} (total intensity {total:.3})");

        results.push((mode, video));
    }

    // Cross-check the modes against the sequential baseline.
    let (_, baseline) = &results[0];
    for (mode, video) in &results[1..] {
        let max_diff = baseline
            .iter()
            .zip(video.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0f64, f64::max);
        println!("{mode:?} vs Sequential: max abs diff {max_diff:.2e}");
    }
}
