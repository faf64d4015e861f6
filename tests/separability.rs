//! The mathematical identity behind the fast path.
//!
//! The simulator never evaluates the 2D Gaussian directly; it relies on
//! `exp(-(dx² + dy²)) = exp(-dx²) · exp(-dy²)` to factor each frame into two
//! profile matrices and a GEMM. These tests check the factored result
//! against the direct double sum, and the 1D profile against an independent
//! statistical reference.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use statrs::distribution::{Continuous, Normal};

use psfvideo::{simulate, ExecutionMode, FrameSources, PixelGrid};

/// The direct O(N·Px·Py) evaluation the factorization replaces.
fn direct_double_sum(grid: &PixelGrid, frame_x: &[f64], frame_y: &[f64]) -> Vec<f64> {
    let height = grid.height();
    let mut image = vec![0.0; grid.width() * height];

    for (i, &xi) in grid.x().iter().enumerate() {
        for (j, &yj) in grid.y().iter().enumerate() {
            let mut acc = 0.0;
            for (&xn, &yn) in frame_x.iter().zip(frame_y.iter()) {
                let dx = xi - xn;
                let dy = yj - yn;
                acc += (-(dx * dx) - (dy * dy)).exp();
            }
            image[i * height + j] = acc;
        }
    }

    image
}

#[test]
fn test_factored_result_equals_direct_sum() {
    let mut rng = StdRng::seed_from_u64(31337);

    let grid = PixelGrid::uniform(21, 17, 1.0).unwrap();
    let sources = 5;
    let frames = 4;
    let count = sources * frames;

    let x: Vec<f64> = (0..count).map(|_| rng.random_range(-1.0..22.0)).collect();
    let y: Vec<f64> = (0..count).map(|_| rng.random_range(-1.0..18.0)).collect();
    let srcs = FrameSources::from_flat(x, y, sources, frames).unwrap();

    for mode in [
        ExecutionMode::Sequential,
        ExecutionMode::Vectorized,
        ExecutionMode::Threaded,
    ] {
        let video = simulate(&grid, &srcs, mode);

        let mut worst = 0.0f64;
        for f in 0..frames {
            let expected = direct_double_sum(&grid, srcs.frame_x(f), srcs.frame_y(f));
            for i in 0..grid.width() {
                for j in 0..grid.height() {
                    let got = video[[i, j, f]];
                    let want = expected[i * grid.height() + j];
                    worst = worst.max((got - want).abs());
                }
            }
        }

        println!("{mode:?}: max |factored - direct| = {worst:.2e}");
        assert!(
            worst < 1e-9,
            "{mode:?}: factorization deviates from the direct sum by {worst:.2e}"
        );
    }
}

#[test]
fn test_profile_matches_normal_density() {
    // exp(-(x - μ)²) is a Normal(μ, 1/√2) density times √π. An independent
    // implementation of that density cross-checks the profile the simulator
    // computes, via a one-source frame where image(i, j) factors exactly.
    let mu = 3.25;
    let normal = Normal::new(mu, 0.5f64.sqrt()).unwrap();
    let sqrt_pi = std::f64::consts::PI.sqrt();

    let grid = PixelGrid::uniform(8, 1, 1.0).unwrap();
    let sources = FrameSources::from_flat(vec![mu], vec![0.0], 1, 1).unwrap();

    let video = simulate(&grid, &sources, ExecutionMode::Sequential);

    for (i, &xi) in grid.x().iter().enumerate() {
        // y profile at y = 0 with the source on the axis: exp(0) = 1, so the
        // pixel value is the x profile alone.
        let got = video[[i, 0, 0]];
        let want = normal.pdf(xi) * sqrt_pi;

        assert!(
            (got - want).abs() < 1e-12,
            "pixel {i}: profile {got} vs reference density {want}"
        );
    }
}
