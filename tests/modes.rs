//! Cross-mode equivalence and behavioral tests for the video simulator.
//!
//! The three execution modes run the same separable-PSF algorithm under
//! different drivers; these tests pin down that they are interchangeable to
//! within floating-point tolerance and that the documented edge cases hold.

use ndarray::{Array2, Array3};
use ndarray_stats::QuantileExt;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use psfvideo::{simulate, ExecutionMode, FrameSources, PixelGrid};

const MODES: [ExecutionMode; 3] = [
    ExecutionMode::Sequential,
    ExecutionMode::Vectorized,
    ExecutionMode::Threaded,
];

/// Seeded synthetic sources scattered over (and slightly past) the grid.
fn random_sources(sources: usize, frames: usize, extent: f64, seed: u64) -> FrameSources {
    let mut rng = StdRng::seed_from_u64(seed);
    let count = sources * frames;

    let x: Vec<f64> = (0..count)
        .map(|_| rng.random_range(-2.0..extent + 2.0))
        .collect();
    let y: Vec<f64> = (0..count)
        .map(|_| rng.random_range(-2.0..extent + 2.0))
        .collect();

    FrameSources::from_flat(x, y, sources, frames).unwrap()
}

fn max_abs_diff(a: &Array3<f64>, b: &Array3<f64>) -> f64 {
    *(a - b).mapv(f64::abs).max_skipnan()
}

#[test]
fn test_modes_are_equivalent() {
    let grid = PixelGrid::uniform(48, 32, 1.0).unwrap();
    let sources = random_sources(6, 24, 48.0, 2024);

    let reference = simulate(&grid, &sources, ExecutionMode::Sequential);

    for mode in [ExecutionMode::Vectorized, ExecutionMode::Threaded] {
        let candidate = simulate(&grid, &sources, mode);
        let diff = max_abs_diff(&reference, &candidate);

        println!("{mode:?} vs Sequential: max abs diff {diff:.2e}");
        assert!(
            diff < 1e-9,
            "{mode:?} deviates from Sequential by {diff:.2e}"
        );
    }
}

#[test]
fn test_modes_are_equivalent_on_awkward_shapes() {
    // Odd dimensions exercise the partial SIMD blocks; a single frame forces
    // the threaded driver through its sequential fallback.
    for (width, height, sources, frames) in [(5, 3, 1, 1), (17, 9, 3, 7), (1, 1, 2, 5)] {
        let grid = PixelGrid::uniform(width, height, 1.0).unwrap();
        let srcs = random_sources(sources, frames, width as f64, 7);

        let reference = simulate(&grid, &srcs, ExecutionMode::Sequential);
        for mode in [ExecutionMode::Vectorized, ExecutionMode::Threaded] {
            let candidate = simulate(&grid, &srcs, mode);
            let diff = max_abs_diff(&reference, &candidate);
            assert!(
                diff < 1e-9,
                "{mode:?} deviates by {diff:.2e} on {width}x{height}, {sources} sources, {frames} frames"
            );
        }
    }
}

#[test]
fn test_concrete_single_source_scenario() {
    // 3x3 grid at {0, 1, 2}², one source at (1, 1): the center pixel sees
    // exp(0)·exp(0) = 1, the corner sees exp(-1)·exp(-1).
    let grid = PixelGrid::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 2.0]).unwrap();
    let xs = Array2::from_shape_vec((1, 1), vec![1.0]).unwrap();
    let ys = Array2::from_shape_vec((1, 1), vec![1.0]).unwrap();
    let sources = FrameSources::from_arrays(&xs, &ys).unwrap();

    for mode in MODES {
        let video = simulate(&grid, &sources, mode);

        let center = video[[1, 1, 0]];
        let corner = video[[0, 0, 0]];

        assert!(
            (center - 1.0).abs() < 1e-9,
            "{mode:?}: center pixel should be 1.0, got {center}"
        );
        assert!(
            (corner - (-2.0f64).exp()).abs() < 1e-9,
            "{mode:?}: corner pixel should be exp(-2), got {corner}"
        );
    }
}

#[test]
fn test_far_away_source_decays_to_nothing() {
    let grid = PixelGrid::uniform(16, 16, 1.0).unwrap();

    // One in-range source in frame 0; frame 1's source sits 1000 past the
    // grid edge, the documented encoding for "absent this frame".
    let sources = FrameSources::from_flat(
        vec![8.0, 1015.0],
        vec![8.0, 1015.0],
        1,
        2,
    )
    .unwrap();

    for mode in MODES {
        let video = simulate(&grid, &sources, mode);

        let absent_frame = video.index_axis(ndarray::Axis(2), 1);
        let peak = *absent_frame.mapv(f64::abs).max_skipnan();
        assert!(
            peak < 1e-10,
            "{mode:?}: out-of-range source leaked intensity {peak:.2e}"
        );

        // The in-range frame is unaffected by its neighbor.
        assert!(video[[8, 8, 0]] > 0.9, "{mode:?}: in-range frame lost its peak");
    }
}

#[test]
fn test_frame_permutation_permutes_output() {
    let grid = PixelGrid::uniform(12, 10, 1.0).unwrap();

    let base = random_sources(4, 6, 12.0, 99);
    let frames = base.num_frames();

    // Reversed frame order, rebuilt through the same constructor.
    let permuted: Vec<usize> = (0..frames).rev().collect();
    let mut x = Vec::new();
    let mut y = Vec::new();
    for &f in &permuted {
        x.extend_from_slice(base.frame_x(f));
        y.extend_from_slice(base.frame_y(f));
    }
    let reversed = FrameSources::from_flat(x, y, base.num_sources(), frames).unwrap();

    let video = simulate(&grid, &base, ExecutionMode::Threaded);
    let video_reversed = simulate(&grid, &reversed, ExecutionMode::Threaded);

    for (out_f, &in_f) in permuted.iter().enumerate() {
        let a = video.index_axis(ndarray::Axis(2), in_f);
        let b = video_reversed.index_axis(ndarray::Axis(2), out_f);
        let diff = *(&a - &b).mapv(f64::abs).max_skipnan();
        assert!(
            diff < 1e-12,
            "frame {in_f} changed under permutation (max diff {diff:.2e})"
        );
    }
}

#[test]
fn test_degenerate_shapes() {
    let grid = PixelGrid::uniform(8, 8, 1.0).unwrap();

    // F = 0: an empty tensor, not an error.
    let no_frames = FrameSources::from_flat(vec![], vec![], 3, 0).unwrap();
    for mode in MODES {
        let video = simulate(&grid, &no_frames, mode);
        assert_eq!(video.dim(), (8, 8, 0), "{mode:?}");
    }

    // N = 0: an all-zero tensor.
    let no_sources = FrameSources::from_flat(vec![], vec![], 0, 5).unwrap();
    for mode in MODES {
        let video = simulate(&grid, &no_sources, mode);
        assert_eq!(video.dim(), (8, 8, 5), "{mode:?}");
        assert!(video.iter().all(|&v| v == 0.0), "{mode:?}: nonzero intensity");
    }
}

#[test]
fn test_constructor_validation_is_fail_fast() {
    // Mismatched N x F shapes never reach the simulator.
    let xs = Array2::<f64>::zeros((3, 4));
    let ys = Array2::<f64>::zeros((3, 5));
    let err = FrameSources::from_arrays(&xs, &ys).unwrap_err();
    assert!(format!("{err}").contains("Source shape mismatch"));

    let err = FrameSources::from_flat(vec![0.0; 11], vec![0.0; 12], 3, 4).unwrap_err();
    assert!(format!("{err}").contains("Coordinate length mismatch"));

    let err = PixelGrid::new(vec![], vec![1.0]).unwrap_err();
    assert!(format!("{err}").contains("Empty x axis"));
}
