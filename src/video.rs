//! The video simulator: per-frame separable PSF evaluation.
//!
//! Each frame factors into two thin profile matrices and one dense matrix
//! product:
//!
//! ```text
//! PSFx[i, n] = exp(-(x[i] - xf[n])²)        (Px × N)
//! PSFy[n, j] = exp(-(yf[n] - y[j])²)        (N × Py)
//! image      = PSFx · PSFy                   (Px × Py)
//! ```
//!
//! The product is delegated to `ndarray`'s GEMM, writing straight into the
//! frame's slice of the output buffer. Frames are independent, so the
//! threaded driver hands disjoint frame slices to Rayon workers and needs no
//! synchronization beyond the final join.

use ndarray::linalg::general_mat_mul;
use ndarray::{Array3, ArrayView2, ArrayViewMut2};
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
use rayon::slice::ParallelSliceMut;

use crate::grid::PixelGrid;
use crate::simd;
use crate::sources::FrameSources;
use crate::PAR_FRAME_THRESHOLD;

/// Concurrency strategy for [`simulate`]. All modes run the same per-frame
/// algorithm and produce numerically equivalent tensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// One thread, frames in index order, scalar `f64::exp`.
    Sequential,
    /// One thread, frames in index order, SIMD profile kernel.
    Vectorized,
    /// Frames distributed over Rayon's worker pool, SIMD profile kernel.
    /// Falls back to `Vectorized` below [`PAR_FRAME_THRESHOLD`] frames.
    Threaded,
}

/// Profile evaluator signature: writes `exp(-(axis[j] - center)²)` into
/// `out` for every axis coordinate. `Sequential` always takes the scalar
/// fallback kernel; the other modes take whichever SIMD backend the build
/// selected.
type ProfileKernel = fn(f64, &[f64], &mut [f64]);

/// Per-frame intermediate matrices, reused across frames so the hot loop
/// allocates nothing. Each sequential run owns one; the threaded driver
/// creates one per Rayon worker.
struct FrameScratch {
    /// Px × N profile matrix, row-major.
    psf_x: Vec<f64>,
    /// N × Py profile matrix, row-major.
    psf_y: Vec<f64>,
}

impl FrameScratch {
    fn new(width: usize, height: usize, sources: usize) -> Self {
        FrameScratch {
            psf_x: vec![0.0; width * sources],
            psf_y: vec![0.0; sources * height],
        }
    }
}

/// Simulates a PSF video: one image per frame, stacked into a
/// (Px, Py, F) tensor where entry `(i, j, f)` is the intensity of pixel
/// `(i, j)` in frame `f`.
///
/// The tensor is freshly allocated and handed to the caller; inputs are
/// never mutated. Frame slices of the backing memory are written exactly
/// once each, in index order for the sequential modes and in unspecified
/// order for [`ExecutionMode::Threaded`] — the frame-indexed layout of the
/// result is identical either way.
///
/// Shape validity is established when [`PixelGrid`] and [`FrameSources`] are
/// constructed, so this call cannot fail. A panic in a Rayon worker (it
/// would take a bug, not bad data) propagates to the caller after the pool
/// joins.
///
/// # Example
///
/// ```rust
/// use psfvideo::{simulate, ExecutionMode, FrameSources, PixelGrid};
///
/// let grid = PixelGrid::uniform(16, 16, 1.0).unwrap();
/// let sources = FrameSources::from_flat(vec![8.0; 3], vec![4.0; 3], 1, 3).unwrap();
///
/// let video = simulate(&grid, &sources, ExecutionMode::Threaded);
/// assert_eq!(video.dim(), (16, 16, 3));
/// ```
pub fn simulate(
    grid: &PixelGrid,
    sources: &FrameSources,
    mode: ExecutionMode,
) -> Array3<f64> {
    let width = grid.width();
    let height = grid.height();
    let frames = sources.num_frames();

    // Frame-major backing buffer: frame f owns the contiguous chunk
    // [f * width * height, (f + 1) * width * height).
    let mut data = vec![0.0; width * height * frames];

    match mode {
        ExecutionMode::Sequential => {
            render_frames(grid, sources, &mut data, simd::fallback::gaussian_row)
        }
        ExecutionMode::Vectorized => render_frames(grid, sources, &mut data, simd::gaussian_row),
        ExecutionMode::Threaded => {
            if frames < PAR_FRAME_THRESHOLD {
                render_frames(grid, sources, &mut data, simd::gaussian_row)
            } else {
                render_frames_parallel(grid, sources, &mut data)
            }
        }
    }

    Array3::from_shape_vec((frames, width, height), data)
        .expect("backing buffer matches (frames, width, height)")
        .permuted_axes([1, 2, 0])
}

/// Sequential driver: frames in index order, one scratch for the whole run.
fn render_frames(
    grid: &PixelGrid,
    sources: &FrameSources,
    data: &mut [f64],
    profile: ProfileKernel,
) {
    let frame_len = grid.width() * grid.height();
    let mut scratch = FrameScratch::new(grid.width(), grid.height(), sources.num_sources());

    for (f, frame) in data.chunks_mut(frame_len).enumerate() {
        render_frame(
            grid,
            sources.frame_x(f),
            sources.frame_y(f),
            &mut scratch,
            frame,
            profile,
        );
    }
}

/// Threaded driver: disjoint frame chunks across the Rayon pool, one scratch
/// per worker.
fn render_frames_parallel(grid: &PixelGrid, sources: &FrameSources, data: &mut [f64]) {
    let frame_len = grid.width() * grid.height();
    let width = grid.width();
    let height = grid.height();
    let n = sources.num_sources();

    data.par_chunks_mut(frame_len)
        .enumerate()
        .for_each_init(
            || FrameScratch::new(width, height, n),
            |scratch, (f, frame)| {
                render_frame(
                    grid,
                    sources.frame_x(f),
                    sources.frame_y(f),
                    scratch,
                    frame,
                    simd::gaussian_row,
                );
            },
        );
}

/// Renders one frame into its output slice via the separable factorization.
fn render_frame(
    grid: &PixelGrid,
    frame_x: &[f64],
    frame_y: &[f64],
    scratch: &mut FrameScratch,
    frame: &mut [f64],
    profile: ProfileKernel,
) {
    let width = grid.width();
    let height = grid.height();
    let n = frame_x.len();

    if n == 0 {
        // No sources: the image is identically zero.
        frame.fill(0.0);
        return;
    }

    // PSFx row i: profiles of every source around pixel x[i].
    for (i, &xc) in grid.x().iter().enumerate() {
        profile(xc, frame_x, &mut scratch.psf_x[i * n..(i + 1) * n]);
    }

    // PSFy row k: profile of source k along the whole y axis.
    for (k, &yc) in frame_y.iter().enumerate() {
        profile(yc, grid.y(), &mut scratch.psf_y[k * height..(k + 1) * height]);
    }

    let psf_x = ArrayView2::from_shape((width, n), &scratch.psf_x[..width * n])
        .expect("psf_x scratch matches (width, sources)");
    let psf_y = ArrayView2::from_shape((n, height), &scratch.psf_y[..n * height])
        .expect("psf_y scratch matches (sources, height)");
    let mut image = ArrayViewMut2::from_shape((width, height), frame)
        .expect("frame slice matches (width, height)");

    general_mat_mul(1.0, &psf_x, &psf_y, 0.0, &mut image);
}
