//! Fast simulation of point-spread-function (PSF) microscopy videos.
//!
//! A simulated video is a stack of independent frames. Each frame is the sum,
//! over a set of point sources, of an isotropic 2D Gaussian evaluated on a
//! fixed pixel grid:
//!
//! ```text
//! image[i, j] = Σₙ exp(-(x[i] - xₙ)²) · exp(-(yₙ - y[j])²)
//! ```
//!
//! The 2D Gaussian is separable, so each frame factors into two thin matrices
//! of 1D Gaussian profiles and one dense matrix product — an O(Px·N·Py) GEMM
//! instead of a triple-nested exponential loop. Frames share nothing but the
//! read-only pixel grid, which makes the frame loop embarrassingly parallel.
//!
//! # Execution modes
//!
//! The same algorithm runs under three drivers, selected by
//! [`ExecutionMode`]:
//!
//! - **Sequential** — one thread, frames in order, scalar [`f64::exp`].
//! - **Vectorized** — same frame order; the profile evaluation runs through
//!   the SIMD exponential kernel for the CPU selected at build time
//!   (AVX2, NEON, or the scalar fallback).
//! - **Threaded** — frames distributed across Rayon's worker pool, each
//!   worker writing only its own disjoint frame slices.
//!
//! All three produce numerically equivalent tensors within floating-point
//! tolerance.
//!
//! # Example
//!
//! ```rust
//! use ndarray::Array2;
//! use psfvideo::{simulate, ExecutionMode, FrameSources, PixelGrid};
//!
//! let grid = PixelGrid::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 2.0]).unwrap();
//! // One source at (1, 1), one frame.
//! let xs = Array2::from_shape_vec((1, 1), vec![1.0]).unwrap();
//! let ys = Array2::from_shape_vec((1, 1), vec![1.0]).unwrap();
//! let sources = FrameSources::from_arrays(&xs, &ys).unwrap();
//!
//! let video = simulate(&grid, &sources, ExecutionMode::Sequential);
//! assert!((video[[1, 1, 0]] - 1.0).abs() < 1e-12);
//! ```

pub mod error;
pub mod grid;
pub mod simd;
pub mod sources;
pub mod video;

/// Minimum number of frames before [`ExecutionMode::Threaded`] actually
/// spawns parallel work. Below this, thread-pool overhead dominates and the
/// threaded driver degrades to the vectorized sequential one.
pub const PAR_FRAME_THRESHOLD: usize = 2;

pub use error::{PsfVideoError, Result};
pub use grid::PixelGrid;
pub use sources::FrameSources;
pub use video::{simulate, ExecutionMode};
