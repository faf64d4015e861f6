//! Per-frame point-source coordinates.

use ndarray::Array2;

use crate::error::{length_mismatch, shape_mismatch, Result};

/// Source coordinates for every frame of a video.
///
/// The public shape is an N x F matrix pair (N sources, F frames, one
/// column per frame). Internally both matrices are stored frame-major,
/// so the coordinates of frame `f` are one contiguous slice and the hot loop
/// never copies or strides. The source count is fixed across frames; a
/// source with no physical presence in some frame is encoded far outside the
/// pixel grid, where Gaussian decay underflows its contribution to zero.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSources {
    /// x coordinates, frame-major, length `sources * frames`.
    x: Vec<f64>,
    /// y coordinates, frame-major, length `sources * frames`.
    y: Vec<f64>,
    sources: usize,
    frames: usize,
}

impl FrameSources {
    /// Builds frame sources from a pair of N x F coordinate matrices.
    ///
    /// # Errors
    ///
    /// Returns [`PsfVideoError::ShapeMismatch`](crate::PsfVideoError) if the
    /// matrices disagree in either dimension.
    pub fn from_arrays(x: &Array2<f64>, y: &Array2<f64>) -> Result<Self> {
        if x.dim() != y.dim() {
            return Err(shape_mismatch(
                x.dim(),
                y.dim(),
                "x and y source matrices must both be N x F",
            ));
        }

        let (sources, frames) = x.dim();

        // Transposing the N x F view yields frame-major iteration order.
        let x = x.t().iter().copied().collect();
        let y = y.t().iter().copied().collect();

        Ok(FrameSources {
            x,
            y,
            sources,
            frames,
        })
    }

    /// Builds frame sources from coordinate buffers already laid out
    /// frame-major (frame `f` occupying `[f * sources, (f + 1) * sources)`).
    ///
    /// # Errors
    ///
    /// Returns [`PsfVideoError::LengthMismatch`](crate::PsfVideoError) if
    /// either buffer does not hold exactly `sources * frames` values.
    pub fn from_flat(x: Vec<f64>, y: Vec<f64>, sources: usize, frames: usize) -> Result<Self> {
        let expected = sources * frames;

        if x.len() != expected {
            return Err(length_mismatch(
                expected,
                x.len(),
                "x coordinate buffer does not match sources * frames",
            ));
        }
        if y.len() != expected {
            return Err(length_mismatch(
                expected,
                y.len(),
                "y coordinate buffer does not match sources * frames",
            ));
        }

        Ok(FrameSources {
            x,
            y,
            sources,
            frames,
        })
    }

    /// Number of point sources per frame (N).
    #[inline]
    pub fn num_sources(&self) -> usize {
        self.sources
    }

    /// Number of frames (F).
    #[inline]
    pub fn num_frames(&self) -> usize {
        self.frames
    }

    /// x coordinates of the sources in `frame`, as one contiguous slice.
    #[inline]
    pub fn frame_x(&self, frame: usize) -> &[f64] {
        &self.x[frame * self.sources..(frame + 1) * self.sources]
    }

    /// y coordinates of the sources in `frame`, as one contiguous slice.
    #[inline]
    pub fn frame_y(&self, frame: usize) -> &[f64] {
        &self.y[frame * self.sources..(frame + 1) * self.sources]
    }
}
