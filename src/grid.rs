//! Pixel grid coordinates shared by every frame of a simulated video.

use crate::error::{empty_axis, Result};

/// Sampling coordinates of the detector, one sorted-or-not sequence per axis.
///
/// The grid is fixed for the whole video and never mutated by the simulator.
/// Coordinates are arbitrary finite reals; nothing requires them to be
/// uniform or monotone, although microscopy grids usually are.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl PixelGrid {
    /// Builds a grid from explicit per-axis coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`PsfVideoError::EmptyAxis`](crate::PsfVideoError) if either
    /// axis is empty.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        if x.is_empty() {
            return Err(empty_axis("x", "pixel grid needs at least one column"));
        }
        if y.is_empty() {
            return Err(empty_axis("y", "pixel grid needs at least one row"));
        }

        Ok(PixelGrid { x, y })
    }

    /// Builds a uniform grid with `width x height` pixels spaced `spacing`
    /// apart, starting at the origin. Convenience for benches and demos.
    pub fn uniform(width: usize, height: usize, spacing: f64) -> Result<Self> {
        let x = (0..width).map(|i| i as f64 * spacing).collect();
        let y = (0..height).map(|j| j as f64 * spacing).collect();

        Self::new(x, y)
    }

    /// Coordinates along the x axis.
    #[inline]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Coordinates along the y axis.
    #[inline]
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Number of pixels along the x axis.
    #[inline]
    pub fn width(&self) -> usize {
        self.x.len()
    }

    /// Number of pixels along the y axis.
    #[inline]
    pub fn height(&self) -> usize {
        self.y.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty_axes() {
        assert!(PixelGrid::new(vec![], vec![0.0]).is_err());
        assert!(PixelGrid::new(vec![0.0], vec![]).is_err());
        assert!(PixelGrid::new(vec![0.0], vec![0.0]).is_ok());
    }

    #[test]
    fn test_uniform_spacing() {
        let grid = PixelGrid::uniform(4, 3, 0.5).unwrap();
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.x(), &[0.0, 0.5, 1.0, 1.5]);
        assert_eq!(grid.y(), &[0.0, 0.5, 1.0]);
    }
}
