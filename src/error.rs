//! Error types for psfvideo operations.
//!
//! All input validation happens at construction time, before any output
//! allocation, so a shape error can never leave a partially written tensor
//! behind.

use std::fmt;

/// Errors that can occur while constructing simulation inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PsfVideoError {
    /// The x and y source matrices disagree in shape.
    ShapeMismatch {
        /// Shape of the x-coordinate matrix as (rows, cols).
        x_shape: (usize, usize),
        /// Shape of the y-coordinate matrix as (rows, cols).
        y_shape: (usize, usize),
        /// Human-readable error message.
        message: String,
    },
    /// A flat coordinate buffer does not hold `sources * frames` values.
    LengthMismatch {
        /// The length the buffer was expected to have.
        expected: usize,
        /// The length the buffer actually has.
        actual: usize,
        /// Human-readable error message.
        message: String,
    },
    /// A pixel-grid axis has no coordinates.
    EmptyAxis {
        /// Which axis was empty ("x" or "y").
        axis: &'static str,
        /// Human-readable error message.
        message: String,
    },
}

impl fmt::Display for PsfVideoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PsfVideoError::ShapeMismatch {
                x_shape,
                y_shape,
                message,
            } => write!(
                f,
                "Source shape mismatch: {} (x is {}x{}, y is {}x{})",
                message, x_shape.0, x_shape.1, y_shape.0, y_shape.1
            ),
            PsfVideoError::LengthMismatch {
                expected,
                actual,
                message,
            } => write!(
                f,
                "Coordinate length mismatch: {} (expected {} values, got {})",
                message, expected, actual
            ),
            PsfVideoError::EmptyAxis { axis, message } => {
                write!(f, "Empty {} axis: {}", axis, message)
            }
        }
    }
}

impl std::error::Error for PsfVideoError {}

/// Result type alias for psfvideo operations.
pub type Result<T> = std::result::Result<T, PsfVideoError>;

/// Creates a shape mismatch error.
pub fn shape_mismatch(
    x_shape: (usize, usize),
    y_shape: (usize, usize),
    message: impl Into<String>,
) -> PsfVideoError {
    PsfVideoError::ShapeMismatch {
        x_shape,
        y_shape,
        message: message.into(),
    }
}

/// Creates a length mismatch error.
pub fn length_mismatch(
    expected: usize,
    actual: usize,
    message: impl Into<String>,
) -> PsfVideoError {
    PsfVideoError::LengthMismatch {
        expected,
        actual,
        message: message.into(),
    }
}

/// Creates an empty axis error.
pub fn empty_axis(axis: &'static str, message: impl Into<String>) -> PsfVideoError {
    PsfVideoError::EmptyAxis {
        axis,
        message: message.into(),
    }
}
