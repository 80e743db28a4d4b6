//! Degenerate-input conditions for the numeric routines.

use thiserror::Error;

/// Numeric input a routine cannot give a meaningful answer for.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeomError {
    #[error("cannot normalize a zero-length vector")]
    ZeroLengthVector,
    #[error("segment has a zero-length direction")]
    ZeroLengthSegment,
    #[error("matrix is singular (determinant {det})")]
    SingularMatrix { det: f32 },
}
