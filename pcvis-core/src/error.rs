//! Error types shared across the geometry, projection and scene modules.

use thiserror::Error;

/// Errors raised while validating inputs at the library boundary.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PcvisError {
    /// The input is not a rectangular numeric array.
    #[error("Invalid input type: {0}")]
    InvalidInputType(String),

    /// The box format discriminator is not one of `corners` or `center`.
    #[error("Invalid box format '{0}', expected 'corners' or 'center'")]
    InvalidFormat(String),

    /// A homogeneous transform could not be inverted.
    #[error("The {0} matrix is singular and cannot be inverted")]
    SingularMatrix(&'static str),

    /// A buffer does not have the shape required by the operation.
    #[error("Dimension mismatch: expected {expected}, got shape {actual:?}")]
    DimensionMismatch {
        /// Human readable description of the required shape.
        expected: String,
        /// Actual `(rows, cols)` of the offending buffer.
        actual: (usize, usize),
    },

    /// A color name is not part of the named palette and is not a hex string.
    #[error("Unknown color '{0}'")]
    UnknownColor(String),

    /// A center-form box has a non-positive or non-finite extent.
    #[error("Box {index} has invalid extents {length}x{width}x{height}")]
    InvalidExtent {
        /// Row index of the box in its buffer.
        index: usize,
        /// Extent along X.
        length: f64,
        /// Extent along Y.
        width: f64,
        /// Extent along Z.
        height: f64,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PcvisError>;

impl From<PcvisError> for std::io::Error {
    fn from(err: PcvisError) -> Self {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, err)
    }
}
