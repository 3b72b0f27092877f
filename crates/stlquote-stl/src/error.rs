//! Error types for STL decoding.

use thiserror::Error;

/// Errors that can occur while decoding an STL buffer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StlError {
    /// The binary header declares more triangles than the buffer holds.
    #[error("malformed STL: header declares {declared} triangles ({required} bytes) but buffer has {available} bytes")]
    MalformedInput {
        /// Triangle count from the header.
        declared: u32,
        /// Bytes required to hold that many triangles.
        required: usize,
        /// Bytes actually available.
        available: usize,
    },

    /// The declared triangle count does not fit in addressable memory.
    #[error("malformed STL: triangle count {0} overflows buffer size")]
    TriangleCountOverflow(u32),

    /// A binary triangle record holds a NaN or infinite coordinate.
    #[error("malformed STL: triangle {triangle} has a non-finite coordinate")]
    NonFiniteVertex {
        /// Index of the offending triangle.
        triangle: usize,
    },

    /// The buffer is too short to hold a binary header.
    #[error("binary STL header needs {expected} bytes, got {got}")]
    InvalidHeader {
        /// Required header size.
        expected: usize,
        /// Actual buffer size.
        got: usize,
    },
}

/// Result type for STL operations.
pub type Result<T> = std::result::Result<T, StlError>;
