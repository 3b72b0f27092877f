//! Error types for mesh construction.

use thiserror::Error;

/// Errors that can occur when building mesh data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// Vertex array length is not a whole number of triangles.
    #[error("vertex array length {0} is not a multiple of 9")]
    InvalidLength(usize),

    /// Normal array does not line up with the soup it describes.
    #[error("normal array length {normals} does not match vertex array length {vertices}")]
    NormalsMismatch {
        /// Length of the normal array.
        normals: usize,
        /// Length of the vertex array.
        vertices: usize,
    },
}

/// Result type for mesh operations.
pub type Result<T> = std::result::Result<T, MeshError>;
