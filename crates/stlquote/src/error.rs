//! Error types for the pipeline.

use std::path::PathBuf;

use stlquote_estimate::EstimateError;
use stlquote_mesh::MeshError;
use stlquote_stl::StlError;
use thiserror::Error;

/// Errors that abort the pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The buffer is not a valid STL file.
    #[error("file is not a valid STL: {0}")]
    Stl(#[from] StlError),

    /// Mesh data is inconsistent.
    #[error("mesh error: {0}")]
    Mesh(#[from] MeshError),

    /// Estimate settings were rejected.
    #[error(transparent)]
    Estimate(#[from] EstimateError),

    /// Configuration could not be parsed or is out of range.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
