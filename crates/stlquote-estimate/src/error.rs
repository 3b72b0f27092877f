//! Error types for the estimator.

use thiserror::Error;

/// Errors that can occur while estimating.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimateError {
    /// Invalid estimate settings.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

/// Result type for estimator operations.
pub type Result<T> = std::result::Result<T, EstimateError>;
