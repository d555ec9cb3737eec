//! Error types for the boundary-eval library.

use thiserror::Error;

/// Result type for boundary-eval operations.
pub type Result<T> = std::result::Result<T, BoundaryEvalError>;

/// Error types that can occur during boundary evaluation.
#[derive(Error, Debug)]
pub enum BoundaryEvalError {
    /// Error during JSON parsing or serialization.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error during I/O operations.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error raised by polars when building result frames.
    #[error("DataFrame error: {0}")]
    PolarsError(#[from] polars::prelude::PolarsError),

    /// Invalid threshold specification.
    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),

    /// Invalid evaluation configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A 2-D grid payload is malformed (ragged rows, wrong length, empty).
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// Predicted and ground-truth maps disagree on shape.
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// A sample loader failed to produce its data.
    #[error("Loader failure: {0}")]
    Loader(String),

    /// The parallel worker pool could not be constructed.
    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    /// Missing required column in a result DataFrame.
    #[error("Missing column: {0}")]
    MissingColumn(String),
}
