//! Error types for the model crate.

use thiserror::Error;

/// Errors that can occur when binding or reshaping tabular data.
///
/// Only schema-level failures surface as errors. User-input failures
/// (invalid cell text, duplicate column labels, stale removal targets)
/// are reported through `bool` results on the corresponding operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// The input table is not a uniform grid of typed columns.
    #[error("schema violation: {reason}")]
    Schema { reason: String },

    /// A square grid was required but the input dimensions disagree.
    #[error("input of {rows}x{cols} is not square")]
    NotSquare { rows: usize, cols: usize },

    /// A batch assignment whose length disagrees with the fixed dimension.
    #[error("size mismatch: expected {expected} elements, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Result type for model binding and reshaping operations.
pub type ModelResult<T> = Result<T, ModelError>;
