//! Error types for blockkron-dense

use thiserror::Error;

/// Errors raised by dense matrix operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DenseError {
    /// Operand shapes are incompatible
    #[error("Shape mismatch in {op}: expected ({expected_rows}, {expected_cols}), got ({actual_rows}, {actual_cols})")]
    ShapeMismatch {
        op: &'static str,
        expected_rows: usize,
        expected_cols: usize,
        actual_rows: usize,
        actual_cols: usize,
    },

    /// Index out of bounds
    #[error("Index out of bounds: ({row}, {col}) is out of bounds for a ({nrows}, {ncols}) matrix")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        nrows: usize,
        ncols: usize,
    },

    /// Index sequence is not a bijection on `0..len`
    #[error("Invalid permutation: {message}")]
    InvalidPermutation { message: String },

    /// Nested rows of different lengths
    #[error("Row {row} has {actual} entries, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

/// Result type for dense matrix operations
pub type Result<T> = std::result::Result<T, DenseError>;
