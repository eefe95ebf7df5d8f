//! Error types for block matrix and Kronecker expansion operations.

use blockkron_dense::DenseError;
use thiserror::Error;

/// Axis of a block grid, used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Rows,
    Cols,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Rows => f.write_str("rows"),
            Axis::Cols => f.write_str("cols"),
        }
    }
}

/// Coarse classification of [`BlockMatrixError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Block size or identity size is invalid, or a shape does not divide.
    Configuration,
    /// Operand shapes are incompatible.
    Dimension,
    /// Block coordinates are outside the grid or the sparsity pattern.
    Index,
}

/// Error type for block matrix operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockMatrixError {
    /// A configured block dimension is zero.
    #[error("Block {axis} must be positive")]
    InvalidBlockSize { axis: Axis },

    /// Runtime block size contradicts the fixed one.
    #[error("Block {axis} is fixed to {configured}, got {runtime}")]
    BlockSizeMismatch {
        axis: Axis,
        configured: usize,
        runtime: usize,
    },

    /// Dynamic block dimension without a positive runtime value.
    #[error("Block {axis} is dynamic and needs a positive size, got {runtime:?}")]
    UnresolvedBlockSize { axis: Axis, runtime: Option<usize> },

    /// Raw buffer extent is not a multiple of the block extent.
    #[error("Matrix {axis} ({extent}) is not a multiple of the block {axis} ({block})")]
    NotDivisible {
        axis: Axis,
        extent: usize,
        block: usize,
    },

    /// Kronecker identity size must exceed one.
    #[error("Identity size must be greater than 1, got {0}")]
    InvalidIdentitySize(usize),

    /// Expanded dimensions do not fit in `usize`.
    #[error("Identity size {identity_size} overflows a {rows}x{cols} matrix with {block_rows}x{block_cols} blocks")]
    IdentitySizeOverflow {
        identity_size: usize,
        rows: usize,
        cols: usize,
        block_rows: usize,
        block_cols: usize,
    },

    /// Operand shapes are incompatible.
    #[error("Dimension mismatch in {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Shape error reported by a dense operation.
    #[error(transparent)]
    Dense(#[from] DenseError),

    /// Block coordinates outside the block grid.
    #[error("Block ({row}, {col}) out of bounds for a {num_blocks_vert}x{num_blocks_hor} block grid")]
    BlockOutOfBounds {
        row: usize,
        col: usize,
        num_blocks_vert: usize,
        num_blocks_hor: usize,
    },

    /// Block coordinates excluded by the sparsity pattern.
    #[error("Block ({row}, {col}) is not part of the {pattern} pattern")]
    BlockOutsidePattern {
        row: usize,
        col: usize,
        pattern: &'static str,
    },
}

impl BlockMatrixError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidBlockSize { .. }
            | Self::BlockSizeMismatch { .. }
            | Self::UnresolvedBlockSize { .. }
            | Self::NotDivisible { .. }
            | Self::InvalidIdentitySize(_)
            | Self::IdentitySizeOverflow { .. } => ErrorKind::Configuration,
            Self::DimensionMismatch { .. } | Self::Dense(_) => ErrorKind::Dimension,
            Self::BlockOutOfBounds { .. } | Self::BlockOutsidePattern { .. } => ErrorKind::Index,
        }
    }
}

/// Result type for block matrix operations.
pub type Result<T> = std::result::Result<T, BlockMatrixError>;
