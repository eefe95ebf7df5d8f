//! Fixed or dynamic block dimensions and their resolution.

use tracing::trace;

use crate::error::{Axis, BlockMatrixError, Result};

/// Configured block dimensions; `None` leaves an axis dynamic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockSize {
    pub rows: Option<usize>,
    pub cols: Option<usize>,
}

/// Resolved, positive block dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockShape {
    pub rows: usize,
    pub cols: usize,
}

impl BlockSize {
    /// Both axes fixed.
    pub const fn fixed(rows: usize, cols: usize) -> Self {
        Self {
            rows: Some(rows),
            cols: Some(cols),
        }
    }

    /// Both axes dynamic.
    pub const fn dynamic() -> Self {
        Self {
            rows: None,
            cols: None,
        }
    }

    pub const fn rows_fixed(rows: usize) -> Self {
        Self {
            rows: Some(rows),
            cols: None,
        }
    }

    pub const fn cols_fixed(cols: usize) -> Self {
        Self {
            rows: None,
            cols: Some(cols),
        }
    }

    /// Resolve both axes against runtime sizes.
    pub fn resolve(&self, runtime: BlockSize) -> Result<BlockShape> {
        let shape = BlockShape {
            rows: resolve_dim(Axis::Rows, self.rows, runtime.rows)?,
            cols: resolve_dim(Axis::Cols, self.cols, runtime.cols)?,
        };
        trace!(rows = shape.rows, cols = shape.cols, "resolved block size");
        Ok(shape)
    }
}

impl From<BlockShape> for BlockSize {
    fn from(shape: BlockShape) -> Self {
        Self::fixed(shape.rows, shape.cols)
    }
}

/// Reconcile one configured block dimension with a runtime value.
///
/// A fixed dimension must be positive and agree with any runtime value; a
/// dynamic one takes the runtime value, which must be present and positive.
pub fn resolve_dim(axis: Axis, configured: Option<usize>, runtime: Option<usize>) -> Result<usize> {
    match (configured, runtime) {
        (Some(0), _) => Err(BlockMatrixError::InvalidBlockSize { axis }),
        (Some(c), Some(r)) if r != c => Err(BlockMatrixError::BlockSizeMismatch {
            axis,
            configured: c,
            runtime: r,
        }),
        (Some(c), _) => Ok(c),
        (None, Some(r)) if r > 0 => Ok(r),
        (None, runtime) => Err(BlockMatrixError::UnresolvedBlockSize { axis, runtime }),
    }
}
