//! Dense buffers addressed as a grid of equally sized blocks.

use std::marker::PhantomData;

use blockkron_dense::{copy_into, matmul_add_into, MatMut, MatRef, Matrix, Scalar};
use tracing::trace;

use crate::block_size::{BlockShape, BlockSize};
use crate::error::{Axis, BlockMatrixError, Result};
use crate::sparsity::{Diagonal, Full, LowerTriangular, Sparsity};
use crate::storage::{RawBuffer, RawBufferMut, ResizableBuffer};
use faer::prelude::ReborrowMut;

/// A dense buffer viewed as a `num_blocks_vert x num_blocks_hor` grid of
/// `block_rows x block_cols` blocks.
///
/// The sparsity pattern `S` restricts which blocks are addressable. Entries
/// of the raw buffer outside the pattern are never read by block
/// operations, so they may hold anything.
///
/// # Example
///
/// ```
/// use blockkron::{BlockMatrix, LowerTriangular};
/// use blockkron_dense::Matrix;
///
/// let raw = Matrix::<f64>::zeros(4, 4);
/// let m = BlockMatrix::<_, LowerTriangular>::new(raw, 2, 2).unwrap();
/// assert_eq!(m.num_blocks_vert(), 2);
/// assert!(m.at(1, 0).is_ok());
/// assert!(m.at(0, 1).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct BlockMatrix<B, S = Full> {
    raw: B,
    config: BlockSize,
    block: BlockShape,
    num_blocks_vert: usize,
    num_blocks_hor: usize,
    _sparsity: PhantomData<S>,
}

pub type FullBlockMatrix<B> = BlockMatrix<B, Full>;
pub type DiagonalBlockMatrix<B> = BlockMatrix<B, Diagonal>;
pub type LowerTriangularBlockMatrix<B> = BlockMatrix<B, LowerTriangular>;

/// A contiguous run of blocks within one block-column or block-row.
#[derive(Debug, Clone, Copy)]
pub struct BlockSpan<'a, T> {
    /// Grid index of the first block in the run.
    pub start: usize,
    /// Number of blocks in the run.
    pub len: usize,
    /// The blocks, stacked (columns) or side by side (rows).
    pub view: MatRef<'a, T>,
}

impl<T> BlockSpan<'_, T> {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Grid indices covered by the run.
    #[inline]
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.start + self.len
    }
}

fn block_grid(nrows: usize, ncols: usize, block: BlockShape) -> Result<(usize, usize)> {
    if nrows % block.rows != 0 {
        return Err(BlockMatrixError::NotDivisible {
            axis: Axis::Rows,
            extent: nrows,
            block: block.rows,
        });
    }
    if ncols % block.cols != 0 {
        return Err(BlockMatrixError::NotDivisible {
            axis: Axis::Cols,
            extent: ncols,
            block: block.cols,
        });
    }
    Ok((nrows / block.rows, ncols / block.cols))
}

impl<B: RawBuffer, S: Sparsity> BlockMatrix<B, S> {
    /// Wrap `raw` with dynamically sized `block_rows x block_cols` blocks.
    pub fn new(raw: B, block_rows: usize, block_cols: usize) -> Result<Self> {
        Self::with_config(raw, BlockSize::dynamic(), BlockSize::fixed(block_rows, block_cols))
    }

    /// Wrap `raw`, resolving the configured block size against `runtime`.
    pub fn with_config(raw: B, configured: BlockSize, runtime: BlockSize) -> Result<Self> {
        let block = configured.resolve(runtime)?;
        let (num_blocks_vert, num_blocks_hor) = block_grid(raw.nrows(), raw.ncols(), block)?;
        Ok(Self {
            raw,
            config: configured,
            block,
            num_blocks_vert,
            num_blocks_hor,
            _sparsity: PhantomData,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.num_blocks_vert * self.block.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.num_blocks_hor * self.block.cols
    }

    #[inline]
    pub fn num_blocks_vert(&self) -> usize {
        self.num_blocks_vert
    }

    #[inline]
    pub fn num_blocks_hor(&self) -> usize {
        self.num_blocks_hor
    }

    #[inline]
    pub fn block_rows(&self) -> usize {
        self.block.rows
    }

    #[inline]
    pub fn block_cols(&self) -> usize {
        self.block.cols
    }

    #[inline]
    pub fn block_shape(&self) -> BlockShape {
        self.block
    }

    /// Block size configuration this matrix was built with.
    #[inline]
    pub fn config(&self) -> BlockSize {
        self.config
    }

    /// The underlying buffer.
    #[inline]
    pub fn raw(&self) -> &B {
        &self.raw
    }

    pub fn into_raw(self) -> B {
        self.raw
    }

    /// Read-only view of the whole raw buffer.
    #[inline]
    pub fn as_mat_ref(&self) -> MatRef<'_, B::Scalar> {
        self.raw.as_mat_ref()
    }

    /// Whether `(row, col)` is inside the grid and the sparsity pattern.
    #[inline]
    pub fn is_valid_block(&self, row: usize, col: usize) -> bool {
        row < self.num_blocks_vert && col < self.num_blocks_hor && S::is_valid(row, col)
    }

    fn check_block(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.num_blocks_vert || col >= self.num_blocks_hor {
            return Err(BlockMatrixError::BlockOutOfBounds {
                row,
                col,
                num_blocks_vert: self.num_blocks_vert,
                num_blocks_hor: self.num_blocks_hor,
            });
        }
        if !S::is_valid(row, col) {
            return Err(BlockMatrixError::BlockOutsidePattern {
                row,
                col,
                pattern: S::KIND.name(),
            });
        }
        Ok(())
    }

    /// View of block `(row, col)`.
    pub fn at(&self, row: usize, col: usize) -> Result<MatRef<'_, B::Scalar>> {
        self.check_block(row, col)?;
        Ok(self.as_mat_ref().submatrix(
            row * self.block.rows,
            col * self.block.cols,
            self.block.rows,
            self.block.cols,
        ))
    }

    fn column_span(&self, col: usize, start: usize, end: usize) -> BlockSpan<'_, B::Scalar> {
        BlockSpan {
            start,
            len: end - start,
            view: self.as_mat_ref().submatrix(
                start * self.block.rows,
                col * self.block.cols,
                (end - start) * self.block.rows,
                self.block.cols,
            ),
        }
    }

    /// All valid blocks of block-column `col`, stacked.
    pub fn column(&self, col: usize) -> Result<BlockSpan<'_, B::Scalar>> {
        if col >= self.num_blocks_hor {
            return Err(BlockMatrixError::BlockOutOfBounds {
                row: 0,
                col,
                num_blocks_vert: self.num_blocks_vert,
                num_blocks_hor: self.num_blocks_hor,
            });
        }
        let extent = S::column_extent(col, self.num_blocks_vert);
        Ok(self.column_span(col, extent.start, extent.end))
    }

    /// Valid blocks of block-column `col` from block-row `row` downwards.
    pub fn column_from(&self, col: usize, row: usize) -> Result<BlockSpan<'_, B::Scalar>> {
        self.check_block(row, col)?;
        let extent = S::column_extent(col, self.num_blocks_vert);
        Ok(self.column_span(col, row, extent.end))
    }

    /// All valid blocks of block-row `row`, side by side.
    pub fn row(&self, row: usize) -> Result<BlockSpan<'_, B::Scalar>> {
        if row >= self.num_blocks_vert {
            return Err(BlockMatrixError::BlockOutOfBounds {
                row,
                col: 0,
                num_blocks_vert: self.num_blocks_vert,
                num_blocks_hor: self.num_blocks_hor,
            });
        }
        let extent = S::row_extent(row, self.num_blocks_hor);
        Ok(BlockSpan {
            start: extent.start,
            len: extent.len(),
            view: self.as_mat_ref().submatrix(
                row * self.block.rows,
                extent.start * self.block.cols,
                self.block.rows,
                extent.len() * self.block.cols,
            ),
        })
    }

    /// Valid blocks in column-major grid order.
    pub fn blocks(&self) -> impl Iterator<Item = ((usize, usize), MatRef<'_, B::Scalar>)> + '_ {
        let view = self.as_mat_ref();
        let (nbv, block) = (self.num_blocks_vert, self.block);
        (0..self.num_blocks_hor).flat_map(move |j| {
            S::column_extent(j, nbv).map(move |i| {
                (
                    (i, j),
                    view.submatrix(i * block.rows, j * block.cols, block.rows, block.cols),
                )
            })
        })
    }

    /// Dense copy with every entry outside the pattern set to zero.
    pub fn evaluate(&self) -> Matrix<B::Scalar> {
        trace!(
            rows = self.rows(),
            cols = self.cols(),
            pattern = S::KIND.name(),
            "evaluating block matrix"
        );
        let mut out = Matrix::zeros(self.rows(), self.cols());
        for j in 0..self.num_blocks_hor {
            let extent = S::column_extent(j, self.num_blocks_vert);
            if extent.is_empty() {
                continue;
            }
            let span = self.column_span(j, extent.start, extent.end);
            out.as_mut()
                .submatrix_mut(
                    span.start * self.block.rows,
                    j * self.block.cols,
                    span.view.nrows(),
                    span.view.ncols(),
                )
                .copy_from(span.view);
        }
        out
    }

    /// Accumulate `self * rhs` into `dst`, reading only the valid blocks.
    ///
    /// `rhs` has [`cols`](Self::cols) rows and `dst` has [`rows`](Self::rows)
    /// rows; both have the same number of columns.
    pub fn mul_dense_add_into(
        &self,
        mut dst: MatMut<'_, B::Scalar>,
        rhs: MatRef<'_, B::Scalar>,
    ) -> Result<()> {
        if rhs.nrows() != self.cols() {
            return Err(BlockMatrixError::DimensionMismatch {
                what: "right-hand side rows",
                expected: self.cols(),
                actual: rhs.nrows(),
            });
        }
        if dst.nrows() != self.rows() || dst.ncols() != rhs.ncols() {
            return Err(BlockMatrixError::DimensionMismatch {
                what: "product rows",
                expected: self.rows(),
                actual: dst.nrows(),
            });
        }
        let (br, bc) = (self.block.rows, self.block.cols);
        for j in 0..self.num_blocks_hor {
            let extent = S::column_extent(j, self.num_blocks_vert);
            if extent.is_empty() {
                continue;
            }
            let span = self.column_span(j, extent.start, extent.end);
            matmul_add_into(
                dst.rb_mut().subrows_mut(span.start * br, span.len * br),
                span.view,
                rhs.subrows(j * bc, bc),
            )?;
        }
        Ok(())
    }

    /// Owned copy keeping the block layout.
    pub fn to_owned(&self) -> BlockMatrix<Matrix<B::Scalar>, S> {
        BlockMatrix {
            raw: self.as_mat_ref().to_owned(),
            config: self.config,
            block: self.block,
            num_blocks_vert: self.num_blocks_vert,
            num_blocks_hor: self.num_blocks_hor,
            _sparsity: PhantomData,
        }
    }

    /// Borrowing block matrix over the same buffer.
    pub fn as_view(&self) -> BlockMatrix<MatRef<'_, B::Scalar>, S> {
        BlockMatrix {
            raw: self.as_mat_ref(),
            config: self.config,
            block: self.block,
            num_blocks_vert: self.num_blocks_vert,
            num_blocks_hor: self.num_blocks_hor,
            _sparsity: PhantomData,
        }
    }
}

impl<B: RawBufferMut, S: Sparsity> BlockMatrix<B, S> {
    /// Mutable view of block `(row, col)`.
    pub fn at_mut(&mut self, row: usize, col: usize) -> Result<MatMut<'_, B::Scalar>> {
        self.check_block(row, col)?;
        let block = self.block;
        Ok(self.raw.as_mat_mut().submatrix_mut(
            row * block.rows,
            col * block.cols,
            block.rows,
            block.cols,
        ))
    }

    /// Overwrite block `(row, col)` with `src`.
    pub fn set_block(&mut self, row: usize, col: usize, src: MatRef<'_, B::Scalar>) -> Result<()> {
        copy_into(self.at_mut(row, col)?, src)?;
        Ok(())
    }
}

impl<B: ResizableBuffer, S: Sparsity> BlockMatrix<B, S> {
    fn set_grid(&mut self, num_blocks_vert: usize, num_blocks_hor: usize) {
        self.num_blocks_vert = num_blocks_vert;
        self.num_blocks_hor = num_blocks_hor;
    }

    /// Reshape to a `num_blocks_vert x num_blocks_hor` grid of unset entries.
    pub fn resize(&mut self, num_blocks_vert: usize, num_blocks_hor: usize) {
        trace!(num_blocks_vert, num_blocks_hor, "resizing block matrix");
        self.raw.resize_unset(
            num_blocks_vert * self.block.rows,
            num_blocks_hor * self.block.cols,
        );
        self.set_grid(num_blocks_vert, num_blocks_hor);
    }

    /// Reshape to a `num_blocks_vert x num_blocks_hor` grid of zeros.
    pub fn set_zero(&mut self, num_blocks_vert: usize, num_blocks_hor: usize) {
        trace!(num_blocks_vert, num_blocks_hor, "zeroing block matrix");
        self.raw.resize_zeroed(
            num_blocks_vert * self.block.rows,
            num_blocks_hor * self.block.cols,
        );
        self.set_grid(num_blocks_vert, num_blocks_hor);
    }

    /// Change the block size, keeping the block counts; contents are zeroed.
    pub fn set_block_size(&mut self, block_rows: usize, block_cols: usize) -> Result<()> {
        let block = self.config.resolve(BlockSize::fixed(block_rows, block_cols))?;
        trace!(block_rows, block_cols, "changing block size");
        self.block = block;
        self.set_zero(self.num_blocks_vert, self.num_blocks_hor);
        Ok(())
    }
}

impl<T: Scalar, S: Sparsity> BlockMatrix<Matrix<T>, S> {
    /// Owned block matrix over an empty buffer.
    pub fn empty(configured: BlockSize, runtime: BlockSize) -> Result<Self> {
        Self::with_config(Matrix::new(), configured, runtime)
    }
}

impl<B: RawBuffer> BlockMatrix<B, Diagonal> {
    /// Number of blocks on the diagonal.
    #[inline]
    pub fn num_diagonal_blocks(&self) -> usize {
        self.num_blocks_vert.min(self.num_blocks_hor)
    }

    /// View of diagonal block `i`.
    pub fn diagonal_block(&self, i: usize) -> Result<MatRef<'_, B::Scalar>> {
        self.at(i, i)
    }
}

impl<B: RawBufferMut> BlockMatrix<B, Diagonal> {
    pub fn diagonal_block_mut(&mut self, i: usize) -> Result<MatMut<'_, B::Scalar>> {
        self.at_mut(i, i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    /// 4x6 matrix with entry (i, j) = 10 * i + j.
    fn numbered(nrows: usize, ncols: usize) -> Matrix<f64> {
        Matrix::from_fn(nrows, ncols, |i, j| (10 * i + j) as f64)
    }

    #[test]
    fn test_dimensions() {
        let m = FullBlockMatrix::new(numbered(4, 6), 2, 3).unwrap();
        assert_eq!(m.rows(), 4);
        assert_eq!(m.cols(), 6);
        assert_eq!(m.num_blocks_vert(), 2);
        assert_eq!(m.num_blocks_hor(), 2);
        assert_eq!(m.block_rows(), 2);
        assert_eq!(m.block_cols(), 3);
    }

    #[test]
    fn test_not_divisible() {
        let err = FullBlockMatrix::new(numbered(5, 6), 2, 3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(matches!(
            err,
            BlockMatrixError::NotDivisible {
                axis: Axis::Rows,
                ..
            }
        ));
    }

    #[test]
    fn test_fixed_block_size_configuration() {
        let raw = numbered(4, 4);
        assert!(FullBlockMatrix::with_config(&raw, BlockSize::fixed(2, 2), BlockSize::dynamic()).is_ok());
        assert!(FullBlockMatrix::with_config(&raw, BlockSize::fixed(2, 2), BlockSize::fixed(2, 2)).is_ok());

        let zero = FullBlockMatrix::with_config(&raw, BlockSize::fixed(0, 2), BlockSize::dynamic());
        assert_eq!(zero.unwrap_err().kind(), ErrorKind::Configuration);

        let mismatch =
            FullBlockMatrix::with_config(&raw, BlockSize::fixed(1, 1), BlockSize::fixed(2, 2));
        assert!(matches!(
            mismatch,
            Err(BlockMatrixError::BlockSizeMismatch { .. })
        ));

        let unresolved = FullBlockMatrix::with_config(&raw, BlockSize::dynamic(), BlockSize::dynamic());
        assert!(matches!(
            unresolved,
            Err(BlockMatrixError::UnresolvedBlockSize { .. })
        ));
    }

    #[test]
    fn test_at_addresses_block() {
        let raw = numbered(4, 6);
        let m = FullBlockMatrix::new(&raw, 2, 3).unwrap();
        let b = m.at(1, 1).unwrap();
        assert_eq!((b.nrows(), b.ncols()), (2, 3));
        assert_eq!(b[(0, 0)], 23.0);
        assert_eq!(b[(1, 2)], 35.0);

        assert!(matches!(
            m.at(2, 0),
            Err(BlockMatrixError::BlockOutOfBounds { row: 2, col: 0, .. })
        ));
    }

    #[test]
    fn test_lower_triangular_rejects_upper_blocks() {
        let m = LowerTriangularBlockMatrix::new(numbered(4, 4), 2, 2).unwrap();
        let err = m.at(0, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Index);
        assert!(m.at(1, 0).is_ok());
        assert!(!m.is_valid_block(0, 1));
        assert!(m.is_valid_block(1, 1));
    }

    #[test]
    fn test_column_extents() {
        let raw = numbered(6, 6);

        let full = FullBlockMatrix::new(&raw, 2, 2).unwrap();
        let col = full.column(1).unwrap();
        assert_eq!((col.start, col.len), (0, 3));
        assert_eq!((col.view.nrows(), col.view.ncols()), (6, 2));

        let lower = LowerTriangularBlockMatrix::new(&raw, 2, 2).unwrap();
        let col = lower.column(1).unwrap();
        assert_eq!((col.start, col.len), (1, 2));
        assert_eq!((col.view.nrows(), col.view.ncols()), (4, 2));
        assert_eq!(col.view[(0, 0)], 22.0);

        let tail = lower.column_from(0, 2).unwrap();
        assert_eq!(tail.range(), 2..3);
        assert_eq!(tail.view[(0, 0)], 40.0);
        assert!(lower.column_from(2, 1).is_err());

        let diag = DiagonalBlockMatrix::new(&raw, 2, 2).unwrap();
        let col = diag.column(2).unwrap();
        assert_eq!((col.start, col.len), (2, 1));
        assert_eq!(col.view[(1, 1)], 55.0);
    }

    #[test]
    fn test_row_extents() {
        let raw = numbered(6, 6);
        let lower = LowerTriangularBlockMatrix::new(&raw, 2, 2).unwrap();
        let row = lower.row(1).unwrap();
        assert_eq!(row.range(), 0..2);
        assert_eq!((row.view.nrows(), row.view.ncols()), (2, 4));
        assert_eq!(row.view[(1, 3)], 33.0);

        let diag = DiagonalBlockMatrix::new(&raw, 2, 2).unwrap();
        let row = diag.row(0).unwrap();
        assert_eq!(row.range(), 0..1);
        assert!(diag.row(3).is_err());
    }

    #[test]
    fn test_evaluate_zeroes_outside_pattern() {
        let lower = LowerTriangularBlockMatrix::new(numbered(4, 4), 2, 2).unwrap();
        let dense = lower.evaluate();
        assert_eq!(dense[(0, 2)], 0.0);
        assert_eq!(dense[(1, 3)], 0.0);
        assert_eq!(dense[(2, 0)], 20.0);
        assert_eq!(dense[(3, 3)], 33.0);

        let diag = DiagonalBlockMatrix::new(numbered(4, 4), 2, 2).unwrap();
        let dense = diag.evaluate();
        assert_eq!(dense[(2, 0)], 0.0);
        assert_eq!(dense[(1, 1)], 11.0);
    }

    #[test]
    fn test_blocks_iterator_visits_valid_blocks() {
        let lower = LowerTriangularBlockMatrix::new(numbered(6, 6), 2, 2).unwrap();
        let coords: Vec<(usize, usize)> = lower.blocks().map(|(c, _)| c).collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (2, 0), (1, 1), (2, 1), (2, 2)]);
    }

    #[test]
    fn test_at_mut_writes_through_reference() {
        let mut raw = Matrix::<f64>::zeros(4, 4);
        {
            let mut m = FullBlockMatrix::new(&mut raw, 2, 2).unwrap();
            let block = Matrix::from_fn(2, 2, |_, _| 1.5);
            m.set_block(1, 0, block.as_ref()).unwrap();
            m.at_mut(0, 1).unwrap()[(1, 1)] = 9.0;
        }
        assert_eq!(raw[(2, 0)], 1.5);
        assert_eq!(raw[(3, 1)], 1.5);
        assert_eq!(raw[(1, 3)], 9.0);
        assert_eq!(raw[(0, 0)], 0.0);
    }

    #[test]
    fn test_set_block_shape_mismatch() {
        let mut m = FullBlockMatrix::new(Matrix::<f64>::zeros(4, 4), 2, 2).unwrap();
        let wrong = Matrix::<f64>::zeros(3, 2);
        let err = m.set_block(0, 0, wrong.as_ref()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Dimension);
    }

    #[test]
    fn test_resize_and_set_zero() {
        let mut m = FullBlockMatrix::new(numbered(2, 2), 1, 2).unwrap();
        m.resize(3, 2);
        assert_eq!(m.rows(), 3);
        assert_eq!(m.cols(), 4);
        assert!(m.at(2, 1).unwrap()[(0, 0)].is_nan());

        m.set_zero(1, 1);
        assert_eq!(m.raw(), &Matrix::zeros(1, 2));
    }

    #[test]
    fn test_set_block_size() {
        let mut m: FullBlockMatrix<Matrix<f64>> =
            BlockMatrix::empty(BlockSize::dynamic(), BlockSize::fixed(2, 2)).unwrap();
        assert_eq!((m.rows(), m.cols()), (0, 0));

        m.set_zero(2, 3);
        m.set_block_size(3, 1).unwrap();
        assert_eq!(m.block_rows(), 3);
        assert_eq!(m.num_blocks_hor(), 3);
        assert_eq!((m.raw().nrows(), m.raw().ncols()), (6, 3));

        assert!(matches!(
            m.set_block_size(3, 0),
            Err(BlockMatrixError::UnresolvedBlockSize { .. })
        ));
        // failed reconfiguration leaves the matrix untouched
        assert_eq!(m.block_cols(), 1);
    }

    #[test]
    fn test_fixed_config_rejects_other_block_size() {
        let mut m: FullBlockMatrix<Matrix<f64>> =
            BlockMatrix::empty(BlockSize::fixed(2, 2), BlockSize::dynamic()).unwrap();
        assert!(m.set_block_size(2, 2).is_ok());
        assert!(matches!(
            m.set_block_size(3, 2),
            Err(BlockMatrixError::BlockSizeMismatch { .. })
        ));
    }

    #[test]
    fn test_diagonal_blocks() {
        let mut raw = numbered(4, 6);
        let mut diag = DiagonalBlockMatrix::new(&mut raw, 2, 2).unwrap();
        assert_eq!(diag.num_diagonal_blocks(), 2);
        assert_eq!(diag.diagonal_block(1).unwrap()[(0, 0)], 22.0);

        diag.diagonal_block_mut(0).unwrap().fill(0.0);
        assert!(diag.diagonal_block(2).is_err());
        assert_eq!(raw[(1, 1)], 0.0);
    }

    #[test]
    fn test_to_owned_and_view() {
        let raw = numbered(4, 4);
        let borrowed = LowerTriangularBlockMatrix::new(&raw, 2, 2).unwrap();
        let owned = borrowed.to_owned();
        assert_eq!(owned.raw(), &raw);
        assert_eq!(owned.as_view().at(1, 0).unwrap()[(0, 0)], 20.0);
    }

    #[test]
    fn test_evaluate_wide_diagonal_grid() {
        // 2x3 grid of 1x2 blocks: block-column 2 has no diagonal block
        let diag = DiagonalBlockMatrix::new(Matrix::from_fn(2, 6, |_, _| 1.0), 1, 2).unwrap();
        assert!(diag.column(2).unwrap().is_empty());

        let dense = diag.evaluate();
        let expected = Matrix::from_fn(2, 6, |i, j| if j / 2 == i { 1.0 } else { 0.0 });
        assert_eq!(dense, expected);
    }

    #[test]
    fn test_evaluate_wide_lower_triangular_grid() {
        // 1x2 grid of 1x2 blocks: block-column 1 lies above the diagonal
        let lower =
            LowerTriangularBlockMatrix::new(Matrix::from_fn(1, 4, |_, _| 1.0), 1, 2).unwrap();
        let span = lower.column(1).unwrap();
        assert_eq!((span.view.nrows(), span.view.ncols()), (0, 2));

        let dense = lower.evaluate();
        assert_eq!(dense, Matrix::from_fn(1, 4, |_, j| if j < 2 { 1.0 } else { 0.0 }));

        let wider = LowerTriangularBlockMatrix::new(numbered(4, 12), 2, 3).unwrap();
        let dense = wider.evaluate();
        assert_eq!(dense[(2, 3)], 23.0);
        assert_eq!(dense[(1, 6)], 0.0);
        assert_eq!(dense[(3, 11)], 0.0);
    }

    #[test]
    fn test_mul_dense_add_into_matches_evaluated_product() {
        let lower = LowerTriangularBlockMatrix::new(numbered(6, 4), 2, 2).unwrap();
        let rhs = Matrix::from_fn(4, 3, |i, j| (i + 2 * j) as f64 - 1.5);
        let mut dst = Matrix::from_fn(6, 3, |_, _| 1.0);
        lower.mul_dense_add_into(dst.as_mut(), rhs.as_ref()).unwrap();

        let expected = &lower.evaluate() * &rhs;
        for i in 0..6 {
            for j in 0..3 {
                assert_eq!(dst[(i, j)], expected[(i, j)] + 1.0);
            }
        }

        let wide = DiagonalBlockMatrix::new(Matrix::from_fn(2, 6, |_, _| 1.0), 1, 2).unwrap();
        let mut out = Matrix::<f64>::zeros(2, 1);
        let ones = Matrix::from_fn(6, 1, |_, _| 1.0);
        wide.mul_dense_add_into(out.as_mut(), ones.as_ref()).unwrap();
        assert_eq!(out, Matrix::from_fn(2, 1, |_, _| 2.0));

        let mut bad = Matrix::<f64>::zeros(5, 3);
        assert!(lower.mul_dense_add_into(bad.as_mut(), rhs.as_ref()).is_err());
    }
}
