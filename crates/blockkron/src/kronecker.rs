//! Kronecker products `I(s) ⊗ M` at block granularity.
//!
//! Block `(i, j)` of `M` appears in the expansion at block
//! `(i * s + k, j * s + k)` for every `k < s`; every other block is zero.
//! Products with the expansion are computed from `M` directly: each identity
//! index `k` contributes one stripe of the result, and a final permutation
//! interleaves the stripes.

use std::ops::Mul;

use blockkron_dense::matrix::{fill_zero, set_zero, to_col_major};
use blockkron_dense::{matmul_into, MatMut, MatRef, Matrix, Scalar};
use tracing::debug;
use faer::prelude::ReborrowMut;

use crate::block_matrix::BlockMatrix;
use crate::error::{Axis, BlockMatrixError, Result};
use crate::permutation::striped_to_interleaved;
use crate::sparsity::{Diagonal, Full, Sparsity};
use crate::storage::RawBuffer;

/// Lazy representation of `I(identity_size) ⊗ M`.
///
/// # Example
///
/// ```
/// use blockkron::{FullBlockMatrix, KroneckerExpansion};
/// use blockkron_dense::from_rows;
///
/// let m = FullBlockMatrix::new(from_rows(vec![vec![2.0]]).unwrap(), 1, 1).unwrap();
/// let k = KroneckerExpansion::new(m, 2).unwrap();
/// let y = (&k * &[1.0, 3.0][..]).unwrap();
/// assert_eq!(y, vec![2.0, 6.0]);
/// ```
#[derive(Debug, Clone)]
pub struct KroneckerExpansion<B, S = Full> {
    matrix: BlockMatrix<B, S>,
    identity_size: usize,
}

fn check_dim(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(BlockMatrixError::DimensionMismatch {
            what,
            expected,
            actual,
        });
    }
    Ok(())
}

impl<B: RawBuffer, S: Sparsity> KroneckerExpansion<B, S> {
    /// Wrap `matrix`; `identity_size` must be greater than one and the
    /// expanded dimensions must fit in `usize`.
    pub fn new(matrix: BlockMatrix<B, S>, identity_size: usize) -> Result<Self> {
        if identity_size <= 1 {
            return Err(BlockMatrixError::InvalidIdentitySize(identity_size));
        }
        let expanded = [
            matrix.rows(),
            matrix.cols(),
            matrix.block_rows(),
            matrix.block_cols(),
        ];
        if expanded.iter().any(|&n| identity_size.checked_mul(n).is_none()) {
            return Err(BlockMatrixError::IdentitySizeOverflow {
                identity_size,
                rows: matrix.rows(),
                cols: matrix.cols(),
                block_rows: matrix.block_rows(),
                block_cols: matrix.block_cols(),
            });
        }
        Ok(Self {
            matrix,
            identity_size,
        })
    }

    /// Build the block matrix and the expansion in one step.
    pub fn from_raw(raw: B, block_rows: usize, block_cols: usize, identity_size: usize) -> Result<Self> {
        Self::new(BlockMatrix::new(raw, block_rows, block_cols)?, identity_size)
    }

    #[inline]
    pub fn matrix(&self) -> &BlockMatrix<B, S> {
        &self.matrix
    }

    #[inline]
    pub fn identity_size(&self) -> usize {
        self.identity_size
    }

    pub fn into_inner(self) -> BlockMatrix<B, S> {
        self.matrix
    }

    /// Rows of the expanded matrix.
    #[inline]
    pub fn rows(&self) -> usize {
        self.identity_size * self.matrix.rows()
    }

    /// Columns of the expanded matrix.
    #[inline]
    pub fn cols(&self) -> usize {
        self.identity_size * self.matrix.cols()
    }

    /// Materialize the expansion.
    pub fn evaluate(&self) -> Matrix<B::Scalar> {
        let mut out = Matrix::zeros(self.rows(), self.cols());
        self.fill_expansion(out.as_mut());
        out
    }

    /// Materialize the expansion into `result`, reshaping it.
    pub fn evaluate_into(&self, result: &mut Matrix<B::Scalar>) {
        set_zero(result, self.rows(), self.cols());
        self.fill_expansion(result.as_mut());
    }

    /// Materialize the expansion into a view of exactly the expanded shape.
    pub fn evaluate_into_view(&self, mut result: MatMut<'_, B::Scalar>) -> Result<()> {
        check_dim("expansion rows", self.rows(), result.nrows())?;
        check_dim("expansion cols", self.cols(), result.ncols())?;
        fill_zero(result.rb_mut());
        self.fill_expansion(result);
        Ok(())
    }

    /// Copy every valid block of `M` onto its `s` diagonal positions.
    /// `out` is zero and of the expanded shape.
    fn fill_expansion(&self, mut out: MatMut<'_, B::Scalar>) {
        let s = self.identity_size;
        let (br, bc) = (self.matrix.block_rows(), self.matrix.block_cols());
        debug!(
            identity_size = s,
            num_blocks_vert = self.matrix.num_blocks_vert(),
            num_blocks_hor = self.matrix.num_blocks_hor(),
            block_rows = br,
            block_cols = bc,
            "evaluating kronecker expansion"
        );
        for ((i, j), block) in self.matrix.blocks() {
            for k in 0..s {
                out.rb_mut()
                    .submatrix_mut((i * s + k) * br, (j * s + k) * bc, br, bc)
                    .copy_from(block);
            }
        }
    }

    /// `result = (I ⊗ M) · diagonal`.
    ///
    /// Diagonal block `j` must have `s * block_cols(M)` rows, and there must
    /// be one block-row of `diagonal` per block-column of `M`.
    pub fn multiply_right<B2>(
        &self,
        result: &mut Matrix<B::Scalar>,
        diagonal: &BlockMatrix<B2, Diagonal>,
    ) -> Result<()>
    where
        B2: RawBuffer<Scalar = B::Scalar>,
    {
        let s = self.identity_size;
        let m = &self.matrix;
        let (br, bc) = (m.block_rows(), m.block_cols());
        let (nbv, nbh) = (m.num_blocks_vert(), m.num_blocks_hor());

        check_dim("diagonal block rows", s * bc, diagonal.block_rows())?;
        check_dim("diagonal block count", nbh, diagonal.num_blocks_vert())?;
        check_dim("diagonal rows", nbh * s * bc, diagonal.rows())?;

        debug!(
            identity_size = s,
            num_blocks_vert = nbv,
            num_blocks_hor = nbh,
            block_rows = br,
            block_cols = bc,
            result_cols = diagonal.cols(),
            "kronecker right multiplication"
        );

        set_zero(result, s * m.rows(), diagonal.cols());
        if nbh == 0 {
            return Ok(());
        }

        let dbc = diagonal.block_cols();
        let stripe_rows = m.rows();
        let mut striped = Matrix::zeros(result.nrows(), result.ncols());
        for j in 0..nbh.min(diagonal.num_diagonal_blocks()) {
            let column = m.column(j)?;
            if column.is_empty() {
                continue;
            }
            let d_block = diagonal.diagonal_block(j)?;
            for k in 0..s {
                let dst = striped.as_mut().submatrix_mut(
                    k * stripe_rows + column.start * br,
                    j * dbc,
                    column.len * br,
                    dbc,
                );
                matmul_into(dst, column.view, d_block.submatrix(k * bc, 0, bc, dbc))?;
            }
        }

        let perm = striped_to_interleaved(s, nbv, br)?;
        perm.apply_rows_into(result.as_mut(), striped.as_ref())?;
        Ok(())
    }

    /// `result = (I ⊗ M) · vector`.
    ///
    /// The `s` interleaved segments of `vector` are gathered into the columns
    /// of a `cols(M) x s` matrix `X`, multiplied once as `M · X`, and the
    /// columns of the product are interleaved back.
    pub fn multiply_right_vector(&self, result: &mut Vec<B::Scalar>, vector: &[B::Scalar]) -> Result<()> {
        let s = self.identity_size;
        let m = &self.matrix;
        let (br, bc) = (m.block_rows(), m.block_cols());
        let (nbv, nbh) = (m.num_blocks_vert(), m.num_blocks_hor());

        check_dim("vector length", self.cols(), vector.len())?;
        debug!(
            identity_size = s,
            num_blocks_vert = nbv,
            num_blocks_hor = nbh,
            block_rows = br,
            block_cols = bc,
            "kronecker vector multiplication"
        );

        let segments = striped_to_interleaved(s, nbh, bc)?
            .inverse()
            .apply_to_slice(vector)?;
        let mut products = Matrix::zeros(m.rows(), s);
        m.mul_dense_add_into(
            products.as_mut(),
            MatRef::from_column_major_slice(segments.as_slice(), m.cols(), s),
        )?;
        *result = striped_to_interleaved(s, nbv, br)?.apply_to_slice(&to_col_major(products.as_ref()))?;
        Ok(())
    }

    /// `result = diagonal · (I ⊗ M)`.
    ///
    /// Diagonal block `i` must have `s * block_rows(M)` columns, and there
    /// must be one block-column of `diagonal` per block-row of `M`.
    pub fn multiply_left<B2>(
        &self,
        result: &mut Matrix<B::Scalar>,
        diagonal: &BlockMatrix<B2, Diagonal>,
    ) -> Result<()>
    where
        B2: RawBuffer<Scalar = B::Scalar>,
    {
        let s = self.identity_size;
        let m = &self.matrix;
        let (br, bc) = (m.block_rows(), m.block_cols());
        let (nbv, nbh) = (m.num_blocks_vert(), m.num_blocks_hor());

        check_dim("diagonal block cols", s * br, diagonal.block_cols())?;
        check_dim("diagonal block count", nbv, diagonal.num_blocks_hor())?;
        check_dim("diagonal cols", nbv * s * br, diagonal.cols())?;

        debug!(
            identity_size = s,
            num_blocks_vert = nbv,
            num_blocks_hor = nbh,
            block_rows = br,
            block_cols = bc,
            result_rows = diagonal.rows(),
            "kronecker left multiplication"
        );

        set_zero(result, diagonal.rows(), s * m.cols());
        if nbv == 0 {
            return Ok(());
        }

        let dbr = diagonal.block_rows();
        let stripe_cols = m.cols();
        let mut striped = Matrix::zeros(result.nrows(), result.ncols());
        for i in 0..nbv.min(diagonal.num_diagonal_blocks()) {
            let row = m.row(i)?;
            if row.is_empty() {
                continue;
            }
            let d_block = diagonal.diagonal_block(i)?;
            for k in 0..s {
                let dst = striped.as_mut().submatrix_mut(
                    i * dbr,
                    k * stripe_cols + row.start * bc,
                    dbr,
                    row.len * bc,
                );
                matmul_into(dst, d_block.submatrix(0, k * br, dbr, br), row.view)?;
            }
        }

        let perm = striped_to_interleaved(s, nbh, bc)?;
        perm.apply_cols_into(result.as_mut(), striped.as_ref())?;
        Ok(())
    }
}

impl<B: RawBuffer, S: Sparsity> Mul<&[B::Scalar]> for &KroneckerExpansion<B, S> {
    type Output = Result<Vec<B::Scalar>>;

    fn mul(self, rhs: &[B::Scalar]) -> Self::Output {
        let mut result = Vec::new();
        self.multiply_right_vector(&mut result, rhs)?;
        Ok(result)
    }
}

impl<B: RawBuffer, S: Sparsity> Mul<&Vec<B::Scalar>> for &KroneckerExpansion<B, S> {
    type Output = Result<Vec<B::Scalar>>;

    fn mul(self, rhs: &Vec<B::Scalar>) -> Self::Output {
        self * rhs.as_slice()
    }
}

impl<B, S, B2> Mul<&BlockMatrix<B2, Diagonal>> for &KroneckerExpansion<B, S>
where
    B: RawBuffer,
    S: Sparsity,
    B2: RawBuffer<Scalar = B::Scalar>,
{
    type Output = Result<Matrix<B::Scalar>>;

    fn mul(self, rhs: &BlockMatrix<B2, Diagonal>) -> Self::Output {
        let mut result = Matrix::new();
        self.multiply_right(&mut result, rhs)?;
        Ok(result)
    }
}

impl<B, S, B2> Mul<&KroneckerExpansion<B, S>> for &BlockMatrix<B2, Diagonal>
where
    B: RawBuffer,
    S: Sparsity,
    B2: RawBuffer<Scalar = B::Scalar>,
{
    type Output = Result<Matrix<B::Scalar>>;

    fn mul(self, rhs: &KroneckerExpansion<B, S>) -> Self::Output {
        let mut result = Matrix::new();
        rhs.multiply_left(&mut result, self)?;
        Ok(result)
    }
}

/// Dense `I(identity_size) ⊗ raw` treating `block_rows x block_cols` blocks
/// of `raw` as single entries.
///
/// Materializes the full product; mostly useful as a reference for the
/// structured routines of [`KroneckerExpansion`].
pub fn kron_identity_blocks<T: Scalar>(
    raw: &Matrix<T>,
    block_rows: usize,
    block_cols: usize,
    identity_size: usize,
) -> Result<Matrix<T>> {
    if block_rows == 0 {
        return Err(BlockMatrixError::InvalidBlockSize { axis: Axis::Rows });
    }
    if block_cols == 0 {
        return Err(BlockMatrixError::InvalidBlockSize { axis: Axis::Cols });
    }
    let m: BlockMatrix<&Matrix<T>, Full> = BlockMatrix::new(raw, block_rows, block_cols)?;
    let s = identity_size;
    let (Some(rows), Some(cols)) = (s.checked_mul(raw.nrows()), s.checked_mul(raw.ncols())) else {
        return Err(BlockMatrixError::IdentitySizeOverflow {
            identity_size,
            rows: raw.nrows(),
            cols: raw.ncols(),
            block_rows,
            block_cols,
        });
    };
    let mut out = Matrix::zeros(rows, cols);
    for ((i, j), block) in m.blocks() {
        for k in 0..s {
            out.as_mut()
                .submatrix_mut((i * s + k) * block_rows, (j * s + k) * block_cols, block_rows, block_cols)
                .copy_from(block);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block_matrix::{DiagonalBlockMatrix, FullBlockMatrix, LowerTriangularBlockMatrix};
    use crate::error::ErrorKind;
    use blockkron_dense::from_rows;
    use crate::sparsity::LowerTriangular;

    fn m(rows: Vec<Vec<f64>>) -> Matrix<f64> {
        from_rows(rows).unwrap()
    }

    #[test]
    fn test_identity_size_must_exceed_one() {
        for s in [0, 1] {
            let bm = FullBlockMatrix::new(Matrix::<f64>::identity(2, 2), 1, 1).unwrap();
            let err = KroneckerExpansion::new(bm, s).unwrap_err();
            assert_eq!(err, BlockMatrixError::InvalidIdentitySize(s));
            assert_eq!(err.kind(), ErrorKind::Configuration);
        }
    }

    #[test]
    fn test_identity_expands_to_identity() {
        let k = KroneckerExpansion::<_, Full>::from_raw(Matrix::<f64>::identity(2, 2), 1, 1, 3).unwrap();
        assert_eq!(k.evaluate(), Matrix::<f64>::identity(6, 6));
    }

    #[test]
    fn test_scalar_expands_to_diagonal() {
        let k = KroneckerExpansion::<_, Full>::from_raw(m(vec![vec![2.0]]), 1, 1, 2).unwrap();
        assert_eq!(k.evaluate(), m(vec![vec![2.0, 0.0], vec![0.0, 2.0]]));
    }

    #[test]
    fn test_evaluate_places_blocks_on_shifted_diagonals() {
        // 1x2 blocks, M = [(a b | c d)]
        let raw = m(vec![vec![1.0, 2.0, 3.0, 4.0]]);
        let k = KroneckerExpansion::<_, Full>::from_raw(&raw, 1, 2, 2).unwrap();
        let e = k.evaluate();
        assert_eq!(
            e,
            m(vec![
                vec![1.0, 2.0, 0.0, 0.0, 3.0, 4.0, 0.0, 0.0],
                vec![0.0, 0.0, 1.0, 2.0, 0.0, 0.0, 3.0, 4.0],
            ])
        );
        assert_eq!(kron_identity_blocks(&raw, 1, 2, 2).unwrap(), e);
    }

    #[test]
    fn test_evaluate_ignores_upper_blocks_of_lower_triangular() {
        let raw = m(vec![vec![1.0, 99.0], vec![2.0, 3.0]]);
        let k = KroneckerExpansion::<_, LowerTriangular>::from_raw(&raw, 1, 1, 2).unwrap();
        let e = k.evaluate();
        assert_eq!(e[(0, 2)], 0.0);
        assert_eq!(e[(2, 0)], 2.0);
        assert_eq!(e[(3, 1)], 2.0);
        assert_eq!(e[(3, 3)], 3.0);
    }

    #[test]
    fn test_evaluate_into_view_shape_check() {
        let k = KroneckerExpansion::<_, Full>::from_raw(Matrix::<f64>::identity(2, 2), 1, 1, 2).unwrap();
        let mut wrong = Matrix::<f64>::zeros(4, 3);
        let err = k.evaluate_into_view(wrong.as_mut()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Dimension);

        let mut big = Matrix::from_fn(5, 5, |_, _| 7.0);
        k.evaluate_into_view(big.as_mut().submatrix_mut(1, 1, 4, 4)).unwrap();
        assert_eq!(big[(0, 0)], 7.0);
        assert_eq!(big[(1, 1)], 1.0);
        assert_eq!(big[(1, 2)], 0.0);

        let mut target = Matrix::from_fn(1, 1, |_, _| 3.0);
        k.evaluate_into(&mut target);
        assert_eq!(target, Matrix::<f64>::identity(4, 4));
    }

    #[test]
    fn test_multiply_right_vector_by_hand() {
        // M = [[1, 2], [3, 4]] with 1x1 blocks, s = 2
        // (I⊗M) acts as M on entries (0, 2) and on entries (1, 3)
        let k = KroneckerExpansion::<_, Full>::from_raw(m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]), 1, 1, 2)
            .unwrap();
        let v = vec![1.0, 10.0, 2.0, 20.0];
        let y = (&k * &v).unwrap();
        assert_eq!(y, vec![5.0, 50.0, 11.0, 110.0]);
    }

    #[test]
    fn test_multiply_right_vector_length_check() {
        let k = KroneckerExpansion::<_, Full>::from_raw(Matrix::<f64>::identity(2, 2), 1, 1, 2).unwrap();
        let err = (&k * &[1.0, 2.0, 3.0][..]).unwrap_err();
        assert_eq!(
            err,
            BlockMatrixError::DimensionMismatch {
                what: "vector length",
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_multiply_right_with_diagonal() {
        let raw = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let k = KroneckerExpansion::<_, Full>::from_raw(&raw, 1, 1, 2).unwrap();
        // two diagonal blocks of size (s * bc) x 1 = 2x1
        let d_raw = m(vec![vec![1.0, 0.0], vec![2.0, 0.0], vec![0.0, 3.0], vec![0.0, 4.0]]);
        let d = DiagonalBlockMatrix::new(&d_raw, 2, 1).unwrap();

        let product = (&k * &d).unwrap();
        let expected = &k.evaluate() * &d.evaluate();
        assert_eq!(product, expected);
    }

    #[test]
    fn test_multiply_right_precondition_errors() {
        let k = KroneckerExpansion::<_, Full>::from_raw(Matrix::<f64>::identity(4, 4), 2, 2, 2).unwrap();
        let mut result = Matrix::new();

        // block rows must be s * block_cols = 4
        let d = DiagonalBlockMatrix::new(Matrix::<f64>::zeros(6, 6), 3, 3).unwrap();
        assert!(matches!(
            k.multiply_right(&mut result, &d),
            Err(BlockMatrixError::DimensionMismatch {
                what: "diagonal block rows",
                ..
            })
        ));

        // one block-row per block-column of M
        let d = DiagonalBlockMatrix::new(Matrix::<f64>::zeros(4, 4), 4, 4).unwrap();
        assert!(matches!(
            k.multiply_right(&mut result, &d),
            Err(BlockMatrixError::DimensionMismatch {
                what: "diagonal block count",
                ..
            })
        ));
    }

    #[test]
    fn test_multiply_left_with_diagonal() {
        let raw = m(vec![vec![1.0, 0.0], vec![2.0, 3.0]]);
        let k = KroneckerExpansion::<_, LowerTriangular>::from_raw(&raw, 1, 1, 2).unwrap();
        // two diagonal blocks of size 1 x (s * br) = 1x2
        let d_raw = m(vec![vec![1.0, -1.0, 0.0, 0.0], vec![0.0, 0.0, 2.0, 5.0]]);
        let d = DiagonalBlockMatrix::new(&d_raw, 1, 2).unwrap();

        let product = (&d * &k).unwrap();
        let expected = &d.evaluate() * &k.evaluate();
        assert_eq!(product, expected);
    }

    #[test]
    fn test_multiply_left_precondition_errors() {
        let k = KroneckerExpansion::<_, Full>::from_raw(Matrix::<f64>::identity(2, 2), 1, 1, 3).unwrap();
        let d = DiagonalBlockMatrix::new(Matrix::<f64>::zeros(2, 4), 1, 2).unwrap();
        let err = (&d * &k).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Dimension);
    }

    #[test]
    fn test_empty_matrix_gives_shaped_zero_results() {
        let bm: FullBlockMatrix<Matrix<f64>> =
            BlockMatrix::empty(crate::BlockSize::dynamic(), crate::BlockSize::fixed(2, 2)).unwrap();
        let k = KroneckerExpansion::new(bm, 3).unwrap();
        let e = k.evaluate();
        assert_eq!((e.nrows(), e.ncols()), (0, 0));
        assert_eq!((&k * &Vec::<f64>::new()).unwrap(), Vec::<f64>::new());

        let d = DiagonalBlockMatrix::new(Matrix::<f64>::zeros(0, 5), 6, 5).unwrap();
        let product = (&k * &d).unwrap();
        assert_eq!((product.nrows(), product.ncols()), (0, 5));
    }

    #[test]
    fn test_kron_identity_blocks_rejects_bad_blocks() {
        let raw = Matrix::<f64>::zeros(3, 3);
        assert!(kron_identity_blocks(&raw, 2, 1, 2).is_err());
        assert!(kron_identity_blocks(&raw, 0, 1, 2).is_err());
        let e = kron_identity_blocks(&raw, 1, 1, 0).unwrap();
        assert_eq!((e.nrows(), e.ncols()), (0, 0));
    }

    #[test]
    fn test_lower_triangular_view_of_borrowed_matrix() {
        let raw = m(vec![vec![1.0, 5.0], vec![2.0, 3.0]]);
        let lower = LowerTriangularBlockMatrix::new(&raw, 1, 1).unwrap();
        let k = KroneckerExpansion::new(lower, 2).unwrap();
        let v = vec![1.0; 4];
        let y = (&k * &v).unwrap();
        // rows of the lower triangle: [1], [2, 3]
        assert_eq!(y, vec![1.0, 1.0, 5.0, 5.0]);
    }

    #[test]
    fn test_identity_size_overflow_is_configuration_error() {
        let bm: FullBlockMatrix<Matrix<f64>> =
            BlockMatrix::empty(crate::BlockSize::dynamic(), crate::BlockSize::fixed(2, 3)).unwrap();
        let err = KroneckerExpansion::new(bm, usize::MAX).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(matches!(
            err,
            BlockMatrixError::IdentitySizeOverflow {
                identity_size: usize::MAX,
                block_rows: 2,
                block_cols: 3,
                ..
            }
        ));

        let bm: FullBlockMatrix<Matrix<f64>> =
            BlockMatrix::empty(crate::BlockSize::dynamic(), crate::BlockSize::fixed(1, 1)).unwrap();
        assert!(KroneckerExpansion::new(bm, usize::MAX).is_ok());
    }

    #[test]
    fn test_multiply_right_with_wide_diagonal_grid() {
        // D is a 2x3 grid of 2x2 diagonal blocks; block-column 2 is empty
        let raw = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let k = KroneckerExpansion::<_, Full>::from_raw(&raw, 1, 1, 2).unwrap();
        let d_raw = Matrix::from_fn(4, 6, |i, j| (1 + i + 4 * j) as f64);
        let d = DiagonalBlockMatrix::new(&d_raw, 2, 2).unwrap();

        let product = (&k * &d).unwrap();
        assert_eq!((product.nrows(), product.ncols()), (4, 6));
        assert_eq!(product, &k.evaluate() * &d.evaluate());
        for i in 0..4 {
            assert_eq!(product[(i, 4)], 0.0);
            assert_eq!(product[(i, 5)], 0.0);
        }
    }

    #[test]
    fn test_multiply_right_vector_matches_evaluate_with_blocks() {
        // 2x3 block grid of 2x1 blocks, s = 3
        let raw = Matrix::from_fn(4, 3, |i, j| (3 * i + j) as f64 - 4.0);
        let lower = LowerTriangularBlockMatrix::new(&raw, 2, 1).unwrap();
        let k = KroneckerExpansion::new(lower, 3).unwrap();
        let v: Vec<f64> = (0..k.cols()).map(|i| i as f64 * 0.5 - 2.0).collect();

        let y = (&k * &v).unwrap();
        let expected = blockkron_dense::matvec(k.evaluate().as_ref(), &v).unwrap();
        assert_eq!(y, expected);
    }
}
