//! Shape-checked matrix products on faer views.

use faer::linalg::matmul::matmul as faer_matmul;
use faer::{Accum, Par};

use crate::error::{DenseError, Result};
use crate::matrix::{col_view, col_view_mut, MatMut, MatRef, Matrix};
use crate::scalar::Scalar;

fn check_product<T>(
    op: &'static str,
    dst: (usize, usize),
    a: MatRef<'_, T>,
    b: MatRef<'_, T>,
) -> Result<()> {
    if a.ncols() != b.nrows() {
        return Err(DenseError::ShapeMismatch {
            op,
            expected_rows: a.ncols(),
            expected_cols: b.ncols(),
            actual_rows: b.nrows(),
            actual_cols: b.ncols(),
        });
    }
    if dst != (a.nrows(), b.ncols()) {
        return Err(DenseError::ShapeMismatch {
            op,
            expected_rows: a.nrows(),
            expected_cols: b.ncols(),
            actual_rows: dst.0,
            actual_cols: dst.1,
        });
    }
    Ok(())
}

/// Overwrite `dst` with `a * b`.
pub fn matmul_into<T: Scalar>(
    mut dst: MatMut<'_, T>,
    a: MatRef<'_, T>,
    b: MatRef<'_, T>,
) -> Result<()> {
    check_product("matmul_into", (dst.nrows(), dst.ncols()), a, b)?;
    if a.ncols() == 0 {
        dst.fill(T::zero());
        return Ok(());
    }
    faer_matmul(&mut dst, Accum::Replace, a, b, T::one(), Par::Seq);
    Ok(())
}

/// Accumulate `a * b` into `dst`.
pub fn matmul_add_into<T: Scalar>(
    mut dst: MatMut<'_, T>,
    a: MatRef<'_, T>,
    b: MatRef<'_, T>,
) -> Result<()> {
    check_product("matmul_add_into", (dst.nrows(), dst.ncols()), a, b)?;
    if a.ncols() == 0 {
        return Ok(());
    }
    faer_matmul(&mut dst, Accum::Add, a, b, T::one(), Par::Seq);
    Ok(())
}

/// Matrix product `a * b` into a fresh matrix.
pub fn matmul<T: Scalar>(a: MatRef<'_, T>, b: MatRef<'_, T>) -> Result<Matrix<T>> {
    let mut out = Matrix::zeros(a.nrows(), b.ncols());
    matmul_add_into(out.as_mut(), a, b)?;
    Ok(out)
}

/// Accumulate `a * x` into `y`.
pub fn matvec_add_into<T: Scalar>(y: &mut [T], a: MatRef<'_, T>, x: &[T]) -> Result<()> {
    if x.len() != a.ncols() || y.len() != a.nrows() {
        return Err(DenseError::ShapeMismatch {
            op: "matvec",
            expected_rows: a.nrows(),
            expected_cols: a.ncols(),
            actual_rows: y.len(),
            actual_cols: x.len(),
        });
    }
    matmul_add_into(col_view_mut(y), a, col_view(x))
}

/// Matrix-vector product `a * x`.
pub fn matvec<T: Scalar>(a: MatRef<'_, T>, x: &[T]) -> Result<Vec<T>> {
    let mut y = vec![T::zero(); a.nrows()];
    matvec_add_into(&mut y, a, x)?;
    Ok(y)
}
