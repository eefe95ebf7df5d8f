//! Construction and reshaping helpers for [`faer::Mat`] and its views.
//!
//! Storage, views and indexing are faer's own: [`Matrix`] is a column-major
//! [`Mat`], and sub-rectangles are borrowed as [`MatRef`] / [`MatMut`]. The
//! functions here add the fallible constructors and shape checks that faer
//! expresses as panics.

pub use faer::{Mat, MatMut, MatRef};

use crate::error::{DenseError, Result};
use crate::scalar::Scalar;

/// Owned column-major dense matrix.
pub type Matrix<T> = Mat<T>;

/// Build a matrix from a list of rows.
pub fn from_rows<T: Scalar>(rows: Vec<Vec<T>>) -> Result<Matrix<T>> {
    let nrows = rows.len();
    let ncols = rows.first().map_or(0, Vec::len);
    for (row, r) in rows.iter().enumerate() {
        if r.len() != ncols {
            return Err(DenseError::RaggedRows {
                row,
                expected: ncols,
                actual: r.len(),
            });
        }
    }
    Ok(Mat::from_fn(nrows, ncols, |i, j| rows[i][j]))
}

/// Build a matrix from column-major data.
pub fn from_col_major<T: Scalar>(nrows: usize, ncols: usize, data: &[T]) -> Result<Matrix<T>> {
    if data.len() != nrows * ncols {
        return Err(DenseError::ShapeMismatch {
            op: "from_col_major",
            expected_rows: nrows * ncols,
            expected_cols: 1,
            actual_rows: data.len(),
            actual_cols: 1,
        });
    }
    Ok(Mat::from_fn(nrows, ncols, |i, j| data[i + j * nrows]))
}

/// Whether the view has no entries.
#[inline]
pub fn is_empty<T>(m: MatRef<'_, T>) -> bool {
    m.nrows() == 0 || m.ncols() == 0
}

/// Reshape to `nrows x ncols` zeros.
pub fn set_zero<T: Scalar>(m: &mut Matrix<T>, nrows: usize, ncols: usize) {
    *m = Mat::zeros(nrows, ncols);
}

/// Overwrite every entry of a view with zero.
pub fn fill_zero<T: Scalar>(mut m: MatMut<'_, T>) {
    m.fill(T::zero());
}

/// Reshape to `nrows x ncols` entries marked unset.
pub fn resize_unset<T: Scalar>(m: &mut Matrix<T>, nrows: usize, ncols: usize) {
    *m = Mat::from_fn(nrows, ncols, |_, _| T::unset());
}

/// Fail unless `actual` equals `expected`.
pub fn check_shape(op: &'static str, expected: (usize, usize), actual: (usize, usize)) -> Result<()> {
    if expected != actual {
        return Err(DenseError::ShapeMismatch {
            op,
            expected_rows: expected.0,
            expected_cols: expected.1,
            actual_rows: actual.0,
            actual_cols: actual.1,
        });
    }
    Ok(())
}

/// Copy `src` into `dst`, which must have the same shape.
pub fn copy_into<T: Scalar>(mut dst: MatMut<'_, T>, src: MatRef<'_, T>) -> Result<()> {
    check_shape(
        "copy",
        (src.nrows(), src.ncols()),
        (dst.nrows(), dst.ncols()),
    )?;
    dst.copy_from(src);
    Ok(())
}

/// Column vector view over a slice.
#[inline]
pub fn col_view<T>(x: &[T]) -> MatRef<'_, T> {
    MatRef::from_column_major_slice(x, x.len(), 1)
}

/// Mutable column vector view over a slice.
#[inline]
pub fn col_view_mut<T>(x: &mut [T]) -> MatMut<'_, T> {
    let n = x.len();
    MatMut::from_column_major_slice_mut(x, n, 1)
}

/// Entries of `m` in column-major order.
pub fn to_col_major<T: Scalar>(m: MatRef<'_, T>) -> Vec<T> {
    (0..m.ncols())
        .flat_map(|j| (0..m.nrows()).map(move |i| m[(i, j)]))
        .collect()
}
