//! Free-function helpers for assembling and reshaping dense matrices.

use std::ops::Mul;

use rand::Rng;
use faer::prelude::ReborrowMut;

use crate::error::{DenseError, Result};
use crate::matmul::{matmul_add_into, matmul_into};
use crate::matrix::{check_shape, col_view, is_empty, MatMut, MatRef, Matrix};
use crate::scalar::Scalar;

/// Place each input on the diagonal of a zero matrix, in order.
pub fn block_diagonal<T: Scalar>(blocks: &[Matrix<T>]) -> Matrix<T> {
    match blocks {
        [] => Matrix::new(),
        [single] => single.clone(),
        _ => {
            let rows = blocks.iter().map(|b| b.nrows()).sum();
            let cols = blocks.iter().map(|b| b.ncols()).sum();
            let mut out = Matrix::zeros(rows, cols);
            let (mut r, mut c) = (0, 0);
            for b in blocks {
                out.as_mut()
                    .submatrix_mut(r, c, b.nrows(), b.ncols())
                    .copy_from(b.as_ref());
                r += b.nrows();
                c += b.ncols();
            }
            out
        }
    }
}

/// Block-diagonal matrix holding `copies` copies of `block`.
pub fn replicate_block_diagonal<T: Scalar>(block: &Matrix<T>, copies: usize) -> Matrix<T> {
    match copies {
        0 => Matrix::new(),
        1 => block.clone(),
        _ => {
            let (br, bc) = (block.nrows(), block.ncols());
            let mut out = Matrix::zeros(copies * br, copies * bc);
            for k in 0..copies {
                out.as_mut()
                    .submatrix_mut(k * br, k * bc, br, bc)
                    .copy_from(block.as_ref());
            }
            out
        }
    }
}

/// Stack matrices on top of each other, skipping ones with no entries.
pub fn concat_vertical<T: Scalar>(matrices: &[Matrix<T>]) -> Result<Matrix<T>> {
    let nonempty: Vec<&Matrix<T>> = matrices.iter().filter(|m| !is_empty(m.as_ref())).collect();
    let Some(first) = nonempty.first() else {
        return Ok(Matrix::new());
    };
    let ncols = first.ncols();
    let mut nrows = 0;
    for m in &nonempty {
        check_shape("concat_vertical", (m.nrows(), ncols), (m.nrows(), m.ncols()))?;
        nrows += m.nrows();
    }

    let mut out = Matrix::zeros(nrows, ncols);
    let mut row = 0;
    for m in nonempty {
        out.as_mut().subrows_mut(row, m.nrows()).copy_from(m.as_ref());
        row += m.nrows();
    }
    Ok(out)
}

/// Place matrices side by side, skipping ones with zero rows.
pub fn concat_horizontal<T: Scalar>(matrices: &[Matrix<T>]) -> Result<Matrix<T>> {
    let nonempty: Vec<&Matrix<T>> = matrices.iter().filter(|m| m.nrows() > 0).collect();
    let Some(first) = nonempty.first() else {
        return Ok(Matrix::new());
    };
    let nrows = first.nrows();
    let mut ncols = 0;
    for m in &nonempty {
        check_shape("concat_horizontal", (nrows, m.ncols()), (m.nrows(), m.ncols()))?;
        ncols += m.ncols();
    }

    let mut out = Matrix::zeros(nrows, ncols);
    let mut col = 0;
    for m in nonempty {
        out.as_mut().subcols_mut(col, m.ncols()).copy_from(m.as_ref());
        col += m.ncols();
    }
    Ok(out)
}

/// Drop row `row`, shifting the rows below it up.
pub fn remove_row<T: Scalar>(matrix: &mut Matrix<T>, row: usize) -> Result<()> {
    if row >= matrix.nrows() {
        return Err(DenseError::IndexOutOfBounds {
            row,
            col: 0,
            nrows: matrix.nrows(),
            ncols: matrix.ncols(),
        });
    }
    let src = &*matrix;
    let out = Matrix::from_fn(src.nrows() - 1, src.ncols(), |i, j| {
        src[(if i < row { i } else { i + 1 }, j)]
    });
    *matrix = out;
    Ok(())
}

/// Drop column `col`, shifting the columns right of it left.
pub fn remove_col<T: Scalar>(matrix: &mut Matrix<T>, col: usize) -> Result<()> {
    if col >= matrix.ncols() {
        return Err(DenseError::IndexOutOfBounds {
            row: 0,
            col,
            nrows: matrix.nrows(),
            ncols: matrix.ncols(),
        });
    }
    let src = &*matrix;
    let out = Matrix::from_fn(src.nrows(), src.ncols() - 1, |i, j| {
        src[(i, if j < col { j } else { j + 1 })]
    });
    *matrix = out;
    Ok(())
}

/// Rows `first, first + step, first + 2 * step, ...` of `matrix`.
pub fn select_rows<T: Scalar>(matrix: MatRef<'_, T>, step: usize, first: usize) -> Result<Matrix<T>> {
    if step == 0 {
        return Err(DenseError::InvalidArgument {
            message: "row step must be positive".to_string(),
        });
    }
    if first > matrix.nrows() {
        return Err(DenseError::IndexOutOfBounds {
            row: first,
            col: 0,
            nrows: matrix.nrows(),
            ncols: matrix.ncols(),
        });
    }
    let count = (matrix.nrows() - first).div_ceil(step);
    Ok(Matrix::from_fn(count, matrix.ncols(), |i, j| {
        matrix[(first + i * step, j)]
    }))
}

/// Row selector `S` such that `S * M` keeps rows `first, first + step, ...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionMatrix {
    step: usize,
    first: usize,
}

impl SelectionMatrix {
    /// `step` must be positive.
    pub fn new(step: usize, first: usize) -> Result<Self> {
        if step == 0 {
            return Err(DenseError::InvalidArgument {
                message: "row step must be positive".to_string(),
            });
        }
        Ok(Self { step, first })
    }

    #[inline]
    pub fn step(&self) -> usize {
        self.step
    }

    #[inline]
    pub fn first(&self) -> usize {
        self.first
    }

    /// Selected rows of `matrix`.
    pub fn select<T: Scalar>(&self, matrix: MatRef<'_, T>) -> Result<Matrix<T>> {
        select_rows(matrix, self.step, self.first)
    }
}

impl<T: Scalar> Mul<&Matrix<T>> for &SelectionMatrix {
    type Output = Result<Matrix<T>>;

    fn mul(self, rhs: &Matrix<T>) -> Self::Output {
        self.select(rhs.as_ref())
    }
}

impl<T: Scalar> Mul<MatRef<'_, T>> for &SelectionMatrix {
    type Output = Result<Matrix<T>>;

    fn mul(self, rhs: MatRef<'_, T>) -> Self::Output {
        self.select(rhs)
    }
}

/// Accumulate the lower triangle of `Aᵀ·A` into the square block of `dst`
/// starting at `(offset, offset)`. Entries above the diagonal are untouched.
pub fn add_ata_lower_at<T: Scalar>(mut dst: MatMut<'_, T>, a: MatRef<'_, T>, offset: usize) -> Result<()> {
    let n = a.ncols();
    if dst.nrows() != dst.ncols() || offset + n > dst.nrows() {
        return Err(DenseError::ShapeMismatch {
            op: "add_ata",
            expected_rows: offset + n,
            expected_cols: offset + n,
            actual_rows: dst.nrows(),
            actual_cols: dst.ncols(),
        });
    }
    for i in 0..n {
        let column = dst.rb_mut().submatrix_mut(offset + i, offset + i, n - i, 1);
        matmul_add_into(column, a.subcols(i, n - i).transpose(), a.subcols(i, 1))?;
    }
    Ok(())
}

/// `dst += Aᵀ·A` on the lower triangle.
pub fn add_ata_lower<T: Scalar>(dst: MatMut<'_, T>, a: MatRef<'_, T>) -> Result<()> {
    add_ata_lower_at(dst, a, 0)
}

/// Lower triangle (diagonal included) of `Aᵀ·A`; the strict upper triangle is zero.
pub fn ata_lower<T: Scalar>(a: MatRef<'_, T>) -> Matrix<T> {
    let mut out = Matrix::zeros(a.ncols(), a.ncols());
    // square of matching size by construction
    let _ = add_ata_lower_at(out.as_mut(), a, 0);
    out
}

/// `size x size` matrix holding the lower triangle of `Aᵀ·A` as the diagonal
/// block at `(offset, offset)`; every other entry is zero.
pub fn ata_lower_block<T: Scalar>(a: MatRef<'_, T>, offset: usize, size: usize) -> Result<Matrix<T>> {
    let mut out = Matrix::zeros(size, size);
    add_ata_lower_at(out.as_mut(), a, offset)?;
    Ok(out)
}

/// Mirror the lower triangle into the upper one.
pub fn lower_to_symmetric<T: Scalar>(matrix: &mut Matrix<T>) -> Result<()> {
    check_shape(
        "lower_to_symmetric",
        (matrix.nrows(), matrix.nrows()),
        (matrix.nrows(), matrix.ncols()),
    )?;
    for j in 1..matrix.ncols() {
        for i in 0..j {
            matrix[(i, j)] = matrix[(j, i)];
        }
    }
    Ok(())
}

/// `R·M + t` applied to every column of `M`: rotates and translates a set of
/// points stored as columns.
pub fn transform<T: Scalar>(
    points: MatRef<'_, T>,
    rotation: MatRef<'_, T>,
    translation: &[T],
) -> Result<Matrix<T>> {
    check_shape(
        "transform translation",
        (rotation.nrows(), 1),
        (translation.len(), 1),
    )?;
    let mut out = Matrix::zeros(rotation.nrows(), points.ncols());
    matmul_into(out.as_mut(), rotation, points)?;
    let t = col_view(translation);
    for j in 0..out.ncols() {
        for i in 0..out.nrows() {
            out[(i, j)] += t[(i, 0)];
        }
    }
    Ok(out)
}

/// Mark every entry as unset.
pub fn unset<T: Scalar>(matrix: &mut Matrix<T>) {
    matrix.as_mut().fill(T::unset());
}

/// Matrix with entries uniform in `[-1, 1)`.
pub fn random_matrix<T: Scalar, R: Rng>(rng: &mut R, nrows: usize, ncols: usize) -> Matrix<T> {
    Matrix::from_fn(nrows, ncols, |_, _| {
        <T as Scalar>::from_f64(2.0 * rng.random::<f64>() - 1.0)
    })
}

/// `AᵀA + I` for a random `n × n` matrix `A`.
pub fn random_positive_definite<T: Scalar, R: Rng>(rng: &mut R, n: usize) -> Matrix<T> {
    let a: Matrix<T> = random_matrix(rng, n, n);
    let mut out = ata_lower(a.as_ref());
    for i in 0..n {
        out[(i, i)] += T::one();
    }
    // square by construction
    let _ = lower_to_symmetric(&mut out);
    out
}
