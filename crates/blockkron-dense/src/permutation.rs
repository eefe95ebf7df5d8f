//! Index permutations applied to rows, columns and vectors.
//!
//! A [`Permutation`] `p` gathers: applying it to rows yields
//! `out[i, :] = src[p[i], :]`, i.e. the product `Pᵀ · src` for the
//! permutation matrix `P` that sends row `i` to row `p[i]`.

use std::fmt;

use faer::perm::Perm;
use faer::prelude::ReborrowMut;

use crate::error::{DenseError, Result};
use crate::matrix::{check_shape, MatMut, MatRef, Matrix};
use crate::scalar::Scalar;

/// Bijection on `0..len`, stored as a faer [`Perm`] whose forward array is
/// the gather index list.
pub struct Permutation {
    inner: Perm<usize>,
}

impl Permutation {
    /// Validate and wrap an index list.
    pub fn new(indices: Vec<usize>) -> Result<Self> {
        let n = indices.len();
        let mut inverse = vec![usize::MAX; n];
        for (pos, &idx) in indices.iter().enumerate() {
            if idx >= n {
                return Err(DenseError::InvalidPermutation {
                    message: format!("index {} at position {} is out of range {}", idx, pos, n),
                });
            }
            if inverse[idx] != usize::MAX {
                return Err(DenseError::InvalidPermutation {
                    message: format!("index {} appears more than once", idx),
                });
            }
            inverse[idx] = pos;
        }
        Ok(Self {
            inner: Perm::new_checked(indices.into_boxed_slice(), inverse.into_boxed_slice(), n),
        })
    }

    pub fn identity(n: usize) -> Self {
        let forward: Box<[usize]> = (0..n).collect();
        Self {
            inner: Perm::new_checked(forward.clone(), forward, n),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.indices().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Gather indices.
    #[inline]
    pub fn indices(&self) -> &[usize] {
        self.inner.as_ref().arrays().0
    }

    /// The underlying faer permutation.
    #[inline]
    pub fn as_faer(&self) -> &Perm<usize> {
        &self.inner
    }

    pub fn is_identity(&self) -> bool {
        self.indices().iter().enumerate().all(|(i, &p)| i == p)
    }

    /// The permutation undoing this one.
    pub fn inverse(&self) -> Self {
        let (forward, inverse) = self.inner.as_ref().arrays();
        Self {
            inner: Perm::new_checked(inverse.into(), forward.into(), self.len()),
        }
    }

    fn check_len(&self, op: &'static str, actual: usize) -> Result<()> {
        check_shape(op, (self.len(), 1), (actual, 1))
    }

    /// Gather entries of a slice.
    pub fn apply_to_slice<T: Copy>(&self, src: &[T]) -> Result<Vec<T>> {
        self.check_len("permute slice", src.len())?;
        Ok(self.indices().iter().map(|&p| src[p]).collect())
    }

    /// Write the row-permuted `src` into `dst`.
    pub fn apply_rows_into<T: Scalar>(&self, mut dst: MatMut<'_, T>, src: MatRef<'_, T>) -> Result<()> {
        self.check_len("permute rows", src.nrows())?;
        check_shape(
            "permute rows",
            (src.nrows(), src.ncols()),
            (dst.nrows(), dst.ncols()),
        )?;
        for (i, &p) in self.indices().iter().enumerate() {
            dst.rb_mut().subrows_mut(i, 1).copy_from(src.subrows(p, 1));
        }
        Ok(())
    }

    /// Write the column-permuted `src` into `dst`.
    pub fn apply_cols_into<T: Scalar>(&self, mut dst: MatMut<'_, T>, src: MatRef<'_, T>) -> Result<()> {
        self.check_len("permute columns", src.ncols())?;
        check_shape(
            "permute columns",
            (src.nrows(), src.ncols()),
            (dst.nrows(), dst.ncols()),
        )?;
        for (j, &p) in self.indices().iter().enumerate() {
            dst.rb_mut().subcols_mut(j, 1).copy_from(src.subcols(p, 1));
        }
        Ok(())
    }

    pub fn apply_rows<T: Scalar>(&self, src: MatRef<'_, T>) -> Result<Matrix<T>> {
        let mut out = Matrix::zeros(src.nrows(), src.ncols());
        self.apply_rows_into(out.as_mut(), src)?;
        Ok(out)
    }

    pub fn apply_cols<T: Scalar>(&self, src: MatRef<'_, T>) -> Result<Matrix<T>> {
        let mut out = Matrix::zeros(src.nrows(), src.ncols());
        self.apply_cols_into(out.as_mut(), src)?;
        Ok(out)
    }

    /// Dense permutation matrix `P` with `P[p[i], i] = 1`, so that
    /// `Pᵀ · x` equals [`Permutation::apply_to_slice`] on `x`.
    pub fn to_matrix<T: Scalar>(&self) -> Matrix<T> {
        let mut m = Matrix::zeros(self.len(), self.len());
        for (i, &p) in self.indices().iter().enumerate() {
            m[(p, i)] = T::one();
        }
        m
    }
}

impl Clone for Permutation {
    fn clone(&self) -> Self {
        let (forward, inverse) = self.inner.as_ref().arrays();
        Self {
            inner: Perm::new_checked(forward.into(), inverse.into(), self.len()),
        }
    }
}

impl PartialEq for Permutation {
    fn eq(&self, other: &Self) -> bool {
        self.indices() == other.indices()
    }
}

impl Eq for Permutation {}

impl fmt::Debug for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Permutation").field(&self.indices()).finish()
    }
}
