//! Raw buffer ownership modes for [`BlockMatrix`](crate::BlockMatrix).
//!
//! | buffer            | read | write | resize |
//! |-------------------|------|-------|--------|
//! | `Matrix<T>`       | yes  | yes   | yes    |
//! | `&mut Matrix<T>`  | yes  | yes   | yes    |
//! | `MatMut<'_, T>`   | yes  | yes   | no     |
//! | `&Matrix<T>`      | yes  | no    | no     |
//! | `MatRef<'_, T>`   | yes  | no    | no     |

use blockkron_dense::matrix;
use blockkron_dense::{MatMut, MatRef, Matrix, Scalar};
use faer::prelude::{Reborrow, ReborrowMut};

/// Readable dense buffer.
pub trait RawBuffer {
    type Scalar: Scalar;

    fn as_mat_ref(&self) -> MatRef<'_, Self::Scalar>;

    #[inline]
    fn nrows(&self) -> usize {
        self.as_mat_ref().nrows()
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.as_mat_ref().ncols()
    }
}

/// Writable dense buffer.
pub trait RawBufferMut: RawBuffer {
    fn as_mat_mut(&mut self) -> MatMut<'_, Self::Scalar>;
}

/// Writable dense buffer whose shape can change.
pub trait ResizableBuffer: RawBufferMut {
    /// Reshape, filling every entry with zero.
    fn resize_zeroed(&mut self, nrows: usize, ncols: usize);

    /// Reshape, marking every entry as unset.
    fn resize_unset(&mut self, nrows: usize, ncols: usize);
}

impl<T: Scalar> RawBuffer for Matrix<T> {
    type Scalar = T;

    #[inline]
    fn as_mat_ref(&self) -> MatRef<'_, T> {
        self.as_ref()
    }
}

impl<T: Scalar> RawBufferMut for Matrix<T> {
    #[inline]
    fn as_mat_mut(&mut self) -> MatMut<'_, T> {
        self.as_mut()
    }
}

impl<T: Scalar> ResizableBuffer for Matrix<T> {
    fn resize_zeroed(&mut self, nrows: usize, ncols: usize) {
        matrix::set_zero(self, nrows, ncols);
    }

    fn resize_unset(&mut self, nrows: usize, ncols: usize) {
        matrix::resize_unset(self, nrows, ncols);
    }
}

impl<T: Scalar> RawBuffer for &Matrix<T> {
    type Scalar = T;

    #[inline]
    fn as_mat_ref(&self) -> MatRef<'_, T> {
        (**self).as_ref()
    }
}

impl<T: Scalar> RawBuffer for &mut Matrix<T> {
    type Scalar = T;

    #[inline]
    fn as_mat_ref(&self) -> MatRef<'_, T> {
        (**self).as_ref()
    }
}

impl<T: Scalar> RawBufferMut for &mut Matrix<T> {
    #[inline]
    fn as_mat_mut(&mut self) -> MatMut<'_, T> {
        (**self).as_mut()
    }
}

impl<T: Scalar> ResizableBuffer for &mut Matrix<T> {
    fn resize_zeroed(&mut self, nrows: usize, ncols: usize) {
        matrix::set_zero(self, nrows, ncols);
    }

    fn resize_unset(&mut self, nrows: usize, ncols: usize) {
        matrix::resize_unset(self, nrows, ncols);
    }
}

impl<T: Scalar> RawBuffer for MatRef<'_, T> {
    type Scalar = T;

    #[inline]
    fn as_mat_ref(&self) -> MatRef<'_, T> {
        *self
    }
}

impl<T: Scalar> RawBuffer for MatMut<'_, T> {
    type Scalar = T;

    #[inline]
    fn as_mat_ref(&self) -> MatRef<'_, T> {
        self.rb()
    }
}

impl<T: Scalar> RawBufferMut for MatMut<'_, T> {
    #[inline]
    fn as_mat_mut(&mut self) -> MatMut<'_, T> {
        self.rb_mut()
    }
}
