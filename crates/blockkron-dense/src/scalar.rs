//! Scalar trait for dense and block matrix operations.
//!
//! Besides the arithmetic needed by the faer kernels, every scalar knows its
//! "unset" sentinel, a quiet NaN. Freshly resized buffers are filled with it
//! so that reading an entry that was never written shows up in debugging.

use std::fmt::{Debug, Display};
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use faer_traits::ComplexField;
use num_complex::{Complex32, Complex64};
use num_traits::{One, Zero};

/// Scalar types usable as entries of block matrices.
pub trait Scalar:
    Clone
    + Copy
    + Debug
    + Display
    + Default
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + ComplexField
    + Send
    + Sync
    + 'static
{
    /// Sentinel marking uninitialized entries.
    fn unset() -> Self;

    /// Create from f64 value.
    fn from_f64(val: f64) -> Self;
}

impl Scalar for f64 {
    #[inline]
    fn unset() -> Self {
        f64::NAN
    }

    #[inline]
    fn from_f64(val: f64) -> Self {
        val
    }
}

impl Scalar for f32 {
    #[inline]
    fn unset() -> Self {
        f32::NAN
    }

    #[inline]
    fn from_f64(val: f64) -> Self {
        val as f32
    }
}

impl Scalar for Complex64 {
    #[inline]
    fn unset() -> Self {
        Complex64::new(f64::NAN, f64::NAN)
    }

    #[inline]
    fn from_f64(val: f64) -> Self {
        Complex64::new(val, 0.0)
    }
}

impl Scalar for Complex32 {
    #[inline]
    fn unset() -> Self {
        Complex32::new(f32::NAN, f32::NAN)
    }

    #[inline]
    fn from_f64(val: f64) -> Self {
        Complex32::new(val as f32, 0.0)
    }
}
