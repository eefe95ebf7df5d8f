//! Dense linear algebra used by the `blockkron` block matrix crate.
//!
//! Storage and views are faer's [`Mat`], [`MatRef`] and [`MatMut`]. This
//! crate adds:
//! - [`matrix`]: fallible constructors and shape checks over faer matrices
//! - [`matmul`](matmul::matmul) kernels writing into views
//! - [`Permutation`]: row, column and vector permutations
//! - [`util`]: block-diagonal assembly, concatenation, `AᵀA` accumulation and related helpers
//! - [`OutputFormat`]: configurable matrix printing
//!
//! # Example
//!
//! ```
//! use blockkron_dense::{from_rows, matmul, Matrix};
//!
//! let a = from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
//! let id = Matrix::<f64>::identity(2, 2);
//! let c = matmul::matmul(a.as_ref(), id.as_ref()).unwrap();
//! assert_eq!(c, a);
//! ```

pub mod error;
pub mod format;
pub mod matmul;
pub mod matrix;
pub mod permutation;
pub mod scalar;
pub mod util;

pub use error::{DenseError, Result};
pub use format::{MatrixDisplay, OutputFormat};
pub use matmul::{matmul_add_into, matmul_into, matvec, matvec_add_into};
pub use matrix::{copy_into, from_col_major, from_rows, Mat, MatMut, MatRef, Matrix};
pub use permutation::Permutation;
pub use scalar::Scalar;
pub use util::SelectionMatrix;
