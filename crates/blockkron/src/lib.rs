//! Block matrices and structured `I(s) ⊗ M` Kronecker expansions.
//!
//! A [`BlockMatrix`] views a dense buffer as a grid of equally sized
//! blocks, restricted by a sparsity pattern ([`Full`], [`Diagonal`] or
//! [`LowerTriangular`]). A [`KroneckerExpansion`] represents the product of
//! an `s x s` identity with a block matrix, where each block is treated as a
//! single entry, and multiplies by it without forming the product.
//!
//! # Core Types
//!
//! - [`BlockSize`]: fixed or dynamic block dimensions
//! - [`BlockMatrix`]: block addressing over an owned or borrowed buffer
//! - [`KroneckerExpansion`]: evaluation and products with `I(s) ⊗ M`
//! - [`striped_to_interleaved`]: the stripe interleaving permutation
//!
//! # Example
//!
//! ```
//! use blockkron::{DiagonalBlockMatrix, KroneckerExpansion, LowerTriangular};
//! use blockkron_dense::from_rows;
//!
//! // M = [[1, 0], [2, 3]] with 1x1 blocks, s = 2
//! let raw = from_rows(vec![vec![1.0, 0.0], vec![2.0, 3.0]]).unwrap();
//! let k = KroneckerExpansion::<_, LowerTriangular>::from_raw(&raw, 1, 1, 2).unwrap();
//!
//! // D with two 2x1 diagonal blocks
//! let d_raw = from_rows(vec![
//!     vec![1.0, 0.0],
//!     vec![1.0, 0.0],
//!     vec![0.0, 1.0],
//!     vec![0.0, 1.0],
//! ])
//! .unwrap();
//! let d = DiagonalBlockMatrix::new(&d_raw, 2, 1).unwrap();
//!
//! let product = (&k * &d).unwrap();
//! assert_eq!(product, &k.evaluate() * &d.evaluate());
//! ```

mod block_matrix;
mod block_size;
mod error;
mod kronecker;
mod permutation;
mod sparsity;
mod storage;

pub use block_matrix::{
    BlockMatrix, BlockSpan, DiagonalBlockMatrix, FullBlockMatrix, LowerTriangularBlockMatrix,
};
pub use block_size::{resolve_dim, BlockShape, BlockSize};
pub use error::{Axis, BlockMatrixError, ErrorKind, Result};
pub use kronecker::{kron_identity_blocks, KroneckerExpansion};
pub use permutation::striped_to_interleaved;
pub use sparsity::{Diagonal, Full, LowerTriangular, Sparsity, SparsityKind};
pub use storage::{RawBuffer, RawBufferMut, ResizableBuffer};
