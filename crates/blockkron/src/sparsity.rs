//! Block sparsity patterns.
//!
//! A pattern decides which block coordinates of a grid are addressable and
//! which contiguous run of blocks a block-column or block-row spans. The
//! patterns are zero-sized markers used as a type parameter of
//! [`BlockMatrix`](crate::BlockMatrix).

use std::fmt::Debug;
use std::ops::Range;

/// Runtime tag of a sparsity pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SparsityKind {
    Full,
    Diagonal,
    LowerTriangular,
}

impl SparsityKind {
    pub fn name(self) -> &'static str {
        match self {
            SparsityKind::Full => "full",
            SparsityKind::Diagonal => "diagonal",
            SparsityKind::LowerTriangular => "lower-triangular",
        }
    }
}

/// Block sparsity capability.
pub trait Sparsity: Debug + Clone + Copy + Default + Send + Sync + 'static {
    const KIND: SparsityKind;

    /// Whether block `(row, col)` belongs to the pattern. Grid bounds are
    /// checked separately.
    fn is_valid(row: usize, col: usize) -> bool;

    /// Block rows covered by block-column `col`.
    fn column_extent(col: usize, num_blocks_vert: usize) -> Range<usize>;

    /// Block columns covered by block-row `row`.
    fn row_extent(row: usize, num_blocks_hor: usize) -> Range<usize>;
}

/// Every block is valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Full;

/// Only blocks on the diagonal are valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Diagonal;

/// Blocks on or below the diagonal are valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LowerTriangular;

impl Sparsity for Full {
    const KIND: SparsityKind = SparsityKind::Full;

    #[inline]
    fn is_valid(_row: usize, _col: usize) -> bool {
        true
    }

    #[inline]
    fn column_extent(_col: usize, num_blocks_vert: usize) -> Range<usize> {
        0..num_blocks_vert
    }

    #[inline]
    fn row_extent(_row: usize, num_blocks_hor: usize) -> Range<usize> {
        0..num_blocks_hor
    }
}

impl Sparsity for Diagonal {
    const KIND: SparsityKind = SparsityKind::Diagonal;

    #[inline]
    fn is_valid(row: usize, col: usize) -> bool {
        row == col
    }

    #[inline]
    fn column_extent(col: usize, num_blocks_vert: usize) -> Range<usize> {
        col.min(num_blocks_vert)..(col + 1).min(num_blocks_vert)
    }

    #[inline]
    fn row_extent(row: usize, num_blocks_hor: usize) -> Range<usize> {
        row.min(num_blocks_hor)..(row + 1).min(num_blocks_hor)
    }
}

impl Sparsity for LowerTriangular {
    const KIND: SparsityKind = SparsityKind::LowerTriangular;

    #[inline]
    fn is_valid(row: usize, col: usize) -> bool {
        row >= col
    }

    #[inline]
    fn column_extent(col: usize, num_blocks_vert: usize) -> Range<usize> {
        col.min(num_blocks_vert)..num_blocks_vert
    }

    #[inline]
    fn row_extent(row: usize, num_blocks_hor: usize) -> Range<usize> {
        0..(row + 1).min(num_blocks_hor)
    }
}
