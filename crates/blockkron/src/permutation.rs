//! Striped to interleaved block ordering.
//!
//! Multiplying by `I(s) ⊗ M` block-column by block-column produces `s`
//! stacked copies ("stripes") of an `num_blocks * len` long result, one per
//! identity index `k`. The Kronecker result lists the same pieces
//! interleaved: piece `b` of stripe `k` belongs at block `b * s + k`.

use blockkron_dense::{Permutation, Result};

/// Gather permutation taking a striped layout to the interleaved one.
///
/// Position `(b * s + k) * len + r` of the result reads position
/// `k * num_blocks * len + b * len + r` of the striped input.
pub fn striped_to_interleaved(
    identity_size: usize,
    num_blocks: usize,
    block_len: usize,
) -> Result<Permutation> {
    let stripe_len = num_blocks * block_len;
    let mut indices = Vec::with_capacity(identity_size * stripe_len);
    for b in 0..num_blocks {
        for k in 0..identity_size {
            let base = k * stripe_len + b * block_len;
            indices.extend(base..base + block_len);
        }
    }
    Permutation::new(indices)
}
