// oodeval-data/src/samplers/subset.rs

use log::debug;
use oodeval_core::OodError;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Seed of the generator behind random subsets.
pub const SUBSET_SEED: u64 = 0;

/// Returns a fresh generator seeded with [`SUBSET_SEED`].
pub fn subset_rng() -> StdRng {
    StdRng::seed_from_u64(SUBSET_SEED)
}

/// Picks which items of a dataset of `total_count` items to keep.
///
/// * `n == None` keeps everything and returns `Ok(None)`.
/// * `block_index == None` returns the first `n` entries of a permutation
///   of `0..total_count` drawn from a locally seeded generator, so the same
///   `(total_count, n)` always yields the same indices.
/// * `block_index == Some(k)` returns the contiguous block `k*n..(k+1)*n`.
///
/// Blocks for different `k` never overlap; a random subset and a block may.
///
/// # Errors
///
/// Returns `OodError::SubsetOutOfRange` when the requested selection does
/// not fit inside `0..total_count`.
pub fn select_subset(
    total_count: usize,
    n: Option<usize>,
    block_index: Option<usize>,
) -> Result<Option<Vec<usize>>, OodError> {
    let Some(n) = n else {
        return Ok(None);
    };
    let indices = match block_index {
        None => random_subset(total_count, n, &mut subset_rng())?,
        Some(k) => block_subset(total_count, n, k)?,
    };
    debug!(
        "select_subset: kept {} of {} items (block {:?})",
        indices.len(),
        total_count,
        block_index
    );
    Ok(Some(indices))
}

/// First `n` entries of a Fisher-Yates permutation of `0..total_count`.
pub fn random_subset<R: Rng + ?Sized>(
    total_count: usize,
    n: usize,
    rng: &mut R,
) -> Result<Vec<usize>, OodError> {
    if n > total_count {
        return Err(OodError::SubsetOutOfRange {
            start: 0,
            end: n,
            total: total_count,
        });
    }
    let mut permutation: Vec<usize> = (0..total_count).collect();
    permutation.shuffle(rng);
    permutation.truncate(n);
    Ok(permutation)
}

/// The contiguous block `block_index*n..(block_index+1)*n`.
pub fn block_subset(
    total_count: usize,
    n: usize,
    block_index: usize,
) -> Result<Vec<usize>, OodError> {
    let start = block_index.checked_mul(n);
    let end = start.and_then(|s| s.checked_add(n));
    match (start, end) {
        (Some(start), Some(end)) if end <= total_count => Ok((start..end).collect()),
        (start, end) => Err(OodError::SubsetOutOfRange {
            start: start.unwrap_or(usize::MAX),
            end: end.unwrap_or(usize::MAX),
            total: total_count,
        }),
    }
}

#[cfg(test)]
#[path = "subset_test.rs"]
mod tests;
