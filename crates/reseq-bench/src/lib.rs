//! Benchmark profiles for the reseq sequence container.
//!
//! - [`ascending`]: a sequence holding `0..len` on the system heap.
//! - [`walk_indices`]: a deterministic, spread-out index stream for
//!   mixed insert/remove workloads.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use reseq_array::ArraySeq;
use reseq_core::{SeqError, SystemAllocator};

/// Build a sequence holding `0..len`.
pub fn ascending(len: usize) -> Result<ArraySeq, SeqError> {
    let values: Vec<i32> = (0..len as i32).collect();
    ArraySeq::from_slice(&values, SystemAllocator::default())
}

/// Produce `count` indices, each valid for a sequence of length `len`.
///
/// Steps by a large odd stride so consecutive indices land far apart.
/// `len == 0` yields an empty stream.
pub fn walk_indices(len: usize, count: usize) -> Vec<usize> {
    if len == 0 {
        return Vec::new();
    }
    const STRIDE: usize = 7_919;
    (0..count).map(|i| i.wrapping_mul(STRIDE) % len).collect()
}
