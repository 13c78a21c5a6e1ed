//! Sequences with known contents for integration tests.

use reseq_array::ArraySeq;
use reseq_core::{Allocator, SystemAllocator};

/// Five distinct values used by the insert/remove scenarios.
pub const BASE_VALUES: [i32; 5] = [10, 20, 30, 40, 50];

/// Ten ascending values, `11 * i`.
pub const TEN_VALUES: [i32; 10] = [0, 11, 22, 33, 44, 55, 66, 77, 88, 99];

/// Build a sequence holding `values` on the system heap.
///
/// # Panics
///
/// Panics if the system allocator refuses, which only happens when the
/// test host is out of memory.
pub fn seq_of(values: &[i32]) -> ArraySeq {
    seq_with(values, SystemAllocator::default())
}

/// Build a sequence holding `values` through `alloc`.
///
/// Uses exactly one allocator call for a non-empty slice.
///
/// # Panics
///
/// Panics if `alloc` refuses the request.
pub fn seq_with<A: Allocator>(values: &[i32], alloc: A) -> ArraySeq<A> {
    ArraySeq::from_slice(values, alloc).expect("fixture allocation failed")
}

