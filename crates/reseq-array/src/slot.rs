//! Absent-aware operations over an owning sequence slot.
//!
//! Callers that keep a sequence in an `Option` (a handle that may have been
//! released, or never successfully built) use these functions instead of
//! unwrapping first. An empty slot is reported as
//! [`SeqError::InvalidReference`] and nothing else happens.
//!
//! Structural operations replace the sequence inside the slot only when the
//! replacement buffer was fully built; otherwise the slot keeps the original.

use reseq_core::{Allocator, SeqError};

use crate::seq::ArraySeq;

/// Value written to the `out` parameter of [`get_at`] when the read fails.
pub const READ_SENTINEL: i32 = -1;

/// Build a zero-filled sequence of `size` elements.
///
/// Returns `None` for a non-positive size or when the allocator refuses.
pub fn build<A: Allocator>(size: i64, alloc: A) -> Option<ArraySeq<A>> {
    try_build(size, alloc).ok()
}

/// Like [`build`], reporting why construction failed.
pub fn try_build<A: Allocator>(size: i64, alloc: A) -> Result<ArraySeq<A>, SeqError> {
    let len = usize::try_from(size)
        .ok()
        .filter(|&len| len > 0)
        .ok_or(SeqError::InvalidSize { requested: size })?;
    ArraySeq::with_len(len, alloc)
}

/// Drop the sequence held by `slot`, leaving it empty. A no-op on an empty slot.
pub fn release<A: Allocator>(slot: &mut Option<ArraySeq<A>>) {
    if let Some(seq) = slot.take() {
        tracing::trace!(len = seq.len(), "sequence released");
    }
}

/// Read the element at `index` into `out`.
///
/// On failure `out` is set to [`READ_SENTINEL`].
pub fn get_at<A: Allocator>(
    index: usize,
    seq: Option<&ArraySeq<A>>,
    out: &mut i32,
) -> Result<(), SeqError> {
    let read = seq
        .ok_or(SeqError::InvalidReference)
        .and_then(|seq| seq.get(index));
    match read {
        Ok(value) => {
            *out = value;
            Ok(())
        }
        Err(err) => {
            *out = READ_SENTINEL;
            Err(err)
        }
    }
}

/// Overwrite the element at `index` in place.
pub fn set_at<A: Allocator>(
    index: usize,
    seq: Option<&mut ArraySeq<A>>,
    value: i32,
) -> Result<(), SeqError> {
    seq.ok_or(SeqError::InvalidReference)?.set(index, value)
}

/// Insert `value` at `index` (`index == len` appends).
pub fn insert_at<A: Allocator>(
    index: usize,
    slot: &mut Option<ArraySeq<A>>,
    value: i32,
) -> Result<(), SeqError> {
    occupied(slot)?.insert_at(index, value)
}

/// Insert `value` before the first element.
pub fn insert_first<A: Allocator>(slot: &mut Option<ArraySeq<A>>, value: i32) -> Result<(), SeqError> {
    insert_at(0, slot, value)
}

/// Append `value` after the last element.
pub fn insert_last<A: Allocator>(slot: &mut Option<ArraySeq<A>>, value: i32) -> Result<(), SeqError> {
    occupied(slot)?.insert_last(value)
}

/// Remove and return the element at `index`.
pub fn remove_at<A: Allocator>(index: usize, slot: &mut Option<ArraySeq<A>>) -> Result<i32, SeqError> {
    occupied(slot)?.remove_at(index)
}

/// Remove and return the first element.
pub fn remove_first<A: Allocator>(slot: &mut Option<ArraySeq<A>>) -> Result<i32, SeqError> {
    remove_at(0, slot)
}

/// Remove and return the last element.
pub fn remove_last<A: Allocator>(slot: &mut Option<ArraySeq<A>>) -> Result<i32, SeqError> {
    occupied(slot)?.remove_last()
}

fn occupied<A: Allocator>(slot: &mut Option<ArraySeq<A>>) -> Result<&mut ArraySeq<A>, SeqError> {
    slot.as_mut().ok_or(SeqError::InvalidReference)
}
