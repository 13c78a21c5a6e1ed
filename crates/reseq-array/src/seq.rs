//! The exact-capacity integer sequence.
//!
//! [`ArraySeq`] owns a boxed slice whose length is always the element
//! count. Structural mutations never resize in place: they request a
//! replacement buffer of the new length from the allocator, copy the
//! surviving elements into it, and only then drop the old buffer. If the
//! allocator refuses, the old buffer is still in place and the sequence is
//! exactly as it was.

use std::error::Error;
use std::fmt;

use reseq_core::{Allocator, SeqError, SystemAllocator, ELEMENT_BYTES};

/// A resizable, index-addressable sequence of `i32` with no slack capacity.
///
/// Every buffer is obtained through the allocator `A`, which is fixed at
/// construction. `A` is usually [`SystemAllocator`]; tests pass a
/// fault-injecting double (by reference or `Arc`) to reach the failure paths.
pub struct ArraySeq<A: Allocator = SystemAllocator> {
    /// Exactly `len` elements. Empty only after the last element was removed.
    data: Box<[i32]>,
    alloc: A,
}

impl ArraySeq<SystemAllocator> {
    /// Create a zero-filled sequence of `len` elements on the system heap.
    pub fn new(len: usize) -> Result<Self, SeqError> {
        Self::with_len(len, SystemAllocator::default())
    }
}

impl<A: Allocator> ArraySeq<A> {
    /// Create a zero-filled sequence of `len` elements using `alloc`.
    ///
    /// Fails with [`SeqError::InvalidSize`] for `len == 0` and with
    /// [`SeqError::AllocationFailed`] if the allocator refuses. Nothing is
    /// retained on failure.
    pub fn with_len(len: usize, alloc: A) -> Result<Self, SeqError> {
        if len == 0 {
            return Err(SeqError::InvalidSize { requested: 0 });
        }
        let data = alloc.allocate(len)?;
        Ok(Self { data, alloc })
    }

    /// Create a sequence holding a copy of `values`.
    ///
    /// An empty slice yields an empty sequence without consulting the allocator.
    pub fn from_slice(values: &[i32], alloc: A) -> Result<Self, SeqError> {
        let data = if values.is_empty() {
            Box::default()
        } else {
            let mut buf = alloc.allocate(values.len())?;
            buf.copy_from_slice(values);
            buf
        };
        Ok(Self { data, alloc })
    }

    /// Create an empty sequence. Does not allocate.
    pub fn empty(alloc: A) -> Self {
        Self {
            data: Box::default(),
            alloc,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the sequence has no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The elements as a slice.
    pub fn as_slice(&self) -> &[i32] {
        &self.data
    }

    /// Iterate over the elements in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, i32> {
        self.data.iter()
    }

    /// Copy the elements into a `Vec` (global heap, not the allocator seam).
    pub fn to_vec(&self) -> Vec<i32> {
        self.data.to_vec()
    }

    /// The allocator this sequence acquires buffers from.
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Size of the backing buffer in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.data.len() * ELEMENT_BYTES
    }

    /// Read the element at `index`.
    pub fn get(&self, index: usize) -> Result<i32, SeqError> {
        self.data
            .get(index)
            .copied()
            .ok_or(SeqError::OutOfBounds {
                index,
                len: self.len(),
            })
    }

    /// Overwrite the element at `index` in place. Never reallocates.
    pub fn set(&mut self, index: usize, value: i32) -> Result<(), SeqError> {
        let len = self.len();
        let slot = self
            .data
            .get_mut(index)
            .ok_or(SeqError::OutOfBounds { index, len })?;
        *slot = value;
        Ok(())
    }

    /// Insert `value` at `index`, shifting `[index, len)` up by one.
    ///
    /// `index == len` appends. On error the sequence is unchanged.
    pub fn insert_at(&mut self, index: usize, value: i32) -> Result<(), SeqError> {
        let len = self.len();
        if index > len {
            return Err(SeqError::OutOfBounds { index, len });
        }
        let data = self.rebuild("insert_at", len + 1, |buf| {
            buf[..index].copy_from_slice(&self.data[..index]);
            buf[index] = value;
            buf[index + 1..].copy_from_slice(&self.data[index..]);
        })?;
        self.data = data;
        Ok(())
    }

    /// Remove and return the element at `index`, shifting `(index, len)` down by one.
    ///
    /// On error the sequence is unchanged.
    pub fn remove_at(&mut self, index: usize) -> Result<i32, SeqError> {
        let len = self.len();
        let removed = self.get(index)?;
        let data = self.rebuild("remove_at", len - 1, |buf| {
            buf[..index].copy_from_slice(&self.data[..index]);
            buf[index..].copy_from_slice(&self.data[index + 1..]);
        })?;
        self.data = data;
        Ok(removed)
    }

    /// Insert `value` before the first element.
    pub fn insert_first(&mut self, value: i32) -> Result<(), SeqError> {
        self.insert_at(0, value)
    }

    /// Append `value` after the last element. Valid for any length.
    pub fn insert_last(&mut self, value: i32) -> Result<(), SeqError> {
        let len = self.len();
        let data = self.rebuild("insert_last", len + 1, |buf| {
            buf[..len].copy_from_slice(&self.data);
            buf[len] = value;
        })?;
        self.data = data;
        Ok(())
    }

    /// Remove and return the first element.
    pub fn remove_first(&mut self) -> Result<i32, SeqError> {
        self.remove_at(0)
    }

    /// Remove and return the last element.
    ///
    /// Fails with [`SeqError::OutOfBounds`] on an empty sequence.
    pub fn remove_last(&mut self) -> Result<i32, SeqError> {
        match self.len().checked_sub(1) {
            Some(last) => self.remove_at(last),
            None => Err(SeqError::OutOfBounds { index: 0, len: 0 }),
        }
    }

    /// Consuming form of [`insert_at`](Self::insert_at).
    pub fn inserted(mut self, index: usize, value: i32) -> Result<Self, Rejected<A>> {
        match self.insert_at(index, value) {
            Ok(()) => Ok(self),
            Err(error) => Err(Rejected { error, seq: self }),
        }
    }

    /// Consuming form of [`insert_last`](Self::insert_last).
    pub fn appended(mut self, value: i32) -> Result<Self, Rejected<A>> {
        match self.insert_last(value) {
            Ok(()) => Ok(self),
            Err(error) => Err(Rejected { error, seq: self }),
        }
    }

    /// Consuming form of [`remove_at`](Self::remove_at). Returns the new
    /// sequence together with the removed element.
    pub fn removed(mut self, index: usize) -> Result<(Self, i32), Rejected<A>> {
        match self.remove_at(index) {
            Ok(value) => Ok((self, value)),
            Err(error) => Err(Rejected { error, seq: self }),
        }
    }

    /// Copy this sequence into a buffer from `alloc` and continue with that
    /// allocator. The original is handed back if `alloc` refuses.
    pub fn with_allocator<B: Allocator>(self, alloc: B) -> Result<ArraySeq<B>, Rejected<A>> {
        if self.data.is_empty() {
            return Ok(ArraySeq::empty(alloc));
        }
        match alloc.allocate(self.len()) {
            Ok(mut data) => {
                data.copy_from_slice(&self.data);
                Ok(ArraySeq { data, alloc })
            }
            Err(err) => Err(Rejected {
                error: err.into(),
                seq: self,
            }),
        }
    }

    /// Duplicate the sequence through the same allocator.
    pub fn try_clone(&self) -> Result<Self, SeqError>
    where
        A: Clone,
    {
        Self::from_slice(&self.data, self.alloc.clone())
    }

    /// Build a replacement buffer of `new_len` elements and let `fill`
    /// populate it. An empty replacement is produced without an allocator call.
    fn rebuild<F>(&self, op: &'static str, new_len: usize, fill: F) -> Result<Box<[i32]>, SeqError>
    where
        F: FnOnce(&mut [i32]),
    {
        if new_len == 0 {
            tracing::trace!(op, from = self.len(), to = 0, "sequence rebuilt");
            return Ok(Box::default());
        }
        let mut buf = self.alloc.allocate(new_len).map_err(|err| {
            tracing::debug!(op, len = self.len(), new_len, error = %err, "rebuild abandoned");
            SeqError::from(err)
        })?;
        debug_assert_eq!(buf.len(), new_len, "allocator returned a buffer of the wrong length");
        fill(&mut buf);
        tracing::trace!(op, from = self.len(), to = new_len, "sequence rebuilt");
        Ok(buf)
    }
}

impl<A: Allocator> fmt::Debug for ArraySeq<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ArraySeq").field(&self.data).finish()
    }
}

impl<A: Allocator, B: Allocator> PartialEq<ArraySeq<B>> for ArraySeq<A> {
    fn eq(&self, other: &ArraySeq<B>) -> bool {
        self.data == other.data
    }
}

impl<A: Allocator> Eq for ArraySeq<A> {}

impl<A: Allocator> PartialEq<[i32]> for ArraySeq<A> {
    fn eq(&self, other: &[i32]) -> bool {
        *self.data == *other
    }
}

impl<A: Allocator, const N: usize> PartialEq<[i32; N]> for ArraySeq<A> {
    fn eq(&self, other: &[i32; N]) -> bool {
        *self.data == other[..]
    }
}

impl<'a, A: Allocator> IntoIterator for &'a ArraySeq<A> {
    type Item = &'a i32;
    type IntoIter = std::slice::Iter<'a, i32>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// A consuming mutation that could not complete.
///
/// Carries the reason and the untouched original sequence.
pub struct Rejected<A: Allocator> {
    /// Why the mutation failed.
    pub error: SeqError,
    /// The sequence as it was before the call.
    pub seq: ArraySeq<A>,
}

impl<A: Allocator> Rejected<A> {
    /// Recover the original sequence.
    pub fn into_inner(self) -> ArraySeq<A> {
        self.seq
    }
}

impl<A: Allocator> fmt::Debug for Rejected<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rejected")
            .field("error", &self.error)
            .field("seq", &self.seq)
            .finish()
    }
}

impl<A: Allocator> fmt::Display for Rejected<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mutation rejected: {}", self.error)
    }
}

impl<A: Allocator> Error for Rejected<A> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reseq_core::AllocError;
    use reseq_test_utils::FailingAllocator;

    const BASE: [i32; 5] = [10, 20, 30, 40, 50];

    fn base() -> ArraySeq {
        ArraySeq::from_slice(&BASE, SystemAllocator::default()).unwrap()
    }

    #[test]
    fn new_is_zero_filled() {
        let seq = ArraySeq::new(100).unwrap();
        assert_eq!(seq.len(), 100);
        assert!(seq.iter().all(|&v| v == 0));
        assert_eq!(seq.memory_bytes(), 400);
    }

    #[test]
    fn new_rejects_zero_length() {
        assert_eq!(
            ArraySeq::new(0).unwrap_err(),
            SeqError::InvalidSize { requested: 0 }
        );
    }

    #[test]
    fn get_out_of_bounds() {
        let seq = ArraySeq::new(10).unwrap();
        assert_eq!(
            seq.get(98_000),
            Err(SeqError::OutOfBounds {
                index: 98_000,
                len: 10
            })
        );
    }

    #[test]
    fn set_then_get() {
        let mut seq = ArraySeq::new(10).unwrap();
        seq.set(4, 65).unwrap();
        assert_eq!(seq.get(4), Ok(65));
        assert_eq!(seq.get(3), Ok(0));
        assert_eq!(seq.get(5), Ok(0));
    }

    #[test]
    fn set_out_of_bounds_leaves_contents() {
        let mut seq = base();
        assert!(seq.set(5, 1).is_err());
        assert_eq!(seq, BASE);
    }

    #[test]
    fn insert_in_middle() {
        let mut seq = base();
        seq.insert_at(2, 999).unwrap();
        assert_eq!(seq, [10, 20, 999, 30, 40, 50]);
        assert_eq!(seq.len(), 6);
    }

    #[test]
    fn insert_at_len_appends() {
        let mut seq = base();
        seq.insert_at(5, 60).unwrap();
        assert_eq!(seq, [10, 20, 30, 40, 50, 60]);
    }

    #[test]
    fn insert_past_len_is_rejected() {
        let mut seq = base();
        assert_eq!(
            seq.insert_at(6, 1),
            Err(SeqError::OutOfBounds { index: 6, len: 5 })
        );
        assert_eq!(seq, BASE);
    }

    #[test]
    fn remove_first_element() {
        let mut seq = base();
        assert_eq!(seq.remove_at(0), Ok(10));
        assert_eq!(seq, [20, 30, 40, 50]);
        assert_eq!(seq.len(), 4);
    }

    #[test]
    fn remove_out_of_bounds_is_rejected() {
        let mut seq = base();
        assert!(seq.remove_at(5).is_err());
        assert_eq!(seq, BASE);
    }

    #[test]
    fn first_and_last_wrappers() {
        let mut seq = base();
        seq.insert_first(1).unwrap();
        seq.insert_last(99).unwrap();
        assert_eq!(seq, [1, 10, 20, 30, 40, 50, 99]);
        assert_eq!(seq.remove_first(), Ok(1));
        assert_eq!(seq.remove_last(), Ok(99));
        assert_eq!(seq, BASE);
    }

    #[test]
    fn draining_to_empty_and_refilling() {
        let mut seq = ArraySeq::from_slice(&[7], SystemAllocator::default()).unwrap();
        assert_eq!(seq.remove_last(), Ok(7));
        assert!(seq.is_empty());
        assert_eq!(
            seq.remove_last(),
            Err(SeqError::OutOfBounds { index: 0, len: 0 })
        );
        assert!(seq.remove_first().is_err());
        seq.insert_at(0, 3).unwrap();
        seq.insert_last(4).unwrap();
        assert_eq!(seq, [3, 4]);
    }

    #[test]
    fn construction_failure_is_reported() {
        let alloc = FailingAllocator::new();
        alloc.fail_at(1);
        assert_eq!(
            ArraySeq::with_len(100, &alloc).unwrap_err(),
            SeqError::AllocationFailed(AllocError::Injected { call: 1 })
        );
        assert_eq!(alloc.calls(), 1);
    }

    #[test]
    fn every_mutation_makes_exactly_one_request() {
        let alloc = FailingAllocator::new();
        let mut seq = ArraySeq::from_slice(&BASE, &alloc).unwrap();
        seq.insert_at(1, 0).unwrap();
        seq.insert_last(0).unwrap();
        seq.remove_at(0).unwrap();
        seq.set(0, 5).unwrap();
        assert_eq!(alloc.calls(), 4);
    }

    #[test]
    fn failed_insert_keeps_original() {
        let alloc = FailingAllocator::new();
        let mut seq = ArraySeq::from_slice(&BASE, &alloc).unwrap();
        alloc.fail_at(2);
        assert!(matches!(
            seq.insert_at(2, 999),
            Err(SeqError::AllocationFailed(AllocError::Injected { call: 2 }))
        ));
        assert_eq!(seq, BASE);
        // The double only refuses the chosen ordinal.
        seq.insert_at(2, 999).unwrap();
        assert_eq!(seq, [10, 20, 999, 30, 40, 50]);
    }

    #[test]
    fn failed_remove_keeps_original() {
        let alloc = FailingAllocator::new();
        let mut seq = ArraySeq::from_slice(&BASE, &alloc).unwrap();
        alloc.fail_at(2);
        assert!(seq.remove_first().is_err());
        assert!(seq.remove_last().is_ok());
        assert_eq!(seq, [10, 20, 30, 40]);
    }

    #[test]
    fn removing_last_element_needs_no_allocation() {
        let alloc = FailingAllocator::new();
        let mut seq = ArraySeq::from_slice(&[1], &alloc).unwrap();
        alloc.fail_at(2);
        assert_eq!(seq.remove_at(0), Ok(1));
        assert_eq!(alloc.calls(), 1);
    }

    #[test]
    fn consuming_insert_returns_original_on_failure() {
        let alloc = FailingAllocator::new();
        let seq = ArraySeq::from_slice(&BASE, &alloc).unwrap();
        alloc.fail_at(2);
        let rejected = seq.inserted(0, 1).unwrap_err();
        assert!(matches!(rejected.error, SeqError::AllocationFailed(_)));
        let seq = rejected.into_inner();
        assert_eq!(seq, BASE);
        let seq = seq.appended(60).unwrap();
        let (seq, value) = seq.removed(0).unwrap();
        assert_eq!(value, 10);
        assert_eq!(seq, [20, 30, 40, 50, 60]);
    }

    #[test]
    fn rejected_reports_bounds_error() {
        let rejected = base().removed(9).unwrap_err();
        assert_eq!(rejected.to_string(), "mutation rejected: index 9 out of bounds for length 5");
        assert!(rejected.source().is_some());
    }

    #[test]
    fn with_allocator_moves_contents() {
        let failing = FailingAllocator::new();
        let seq = base().with_allocator(&failing).unwrap();
        assert_eq!(seq, BASE);
        assert_eq!(failing.calls(), 1);
        assert_eq!(seq.with_allocator(SystemAllocator::default()).unwrap(), BASE);

        let refused = FailingAllocator::new();
        refused.fail_at(1);
        let rejected = base().with_allocator(&refused).unwrap_err();
        assert_eq!(rejected.into_inner(), BASE);
    }

    #[test]
    fn try_clone_is_independent() {
        let original = base();
        let mut copy = original.try_clone().unwrap();
        copy.set(0, -5).unwrap();
        assert_eq!(original.get(0), Ok(10));
        assert_eq!(copy.get(0), Ok(-5));
    }

    #[test]
    fn debug_shows_contents() {
        let seq = ArraySeq::from_slice(&[1, 2], SystemAllocator::default()).unwrap();
        assert_eq!(format!("{seq:?}"), "ArraySeq([1, 2])");
    }

    #[test]
    fn sequences_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ArraySeq>();
        assert_send_sync::<ArraySeq<std::sync::Arc<FailingAllocator>>>();
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn new_len_and_zeroes(len in 1usize..2048) {
                let seq = ArraySeq::new(len).unwrap();
                prop_assert_eq!(seq.len(), len);
                prop_assert!(seq.iter().all(|&v| v == 0));
            }

            #[test]
            fn set_touches_only_its_index(
                values in proptest::collection::vec(any::<i32>(), 1..64),
                pick in any::<prop::sample::Index>(),
                value in any::<i32>(),
            ) {
                let mut seq = ArraySeq::from_slice(&values, SystemAllocator::default()).unwrap();
                let i = pick.index(values.len());
                seq.set(i, value).unwrap();
                prop_assert_eq!(seq.get(i), Ok(value));
                for (j, &orig) in values.iter().enumerate() {
                    if j != i {
                        prop_assert_eq!(seq.get(j), Ok(orig));
                    }
                }
            }

            #[test]
            fn insert_shifts_suffix_up(
                values in proptest::collection::vec(any::<i32>(), 0..64),
                pick in any::<prop::sample::Index>(),
                value in any::<i32>(),
            ) {
                let mut seq = ArraySeq::from_slice(&values, SystemAllocator::default()).unwrap();
                let i = pick.index(values.len() + 1);
                seq.insert_at(i, value).unwrap();
                prop_assert_eq!(seq.len(), values.len() + 1);
                prop_assert_eq!(seq.get(i), Ok(value));
                prop_assert_eq!(&seq.as_slice()[..i], &values[..i]);
                prop_assert_eq!(&seq.as_slice()[i + 1..], &values[i..]);
            }

            #[test]
            fn remove_shifts_suffix_down(
                values in proptest::collection::vec(any::<i32>(), 1..64),
                pick in any::<prop::sample::Index>(),
            ) {
                let mut seq = ArraySeq::from_slice(&values, SystemAllocator::default()).unwrap();
                let i = pick.index(values.len());
                prop_assert_eq!(seq.remove_at(i), Ok(values[i]));
                prop_assert_eq!(seq.len(), values.len() - 1);
                prop_assert_eq!(&seq.as_slice()[..i], &values[..i]);
                prop_assert_eq!(&seq.as_slice()[i..], &values[i + 1..]);
            }
        }
    }
}
