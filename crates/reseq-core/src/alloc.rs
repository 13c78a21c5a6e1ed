//! The allocator seam.
//!
//! Every buffer a sequence owns is obtained through an [`Allocator`]. The
//! production implementation is [`SystemAllocator`]; tests substitute a
//! double that refuses chosen requests, which makes every failure path in
//! the container reachable and deterministic.
//!
//! The seam is passed to the container explicitly rather than installed
//! process-wide, so two sequences can use different strategies side by side.

use std::sync::Arc;

use crate::config::AllocConfig;
use crate::error::AllocError;

/// Size in bytes of one sequence element.
pub const ELEMENT_BYTES: usize = std::mem::size_of::<i32>();

/// Source of zero-initialised element buffers.
///
/// Implementations must return a buffer of exactly `len` elements, all zero,
/// or an error. They must never return a buffer of a different length.
pub trait Allocator {
    /// Allocate a zero-filled buffer of `len` elements.
    ///
    /// A request for zero elements is an error ([`AllocError::ZeroSize`]).
    fn allocate(&self, len: usize) -> Result<Box<[i32]>, AllocError>;
}

impl<A: Allocator + ?Sized> Allocator for &A {
    fn allocate(&self, len: usize) -> Result<Box<[i32]>, AllocError> {
        (**self).allocate(len)
    }
}

impl<A: Allocator + ?Sized> Allocator for Arc<A> {
    fn allocate(&self, len: usize) -> Result<Box<[i32]>, AllocError> {
        (**self).allocate(len)
    }
}

/// Allocator backed by the global heap with fallible reservation.
///
/// Never aborts on exhaustion: a failed reservation is reported as
/// [`AllocError::OutOfMemory`].
#[derive(Clone, Debug, Default)]
pub struct SystemAllocator {
    config: AllocConfig,
}

impl SystemAllocator {
    /// Create a system allocator with the given configuration.
    pub fn new(config: AllocConfig) -> Self {
        Self { config }
    }

    /// The configuration this allocator was built with.
    pub fn config(&self) -> &AllocConfig {
        &self.config
    }
}

impl Allocator for SystemAllocator {
    fn allocate(&self, len: usize) -> Result<Box<[i32]>, AllocError> {
        if len == 0 {
            return Err(AllocError::ZeroSize);
        }
        let requested = len.checked_mul(ELEMENT_BYTES).unwrap_or(usize::MAX);
        if requested > self.config.max_bytes {
            tracing::debug!(
                requested,
                capacity = self.config.max_bytes,
                "allocation above configured ceiling refused"
            );
            return Err(AllocError::CapacityExceeded {
                requested,
                capacity: self.config.max_bytes,
            });
        }

        let mut buf: Vec<i32> = Vec::new();
        if buf.try_reserve_exact(len).is_err() {
            tracing::debug!(requested, "system heap refused allocation");
            return Err(AllocError::OutOfMemory { requested });
        }
        buf.resize(len, 0);
        Ok(buf.into_boxed_slice())
    }
}
