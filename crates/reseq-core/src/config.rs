//! Allocator configuration parameters.

/// Configuration for the [`SystemAllocator`](crate::SystemAllocator).
///
/// Bounds the size of any single buffer request. All values are immutable
/// after the allocator is created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllocConfig {
    /// Largest single request, in bytes, the allocator will attempt.
    ///
    /// Default: `isize::MAX`, the hard limit for any Rust allocation.
    /// Requests above this fail with
    /// [`AllocError::CapacityExceeded`](crate::AllocError::CapacityExceeded)
    /// before the system heap is consulted.
    pub max_bytes: usize,
}

impl AllocConfig {
    /// Default per-request ceiling in bytes.
    pub const DEFAULT_MAX_BYTES: usize = isize::MAX as usize;

    /// Create a config with the given per-request ceiling.
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }

    /// Create a config whose ceiling admits at most `max_len` elements.
    pub fn with_max_elements(max_len: usize) -> Self {
        Self::new(max_len.saturating_mul(crate::ELEMENT_BYTES))
    }

    /// Largest element count a single request may ask for.
    pub fn max_elements(&self) -> usize {
        self.max_bytes / crate::ELEMENT_BYTES
    }
}

impl Default for AllocConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_BYTES)
    }
}
