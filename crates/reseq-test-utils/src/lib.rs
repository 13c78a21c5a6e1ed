//! Test doubles and fixtures for reseq development.
//!
//! Provides [`FailingAllocator`], an allocator seam double that refuses a
//! chosen request, and [`fixtures`] for building sequences with known
//! contents.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use reseq_core::{AllocConfig, AllocError, Allocator, SystemAllocator};

/// Allocator that refuses exactly one chosen request and records the rest.
///
/// Calls are numbered from 1. After [`fail_at(n)`](FailingAllocator::fail_at)
/// the n-th call returns [`AllocError::Injected`]; every other call is
/// forwarded to a [`SystemAllocator`]. Counters are atomic so the double
/// is `Send + Sync` and can be shared through `&` or `Arc`.
pub struct FailingAllocator {
    inner: SystemAllocator,
    /// Ordinal of the call to refuse; 0 means never.
    fail_at: AtomicU64,
    calls: AtomicU64,
    requests: Mutex<Vec<usize>>,
}

impl FailingAllocator {
    /// Create a disarmed double over the default system allocator.
    pub fn new() -> Self {
        Self::with_config(AllocConfig::default())
    }

    /// Create a disarmed double over a system allocator with `config`.
    pub fn with_config(config: AllocConfig) -> Self {
        Self {
            inner: SystemAllocator::new(config),
            fail_at: AtomicU64::new(0),
            calls: AtomicU64::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Refuse the `call`-th request (counting from the first call ever made,
    /// or from the last [`reset`](Self::reset)).
    pub fn fail_at(&self, call: u64) {
        self.fail_at.store(call, Ordering::Relaxed);
    }

    /// Stop refusing requests without clearing the call counter.
    pub fn disarm(&self) {
        self.fail_at.store(0, Ordering::Relaxed);
    }

    /// How many times `allocate()` has been called.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    /// Element counts of every request, refused ones included, in call order.
    pub fn requests(&self) -> Vec<usize> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// Clear counters and disarm.
    pub fn reset(&self) {
        self.fail_at.store(0, Ordering::Relaxed);
        self.calls.store(0, Ordering::Relaxed);
        if let Ok(mut requests) = self.requests.lock() {
            requests.clear();
        }
    }
}

impl Default for FailingAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl Allocator for FailingAllocator {
    fn allocate(&self, len: usize) -> Result<Box<[i32]>, AllocError> {
        let call = self.calls.fetch_add(1, Ordering::Relaxed) + 1;
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(len);
        }
        if call == self.fail_at.load(Ordering::Relaxed) {
            return Err(AllocError::Injected { call });
        }
        self.inner.allocate(len)
    }
}
