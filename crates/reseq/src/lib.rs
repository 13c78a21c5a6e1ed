//! reseq: an exact-capacity integer sequence with an injectable allocator.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the reseq sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use reseq::prelude::*;
//!
//! let mut seq = ArraySeq::from_slice(&[10, 20, 30, 40, 50], SystemAllocator::default()).unwrap();
//! seq.insert_at(2, 999).unwrap();
//! assert_eq!(seq, [10, 20, 999, 30, 40, 50]);
//!
//! assert_eq!(seq.remove_first(), Ok(10));
//! assert_eq!(seq.len(), 5);
//!
//! // A tight ceiling turns oversized requests into recoverable errors.
//! let small = SystemAllocator::new(AllocConfig::with_max_elements(4));
//! let mut tiny = ArraySeq::with_len(4, small).unwrap();
//! assert!(matches!(tiny.insert_last(1), Err(SeqError::AllocationFailed(_))));
//! assert_eq!(tiny.len(), 4);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `reseq-core` | Allocator seam, configuration, error types |
//! | [`array`] | `reseq-array` | `ArraySeq` and the absent-aware `slot` API |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Allocator seam, configuration, and errors (`reseq-core`).
pub use reseq_core as types;

/// The sequence container (`reseq-array`).
///
/// [`array::slot`] holds the operations over `Option<ArraySeq>`.
pub use reseq_array as array;

/// Common imports for typical reseq usage.
pub mod prelude {
    pub use reseq_array::{ArraySeq, Rejected};
    pub use reseq_core::{AllocConfig, AllocError, Allocator, SeqError, SystemAllocator};
}
