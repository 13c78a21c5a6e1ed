//! Exact-capacity integer sequence rebuilt through an injectable allocator.
//!
//! [`ArraySeq`] is a dynamic array of `i32` whose buffer length always equals
//! its element count. Inserting or removing an element builds a complete
//! replacement buffer through the [`Allocator`] the sequence was constructed
//! with, so an allocation failure at any point leaves the original sequence
//! untouched and reachable.
//!
//! ```text
//! insert_at(2, 999) on [10, 20, 30, 40, 50]
//!
//!   old  [10 20 30 40 50]          (kept until the new buffer is complete)
//!          |  |   \  \  \
//!   new  [10 20 999 30 40 50]      (allocate(6) -> copy prefix, value, suffix)
//! ```
//!
//! The [`slot`] module offers the same operations over `Option<ArraySeq>`
//! for callers that track an absent handle.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod seq;
pub mod slot;

pub use reseq_core::{AllocConfig, AllocError, Allocator, SeqError, SystemAllocator};
pub use seq::{ArraySeq, Rejected};
