//! Core types and traits for the reseq sequence container.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! allocator seam through which every sequence buffer is acquired, the
//! allocator configuration, and the error taxonomy shared by the workspace.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod alloc;
pub mod config;
pub mod error;

pub use alloc::{Allocator, SystemAllocator, ELEMENT_BYTES};
pub use config::AllocConfig;
pub use error::{AllocError, SeqError};
