//! Error types for the reseq workspace.
//!
//! Two layers: [`AllocError`] describes why the allocator seam refused a
//! request, [`SeqError`] describes why a sequence operation failed. Every
//! variant is recoverable; no operation leaves partial state behind.

use std::error::Error;
use std::fmt;

/// Errors returned by an [`Allocator`](crate::Allocator).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// A zero-length buffer was requested. The seam never hands out
    /// empty allocations.
    ZeroSize,
    /// The request is larger than the configured per-request ceiling.
    CapacityExceeded {
        /// Number of bytes requested.
        requested: usize,
        /// Ceiling in bytes.
        capacity: usize,
    },
    /// The system heap could not satisfy the request.
    OutOfMemory {
        /// Number of bytes requested.
        requested: usize,
    },
    /// A fault-injecting allocator refused this request on purpose.
    Injected {
        /// 1-based ordinal of the refused call.
        call: u64,
    },
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroSize => write!(f, "zero-size allocation requested"),
            Self::CapacityExceeded {
                requested,
                capacity,
            } => {
                write!(
                    f,
                    "allocation capacity exceeded: requested {requested} bytes, capacity {capacity} bytes"
                )
            }
            Self::OutOfMemory { requested } => {
                write!(f, "out of memory: could not allocate {requested} bytes")
            }
            Self::Injected { call } => write!(f, "injected failure on allocation call {call}"),
        }
    }
}

impl Error for AllocError {}

/// Errors from sequence construction, access, and mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SeqError {
    /// The allocator could not provide the replacement buffer. The
    /// sequence the operation was applied to is unchanged.
    AllocationFailed(AllocError),
    /// A required sequence handle was absent.
    InvalidReference,
    /// The index is outside the range the operation accepts.
    OutOfBounds {
        /// The rejected index.
        index: usize,
        /// Length of the sequence at the time of the call.
        len: usize,
    },
    /// A construction size that cannot describe a sequence (zero or negative).
    InvalidSize {
        /// The rejected size as the caller passed it.
        requested: i64,
    },
}

impl fmt::Display for SeqError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailed(reason) => write!(f, "allocation failed: {reason}"),
            Self::InvalidReference => write!(f, "sequence handle is absent"),
            Self::OutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for length {len}")
            }
            Self::InvalidSize { requested } => {
                write!(f, "invalid sequence size {requested}")
            }
        }
    }
}

impl Error for SeqError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::AllocationFailed(reason) => Some(reason),
            _ => None,
        }
    }
}

impl From<AllocError> for SeqError {
    fn from(err: AllocError) -> Self {
        Self::AllocationFailed(err)
    }
}
