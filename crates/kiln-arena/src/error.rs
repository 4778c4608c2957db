//! Arena-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during arena operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The system allocator could not provide a new chunk buffer, or the
    /// chunk size needed to hold the request overflowed `usize`.
    OutOfMemory {
        /// Number of bytes the new chunk needed.
        requested: usize,
    },
    /// The requested alignment is zero or not a power of two.
    InvalidAlignment {
        /// The rejected alignment.
        align: usize,
    },
    /// The configured chunk limit was reached and the request does not fit
    /// in any existing chunk.
    CapacityExceeded {
        /// Number of bytes requested.
        requested: usize,
        /// Total capacity across all chunks, in bytes.
        capacity: usize,
    },
    /// An [`ArenaConfig`](crate::ArenaConfig) failed validation.
    InvalidConfig {
        /// Human-readable explanation.
        reason: String,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfMemory { requested } => {
                write!(f, "out of memory: failed to allocate a {requested}-byte chunk")
            }
            Self::InvalidAlignment { align } => {
                write!(f, "invalid alignment {align}: must be a power of two")
            }
            Self::CapacityExceeded {
                requested,
                capacity,
            } => {
                write!(
                    f,
                    "arena capacity exceeded: requested {requested} bytes, capacity {capacity} bytes"
                )
            }
            Self::InvalidConfig { reason } => {
                write!(f, "invalid arena config: {reason}")
            }
        }
    }
}

impl Error for ArenaError {}
