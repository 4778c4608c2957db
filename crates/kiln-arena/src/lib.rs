//! Chunked bump-pointer arena.
//!
//! Serves many short-lived allocations from large contiguous chunks with no
//! per-allocation bookkeeping. The whole arena is reset (buffers kept) or
//! released in O(chunks) time; individual allocations are never freed.
//!
//! # Architecture
//!
//! ```text
//! Arena (allocation API, reset / free)
//! └── ChunkList (growth policy, current-chunk index)
//!     └── Chunk[] (fixed-capacity Vec<u8> + bump cursor)
//! ```
//!
//! Every allocation returns a [`Region`]: a chunk index, offset and length.
//! Regions are plain values; the bytes are reached through the arena that
//! produced them, so the crate needs no `unsafe`.
//!
//! # Example
//!
//! ```
//! use kiln_arena::{Arena, DEFAULT_ALIGNMENT};
//!
//! let mut arena = Arena::new(1024)?;
//! let a = arena.alloc(1)?;
//! let b = arena.alloc(1)?;
//! assert_eq!(b.addr() - a.addr(), DEFAULT_ALIGNMENT);
//!
//! let name = arena.alloc_str("kiln")?;
//! assert_eq!(arena.str(name), Some("kiln"));
//!
//! arena.reset();
//! assert_eq!(arena.alloc(1)?.addr(), a.addr());
//! arena.free();
//! # Ok::<(), kiln_arena::ArenaError>(())
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod align;
pub mod arena;
pub mod chunk;
pub mod config;
pub mod error;
pub mod region;
pub mod stats;

// Public re-exports for the primary API surface.
pub use align::DEFAULT_ALIGNMENT;
pub use arena::{Arena, ArenaState};
pub use config::ArenaConfig;
pub use error::ArenaError;
pub use region::Region;
pub use stats::ArenaStats;
