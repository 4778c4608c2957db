//! Benchmark profiles for the kiln arena.
//!
//! Each profile pairs a chunk size with an allocation script:
//!
//! - [`reference_profile`]: 1000 small default-aligned requests plus a few
//!   oversized ones, on 1 KiB chunks
//! - [`text_profile`]: byte-packed requests shaped like short strings
//! - [`aligned_profile`]: cache-line and page aligned requests

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use kiln_arena::{Arena, ArenaError, ArenaStats};
use kiln_test_utils::{large_ops, replay, small_varying_ops, AllocOp};

/// A chunk size and the script to run against it.
#[derive(Clone, Debug)]
pub struct BenchProfile {
    /// Chunk size passed to [`Arena::new`].
    pub chunk_size: usize,
    /// Requests issued per iteration.
    pub ops: Vec<AllocOp>,
}

impl BenchProfile {
    /// Build a fresh arena for this profile.
    pub fn arena(&self) -> Result<Arena, ArenaError> {
        Arena::new(self.chunk_size)
    }

    /// Run the script once on a fresh arena and report the resulting usage.
    pub fn dry_run(&self) -> Result<ArenaStats, ArenaError> {
        let mut arena = self.arena()?;
        replay(&mut arena, &self.ops)?;
        Ok(arena.stats())
    }
}

/// 1000 requests of 1 to 32 bytes followed by ten 2 KiB requests, 1 KiB chunks.
pub fn reference_profile() -> BenchProfile {
    let mut ops = small_varying_ops(1000);
    ops.extend(large_ops(10, 2048));
    BenchProfile {
        chunk_size: 1024,
        ops,
    }
}

/// 2000 byte-packed requests of 4 to 67 bytes, 4 KiB chunks.
pub fn text_profile() -> BenchProfile {
    BenchProfile {
        chunk_size: 4096,
        ops: (0..2000).map(|i| AllocOp::Chars(4 + i % 64)).collect(),
    }
}

/// Alternating 64-byte and 4096-byte aligned requests, 64 KiB chunks.
pub fn aligned_profile() -> BenchProfile {
    let ops = (0..256)
        .map(|i| {
            let align = if i % 2 == 0 { 64 } else { 4096 };
            AllocOp::Aligned { size: 48, align }
        })
        .collect();
    BenchProfile {
        chunk_size: 64 * 1024,
        ops,
    }
}
