//! Test utilities for kiln development.
//!
//! Provides [`AllocOp`] allocation scripts that can be replayed against an
//! [`Arena`], the standard workloads used by the arena's integration tests
//! and benchmarks, and proptest strategies for generating scripts.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use kiln_arena::{Arena, ArenaError, Region};

pub use fixtures::{arb_alloc_op, arb_script, large_ops, small_varying_ops};

/// One allocation request, as issued by a consumer of the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AllocOp {
    /// `Arena::alloc(size)`: default alignment.
    Default(usize),
    /// `Arena::alloc_chars(size)`: byte-packed.
    Chars(usize),
    /// `Arena::alloc_aligned(size, align)`.
    Aligned { size: usize, align: usize },
}

impl AllocOp {
    /// Requested size in bytes.
    pub fn size(&self) -> usize {
        match *self {
            AllocOp::Default(size) | AllocOp::Chars(size) => size,
            AllocOp::Aligned { size, .. } => size,
        }
    }

    /// Alignment the op asks for.
    pub fn align(&self) -> usize {
        match *self {
            AllocOp::Default(_) => kiln_arena::DEFAULT_ALIGNMENT,
            AllocOp::Chars(_) => 1,
            AllocOp::Aligned { align, .. } => align,
        }
    }

    /// Issue this op against `arena`.
    pub fn apply(&self, arena: &mut Arena) -> Result<Region, ArenaError> {
        match *self {
            AllocOp::Default(size) => arena.alloc(size),
            AllocOp::Chars(size) => arena.alloc_chars(size),
            AllocOp::Aligned { size, align } => arena.alloc_aligned(size, align),
        }
    }
}

/// Issue every op in order, stopping at the first failure.
pub fn replay(arena: &mut Arena, ops: &[AllocOp]) -> Result<Vec<Region>, ArenaError> {
    ops.iter().map(|op| op.apply(arena)).collect()
}

/// Addresses of a replayed script, for comparing two passes.
pub fn addresses(regions: &[Region]) -> Vec<usize> {
    regions.iter().map(Region::addr).collect()
}

/// Panics if any two non-empty regions share a byte.
pub fn assert_disjoint(regions: &[Region]) {
    let mut sorted: Vec<&Region> = regions.iter().filter(|r| !r.is_empty()).collect();
    sorted.sort_by_key(|r| r.addr());
    for pair in sorted.windows(2) {
        assert!(
            !pair[0].overlaps(pair[1]),
            "regions overlap: {} and {}",
            pair[0],
            pair[1]
        );
    }
}
