//! Region handles returned by the allocation API.
//!
//! A [`Region`] names a byte range inside one arena chunk. It is a plain
//! `Copy` value that does not borrow the arena; bytes are reached through
//! [`Arena::bytes`](crate::Arena::bytes) and friends.

use std::fmt;

/// Location and size of one allocation within an arena.
///
/// Regions stay meaningful until the arena is reset or freed. After a
/// reset a region still resolves, but its bytes may belong to a newer
/// allocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Region {
    /// Index of the chunk in creation order.
    pub(crate) chunk: usize,
    /// Byte offset of the first byte within the chunk.
    pub(crate) offset: usize,
    /// Length in bytes.
    pub(crate) len: usize,
    /// Absolute address of the first byte.
    pub(crate) addr: usize,
}

impl Region {
    pub(crate) fn new(chunk: usize, offset: usize, len: usize, addr: usize) -> Self {
        Self {
            chunk,
            offset,
            len,
            addr,
        }
    }

    /// Index of the chunk holding this region.
    pub fn chunk(&self) -> usize {
        self.chunk
    }

    /// Byte offset within the chunk.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether this is a zero-length region.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Address of the first byte. Never zero.
    pub fn addr(&self) -> usize {
        self.addr
    }

    /// Address one past the last byte.
    pub fn end_addr(&self) -> usize {
        self.addr + self.len
    }

    /// Whether the start address is a multiple of `align`.
    pub fn is_aligned_to(&self, align: usize) -> bool {
        align.is_power_of_two() && self.addr & (align - 1) == 0
    }

    /// Whether the two regions share at least one byte.
    pub fn overlaps(&self, other: &Region) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.addr < other.end_addr()
            && other.addr < self.end_addr()
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Region(chunk={}, off={}, len={}, addr={:#x})",
            self.chunk, self.offset, self.len, self.addr
        )
    }
}
