//! Point-in-time usage figures for an arena.

use std::fmt;

/// Memory usage of an [`Arena`](crate::Arena), captured by
/// [`Arena::stats`](crate::Arena::stats).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArenaStats {
    /// Number of chunks owned by the arena.
    pub chunk_count: usize,
    /// Bytes handed out since creation or the last reset, padding included.
    pub used_bytes: usize,
    /// Total bytes held across all chunks.
    pub capacity_bytes: usize,
    /// Free bytes left in the current chunk.
    pub remaining_in_current: usize,
}

impl ArenaStats {
    /// Fraction of held memory currently handed out, in `[0, 1]`.
    pub fn utilization(&self) -> f64 {
        if self.capacity_bytes == 0 {
            0.0
        } else {
            self.used_bytes as f64 / self.capacity_bytes as f64
        }
    }
}

impl fmt::Display for ArenaStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} chunks, {}/{} bytes used ({:.1}%), {} free in current chunk",
            self.chunk_count,
            self.used_bytes,
            self.capacity_bytes,
            self.utilization() * 100.0,
            self.remaining_in_current
        )
    }
}
