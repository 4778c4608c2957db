//! The public arena type.
//!
//! [`Arena`] wraps a [`ChunkList`] with the allocation API (default,
//! byte-packed and explicitly aligned requests), region resolution, and the
//! whole-arena lifecycle: [`reset`](Arena::reset) rewinds every chunk,
//! [`free`](Arena::free) (or dropping the arena) releases them.

use std::alloc::Layout;
use std::fmt;

use tracing::{debug, trace};

use crate::align::{self, DEFAULT_ALIGNMENT};
use crate::chunk::ChunkList;
use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::region::Region;
use crate::stats::ArenaStats;

/// Lifecycle state of a live arena.
///
/// There is no `Freed` variant: [`Arena::free`] consumes the arena, so a
/// freed arena cannot be observed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArenaState {
    /// No chunk has been created yet.
    Empty,
    /// At least one chunk exists.
    Active,
}

/// A chunked bump-pointer arena.
///
/// Serves allocations by advancing a cursor through large byte chunks.
/// Individual allocations are never freed; the whole arena is either
/// [reset](Arena::reset) (buffers kept) or [freed](Arena::free).
///
/// Not internally synchronized: all mutation takes `&mut self`. Use one
/// arena per thread, or wrap it in a `Mutex`.
pub struct Arena {
    chunks: ChunkList,
    zero_fill: bool,
}

impl Arena {
    /// Create an arena with the given chunk-size hint.
    ///
    /// A hint of 0 uses [`ArenaConfig::DEFAULT_CHUNK_SIZE`] and creates
    /// chunks lazily. Any other value becomes the chunk size and the first
    /// chunk is created immediately.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::OutOfMemory`] if the first chunk cannot be
    /// allocated.
    pub fn new(initial_chunk_bytes: usize) -> Result<Self, ArenaError> {
        Self::with_config(ArenaConfig::new(initial_chunk_bytes))
    }

    /// Create an arena from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::InvalidConfig`] if `config` fails validation,
    /// or [`ArenaError::OutOfMemory`] if an eager first chunk cannot be
    /// allocated.
    pub fn with_config(config: ArenaConfig) -> Result<Self, ArenaError> {
        config.validate()?;
        let mut chunks = ChunkList::new(config.chunk_size, config.max_chunks);
        if config.eager {
            chunks.reserve(config.chunk_size)?;
        }
        Ok(Self {
            chunks,
            zero_fill: config.zero_fill,
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ArenaState {
        if self.chunks.chunk_count() == 0 {
            ArenaState::Empty
        } else {
            ArenaState::Active
        }
    }

    /// Ensure the current chunk has at least `bytes` bytes of room.
    ///
    /// Creates a chunk of `max(chunk_size, bytes)` bytes when it does not.
    /// A following byte-packed allocation of up to `bytes` bytes is then
    /// guaranteed not to grow the arena.
    pub fn reserve(&mut self, bytes: usize) -> Result<(), ArenaError> {
        self.chunks.reserve(bytes)
    }

    /// Allocate `size` bytes at [`DEFAULT_ALIGNMENT`].
    pub fn alloc(&mut self, size: usize) -> Result<Region, ArenaError> {
        self.alloc_aligned(size, DEFAULT_ALIGNMENT)
    }

    /// Allocate `size` bytes with no alignment padding.
    ///
    /// Intended for text and raw byte buffers: consecutive calls are packed
    /// back to back.
    pub fn alloc_chars(&mut self, size: usize) -> Result<Region, ArenaError> {
        self.alloc_aligned(size, 1)
    }

    /// Allocate `size` bytes whose address is a multiple of `align`.
    ///
    /// A request that does not fit in the current chunk is served whole
    /// from another chunk; regions never straddle chunks. A zero `size`
    /// yields an empty region at a valid address.
    ///
    /// # Errors
    ///
    /// - [`ArenaError::InvalidAlignment`] if `align` is not a power of two.
    ///   Nothing is allocated.
    /// - [`ArenaError::OutOfMemory`] if a new chunk was needed and could not
    ///   be allocated.
    /// - [`ArenaError::CapacityExceeded`] if a new chunk was needed and the
    ///   configured chunk limit was reached.
    pub fn alloc_aligned(&mut self, size: usize, align: usize) -> Result<Region, ArenaError> {
        align::check(align)?;
        let region = self.chunks.alloc(size, align)?;
        if self.zero_fill {
            if let Some(bytes) = self.bytes_mut(region) {
                bytes.fill(0);
            }
        }
        Ok(region)
    }

    /// Allocate space matching `layout`'s size and alignment.
    pub fn alloc_layout(&mut self, layout: Layout) -> Result<Region, ArenaError> {
        self.alloc_aligned(layout.size(), layout.align())
    }

    /// Copy `src` into a fresh byte-packed region.
    pub fn alloc_copy(&mut self, src: &[u8]) -> Result<Region, ArenaError> {
        let region = self.alloc_chars(src.len())?;
        if let Some(dst) = self.bytes_mut(region) {
            dst.copy_from_slice(src);
        }
        Ok(region)
    }

    /// Copy a string into the arena. Read it back with [`str`](Arena::str).
    pub fn alloc_str(&mut self, s: &str) -> Result<Region, ArenaError> {
        self.alloc_copy(s.as_bytes())
    }

    /// The bytes of `region`.
    ///
    /// Returns `None` if the region does not belong to this arena.
    pub fn bytes(&self, region: Region) -> Option<&[u8]> {
        let chunk = self.chunks.get(region.chunk)?;
        if chunk.base_addr().wrapping_add(region.offset) != region.addr {
            return None;
        }
        chunk.slice(region.offset, region.len)
    }

    /// Mutable access to the bytes of `region`.
    ///
    /// Returns `None` if the region does not belong to this arena.
    pub fn bytes_mut(&mut self, region: Region) -> Option<&mut [u8]> {
        let chunk = self.chunks.get_mut(region.chunk)?;
        if chunk.base_addr().wrapping_add(region.offset) != region.addr {
            return None;
        }
        chunk.slice_mut(region.offset, region.len)
    }

    /// The region's bytes as UTF-8, if they are valid UTF-8.
    pub fn str(&self, region: Region) -> Option<&str> {
        std::str::from_utf8(self.bytes(region)?).ok()
    }

    /// Rewind every chunk to empty, keeping all buffers.
    ///
    /// Chunk count, order and addresses are unchanged and allocation
    /// restarts in the first chunk, so replaying the allocation sequence
    /// issued after creation returns the same addresses. Regions handed out
    /// earlier still resolve but their contents are no longer theirs.
    pub fn reset(&mut self) {
        trace!(
            chunks = self.chunks.chunk_count(),
            used = self.chunks.used_bytes(),
            "arena reset"
        );
        self.chunks.reset();
    }

    /// Release every chunk. The arena is consumed.
    ///
    /// Equivalent to dropping the arena.
    pub fn free(self) {
        drop(self);
    }

    /// Baseline capacity of new chunks in bytes.
    pub fn chunk_size(&self) -> usize {
        self.chunks.chunk_size()
    }

    /// Number of chunks owned by the arena.
    pub fn chunk_count(&self) -> usize {
        self.chunks.chunk_count()
    }

    /// Index of the chunk accepting allocations, if any chunk exists.
    pub fn current_chunk(&self) -> Option<usize> {
        self.chunks.current()
    }

    /// Base address of chunk `index`.
    pub fn chunk_base(&self, index: usize) -> Option<usize> {
        self.chunks.get(index).map(|chunk| chunk.base_addr())
    }

    /// Capacity of chunk `index` in bytes.
    pub fn chunk_capacity(&self, index: usize) -> Option<usize> {
        self.chunks.get(index).map(|chunk| chunk.capacity())
    }

    /// Bytes handed out since creation or the last reset, padding included.
    pub fn used_bytes(&self) -> usize {
        self.chunks.used_bytes()
    }

    /// Total bytes held by all chunks.
    pub fn capacity_bytes(&self) -> usize {
        self.chunks.capacity_bytes()
    }

    /// Free bytes left in the current chunk, ignoring alignment.
    pub fn remaining(&self) -> usize {
        self.chunks
            .current()
            .and_then(|index| self.chunks.get(index))
            .map_or(0, |chunk| chunk.remaining())
    }

    /// Snapshot of the arena's memory usage.
    pub fn stats(&self) -> ArenaStats {
        ArenaStats {
            chunk_count: self.chunk_count(),
            used_bytes: self.used_bytes(),
            capacity_bytes: self.capacity_bytes(),
            remaining_in_current: self.remaining(),
        }
    }
}

impl Default for Arena {
    /// An empty, lazily growing arena with the default chunk size.
    fn default() -> Self {
        Self {
            chunks: ChunkList::new(ArenaConfig::DEFAULT_CHUNK_SIZE, None),
            zero_fill: false,
        }
    }
}

impl Drop for Arena {
    fn drop(&mut self) {
        debug!(
            chunks = self.chunks.chunk_count(),
            bytes = self.chunks.capacity_bytes(),
            "arena released"
        );
    }
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("chunk_size", &self.chunk_size())
            .field("chunk_count", &self.chunk_count())
            .field("current_chunk", &self.current_chunk())
            .field("used_bytes", &self.used_bytes())
            .field("capacity_bytes", &self.capacity_bytes())
            .finish()
    }
}
