//! Fixed-capacity byte chunks and the growable chunk list.
//!
//! A [`Chunk`] is a contiguous byte buffer with a bump cursor. A
//! [`ChunkList`] owns chunks in creation order and decides when a new one
//! is needed and how large it must be.

use tracing::debug;

use crate::align;
use crate::error::ArenaError;
use crate::region::Region;

/// A single contiguous byte buffer with bump allocation.
///
/// The buffer is allocated once, at full capacity, and never resized, so
/// its base address is stable for the chunk's whole life. Only the cursor
/// moves.
pub struct Chunk {
    /// Backing storage. `data.len()` is the chunk capacity.
    data: Vec<u8>,
    /// Bump pointer: offset of the first unused byte.
    cursor: usize,
}

impl Chunk {
    /// Allocate a zeroed chunk of exactly `capacity` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::OutOfMemory`] if the system allocator refuses
    /// the buffer or `capacity` exceeds `isize::MAX`.
    pub fn new(capacity: usize) -> Result<Self, ArenaError> {
        let mut data = Vec::new();
        data.try_reserve_exact(capacity)
            .map_err(|_| ArenaError::OutOfMemory {
                requested: capacity,
            })?;
        // Fits in the reservation, so this never reallocates.
        data.resize(capacity, 0);
        Ok(Self { data, cursor: 0 })
    }

    /// Address of the first byte of the buffer.
    pub fn base_addr(&self) -> usize {
        self.data.as_ptr() as usize
    }

    /// Where a `size`-byte, `align`-aligned request would land.
    ///
    /// Returns the `(start, end)` offsets without committing them, or
    /// `None` if the request does not fit in the remaining space.
    fn placement(&self, size: usize, align: usize) -> Option<(usize, usize)> {
        let pad = align::padding(self.base_addr().wrapping_add(self.cursor), align);
        let start = self.cursor.checked_add(pad)?;
        let end = start.checked_add(size)?;
        (end <= self.data.len()).then_some((start, end))
    }

    /// Whether a request would fit without growing.
    pub fn fits(&self, size: usize, align: usize) -> bool {
        self.placement(size, align).is_some()
    }

    /// Bump-allocate `size` bytes aligned to `align` (a power of two).
    ///
    /// Returns the aligned start offset, or `None` if there is not enough
    /// room left. A failed call leaves the cursor untouched.
    pub fn alloc(&mut self, size: usize, align: usize) -> Option<usize> {
        let (start, end) = self.placement(size, align)?;
        self.cursor = end;
        Some(start)
    }

    /// Shared view of `len` bytes at `offset`, if in bounds.
    pub fn slice(&self, offset: usize, len: usize) -> Option<&[u8]> {
        self.data.get(offset..offset.checked_add(len)?)
    }

    /// Mutable view of `len` bytes at `offset`, if in bounds.
    pub fn slice_mut(&mut self, offset: usize, len: usize) -> Option<&mut [u8]> {
        self.data.get_mut(offset..offset.checked_add(len)?)
    }

    /// Rewind the cursor to zero. The bytes are left as they are.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Bytes handed out so far, including alignment padding.
    pub fn used(&self) -> usize {
        self.cursor
    }

    /// Total capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Bytes left after the cursor.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.cursor
    }
}

/// A growable list of [`Chunk`]s with overflow-based bump allocation.
///
/// Requests that do not fit in the current chunk are placed entirely in
/// another one; nothing ever straddles a chunk boundary. New chunks are
/// `max(chunk_size, size + align)` bytes, so an oversized request gets a
/// dedicated chunk while ordinary traffic keeps using standard ones.
pub struct ChunkList {
    chunks: Vec<Chunk>,
    chunk_size: usize,
    max_chunks: Option<usize>,
    /// Index of the chunk currently being filled. Chunks after it are empty.
    current: usize,
}

impl ChunkList {
    /// Create an empty list. No memory is allocated until the first request.
    pub fn new(chunk_size: usize, max_chunks: Option<usize>) -> Self {
        Self {
            chunks: Vec::new(),
            chunk_size,
            max_chunks,
            current: 0,
        }
    }

    /// Bump-allocate `size` bytes aligned to `align`, growing if needed.
    pub fn alloc(&mut self, size: usize, align: usize) -> Result<Region, ArenaError> {
        if let Some(chunk) = self.chunks.get_mut(self.current) {
            if let Some(offset) = chunk.alloc(size, align) {
                let addr = chunk.base_addr() + offset;
                return Ok(Region::new(self.current, offset, size, addr));
            }
        }

        let min_capacity = size
            .checked_add(align)
            .ok_or(ArenaError::OutOfMemory {
                requested: usize::MAX,
            })?;
        let index = self.ensure_capacity(size, align, min_capacity)?;
        let chunk = &mut self.chunks[index];
        let offset = chunk.alloc(size, align).ok_or(ArenaError::OutOfMemory {
            requested: min_capacity,
        })?;
        Ok(Region::new(index, offset, size, chunk.base_addr() + offset))
    }

    /// Make sure the current chunk has `bytes` bytes of unaligned room.
    pub fn reserve(&mut self, bytes: usize) -> Result<(), ArenaError> {
        self.ensure_capacity(bytes, 1, bytes).map(|_| ())
    }

    /// Select or create a chunk that can hold the request and make it current.
    ///
    /// Order of preference: the current chunk, then chunks retained by an
    /// earlier reset (in creation order), then a fresh chunk of at least
    /// `min_capacity` bytes.
    fn ensure_capacity(
        &mut self,
        size: usize,
        align: usize,
        min_capacity: usize,
    ) -> Result<usize, ArenaError> {
        if let Some(index) = (self.current..self.chunks.len())
            .find(|&index| self.chunks[index].fits(size, align))
        {
            self.current = index;
            return Ok(index);
        }

        if let Some(max) = self.max_chunks {
            if self.chunks.len() >= max {
                return Err(ArenaError::CapacityExceeded {
                    requested: size,
                    capacity: self.capacity_bytes(),
                });
            }
        }

        let capacity = min_capacity.max(self.chunk_size);
        let chunk = Chunk::new(capacity)?;
        self.chunks
            .try_reserve(1)
            .map_err(|_| ArenaError::OutOfMemory {
                requested: capacity,
            })?;
        self.chunks.push(chunk);
        self.current = self.chunks.len() - 1;
        debug!(
            chunk = self.current,
            capacity,
            requested = size,
            "arena chunk created"
        );
        Ok(self.current)
    }

    /// The chunk at `index`, if it exists.
    pub fn get(&self, index: usize) -> Option<&Chunk> {
        self.chunks.get(index)
    }

    /// Mutable access to the chunk at `index`, if it exists.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Chunk> {
        self.chunks.get_mut(index)
    }

    /// Reset every chunk's cursor and start allocating from the first chunk.
    pub fn reset(&mut self) {
        for chunk in &mut self.chunks {
            chunk.reset();
        }
        self.current = 0;
    }

    /// Index of the chunk accepting allocations, or `None` before the first
    /// chunk exists.
    pub fn current(&self) -> Option<usize> {
        (self.current < self.chunks.len()).then_some(self.current)
    }

    /// Baseline capacity for new chunks.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Total number of chunks currently allocated.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Bytes handed out across all chunks.
    pub fn used_bytes(&self) -> usize {
        self.chunks.iter().map(Chunk::used).sum()
    }

    /// Total capacity across all chunks.
    pub fn capacity_bytes(&self) -> usize {
        self.chunks.iter().map(Chunk::capacity).sum()
    }
}
