//! Arena configuration parameters.

use crate::error::ArenaError;

/// Configuration for an [`Arena`](crate::Arena).
///
/// Controls chunk sizing, eager creation, the optional chunk limit and
/// zero-filling. Validated at construction; immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Baseline capacity of each chunk in bytes.
    ///
    /// Requests larger than this get a dedicated chunk sized to fit.
    /// Default: 65_536. Must be non-zero.
    pub chunk_size: usize,

    /// Create the first chunk at construction instead of on first use.
    pub eager: bool,

    /// Upper bound on the number of chunks, or `None` for no limit.
    pub max_chunks: Option<usize>,

    /// Zero every region before handing it out.
    ///
    /// Chunk buffers are zeroed once at creation either way; this only
    /// matters for memory reused after a reset.
    pub zero_fill: bool,
}

impl ArenaConfig {
    /// Default chunk size: 64 KiB.
    pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

    /// Create a config for the given chunk-size hint.
    ///
    /// A hint of 0 selects [`DEFAULT_CHUNK_SIZE`](Self::DEFAULT_CHUNK_SIZE)
    /// with lazy chunk creation. Any other hint is used verbatim and the
    /// first chunk is created eagerly.
    pub fn new(chunk_size: usize) -> Self {
        if chunk_size == 0 {
            return Self::default();
        }
        Self {
            chunk_size,
            eager: true,
            max_chunks: None,
            zero_fill: false,
        }
    }

    /// Cap the number of chunks the arena may create.
    pub fn with_max_chunks(mut self, max_chunks: usize) -> Self {
        self.max_chunks = Some(max_chunks);
        self
    }

    /// Zero every region before returning it.
    pub fn with_zero_fill(mut self, zero_fill: bool) -> Self {
        self.zero_fill = zero_fill;
        self
    }

    /// Create the first chunk at construction time (or not).
    pub fn with_eager(mut self, eager: bool) -> Self {
        self.eager = eager;
        self
    }

    /// Check the config for values the arena cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::InvalidConfig`] if `chunk_size` is zero or
    /// `max_chunks` is `Some(0)`.
    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.chunk_size == 0 {
            return Err(ArenaError::InvalidConfig {
                reason: "chunk_size must be non-zero".to_string(),
            });
        }
        if self.max_chunks == Some(0) {
            return Err(ArenaError::InvalidConfig {
                reason: "max_chunks must allow at least one chunk".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            chunk_size: Self::DEFAULT_CHUNK_SIZE,
            eager: false,
            max_chunks: None,
            zero_fill: false,
        }
    }
}
