//! Configuration for splitting behavior.
//!
//! - [`SplitConfig`] - Boundary bit-width and buffer growth cap

use crate::error::ChunkError;

/// Default boundary bit-width, giving a mean chunk length of 8 KiB.
pub const DEFAULT_SPLIT_BITS: u32 = 13;

/// Default cap on buffered-but-unsplit input for the reader-facing
/// adapters (64 MiB).
pub const DEFAULT_MAX_BUFFERED: usize = 64 * 1024 * 1024;

/// Configuration for content-defined splitting.
///
/// `bits` controls the target mean chunk length: a boundary is declared
/// when the low `bits` bits of the rolling checksum are all ones, so
/// for random input chunks average `2^bits` bytes. Smaller values give
/// shorter, more numerous chunks (finer deduplication at more per-chunk
/// bookkeeping); larger values give fewer, larger chunks. Valid widths
/// are `1..=31`.
///
/// No maximum chunk length is enforced by the boundary policy itself -
/// an unlucky run of bytes can produce an arbitrarily long chunk. The
/// reader-facing adapters ([`ChunkIter`](crate::ChunkIter) and the
/// async stream) instead cap how much unsplit input they will buffer
/// via `max_buffered`, and report
/// [`ChunkError::ChunkTooLarge`] when the cap is hit.
///
/// # Example
///
/// ```
/// use rollsplit::SplitConfig;
///
/// // Default: 13 bits, ~8 KiB average chunks
/// let config = SplitConfig::default();
/// assert_eq!(config.avg_size(), 8 * 1024);
///
/// // Finer-grained chunks, ~1 KiB average
/// let config = SplitConfig::new(10)?;
/// # Ok::<(), rollsplit::ChunkError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SplitConfig {
    /// Number of low checksum bits tested for a boundary.
    bits: u32,

    /// Cap on buffered-but-unsplit input in the reader adapters.
    max_buffered: usize,
}

impl SplitConfig {
    /// Creates a configuration with the given boundary bit-width.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::InvalidConfig`] if `bits` is outside
    /// `1..=31`.
    ///
    /// # Example
    ///
    /// ```
    /// use rollsplit::SplitConfig;
    ///
    /// let config = SplitConfig::new(4)?;
    /// assert_eq!(config.bits(), 4);
    /// assert_eq!(config.avg_size(), 16);
    /// # Ok::<(), rollsplit::ChunkError>(())
    /// ```
    pub fn new(bits: u32) -> Result<Self, ChunkError> {
        if bits == 0 {
            return Err(ChunkError::InvalidConfig {
                message: "bits must be at least 1",
            });
        }
        if bits > 31 {
            return Err(ChunkError::InvalidConfig {
                message: "bits must be at most 31",
            });
        }
        Ok(Self {
            bits,
            max_buffered: DEFAULT_MAX_BUFFERED,
        })
    }

    /// Sets the buffered-input cap for the reader adapters.
    ///
    /// Note: this does not validate the configuration. Use
    /// [`SplitConfig::validate`] to check it.
    ///
    /// # Example
    ///
    /// ```
    /// use rollsplit::SplitConfig;
    ///
    /// let config = SplitConfig::default().with_max_buffered(1024 * 1024);
    /// assert_eq!(config.max_buffered(), 1024 * 1024);
    /// ```
    pub fn with_max_buffered(mut self, max_buffered: usize) -> Self {
        self.max_buffered = max_buffered;
        self
    }

    /// Returns the boundary bit-width.
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Returns the boundary mask, `(1 << bits) - 1`.
    pub fn mask(&self) -> u32 {
        (1u32 << self.bits) - 1
    }

    /// Returns the target mean chunk length in bytes, `2^bits`.
    pub fn avg_size(&self) -> usize {
        1usize << self.bits
    }

    /// Returns the buffered-input cap for the reader adapters.
    pub fn max_buffered(&self) -> usize {
        self.max_buffered
    }

    /// Validates the current configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use rollsplit::SplitConfig;
    ///
    /// let config = SplitConfig::default().with_max_buffered(0);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ChunkError> {
        Self::new(self.bits)?;
        if self.max_buffered == 0 {
            return Err(ChunkError::InvalidConfig {
                message: "max_buffered must be non-zero",
            });
        }
        Ok(())
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            bits: DEFAULT_SPLIT_BITS,
            max_buffered: DEFAULT_MAX_BUFFERED,
        }
    }
}
