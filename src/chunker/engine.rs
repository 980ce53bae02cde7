//! Core chunking engine - Chunker with a streaming API.
//!
//! [`Chunker`] wraps the incremental [`StreamSplitter`] with input
//! buffering, offset bookkeeping and zero-copy chunk extraction:
//!
//! - `push()` - feed data in any size (1 byte, 8 KiB, 1 MiB, ...)
//! - `finish()` - flush the remaining bytes when the stream ends
//!
//! # Example
//!
//! ```
//! use rollsplit::{Chunker, SplitConfig};
//! use bytes::Bytes;
//!
//! let mut chunker = Chunker::new(SplitConfig::default());
//!
//! let mut chunks = chunker.push(Bytes::from(&b"first"[..]));
//! chunks.extend(chunker.push(Bytes::from(&b"second"[..])));
//! chunks.extend(chunker.finish());
//!
//! let total: usize = chunks.iter().map(|c| c.len()).sum();
//! assert_eq!(total, "firstsecond".len());
//! ```

use std::io::Read;

use bytes::Bytes;

use crate::chunk::Chunk;
use crate::chunker::ChunkIter;
use crate::config::SplitConfig;
use crate::split::{SplitAction, StreamSplitter};
use crate::util::combine_bytes;

/// A chunker that processes streaming byte data into content-defined
/// chunks.
///
/// `Chunker` accepts bytes via `push()` and yields chunks as the
/// rolling checksum finds boundaries, holding incomplete tail bytes
/// internally until the next `push()` or `finish()`. Boundaries are
/// deterministic: identical byte streams produce identical chunks
/// regardless of how the input is sliced across `push()` calls.
///
/// When a chunk falls entirely within a single pushed buffer its data
/// is a zero-copy slice of that buffer; only chunks spanning pushes
/// are stitched together into fresh storage.
///
/// One `Chunker` chunks one stream. [`Chunker::reset`] starts a new,
/// independent stream by installing a fresh splitter; mixing streams
/// through one splitter would let unrelated window state leak across
/// and destroy boundary locality.
#[derive(Debug)]
pub struct Chunker {
    splitter: StreamSplitter,
    pending: Option<Bytes>,
    offset: u64,
    config: SplitConfig,
}

impl Chunker {
    /// Creates a new chunker with the given configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use rollsplit::{Chunker, SplitConfig};
    ///
    /// let chunker = Chunker::new(SplitConfig::default());
    /// ```
    pub fn new(config: SplitConfig) -> Self {
        Self {
            splitter: StreamSplitter::with_config(config),
            pending: None,
            offset: 0,
            config,
        }
    }

    /// Pushes data into the chunker and returns the complete chunks it
    /// finished.
    ///
    /// Bytes after the last boundary are held internally and prefixed
    /// to the next `push()`'s data; call [`Chunker::finish`] at end of
    /// stream to flush them as the final chunk.
    ///
    /// Accumulating the returned chunks unboundedly is the caller's
    /// memory to spend; process or drop them promptly.
    pub fn push(&mut self, data: Bytes) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        if data.is_empty() {
            return chunks;
        }

        // The splitter's cursor already covers the pending bytes, so
        // only newly arrived bytes get scanned.
        let mut buffer = match self.pending.take() {
            Some(pending) => combine_bytes(&pending, &data),
            None => data,
        };

        loop {
            match self.splitter.feed(&buffer, true) {
                SplitAction::EmitChunk(n) => {
                    chunks.push(Chunk::with_offset(buffer.slice(..n), self.offset));
                    self.offset += n as u64;
                    buffer = buffer.slice(n..);
                }
                SplitAction::NeedMoreInput | SplitAction::EndOfStream => break,
            }
        }

        if !buffer.is_empty() {
            self.pending = Some(buffer);
        }
        chunks
    }

    /// Finalizes the stream and returns the final chunk, if any.
    ///
    /// Returns `None` when no bytes are pending. Idempotent: calling
    /// `finish()` again keeps returning `None` until
    /// [`Chunker::reset`].
    pub fn finish(&mut self) -> Option<Chunk> {
        let buffer = self.pending.take().unwrap_or_default();
        match self.splitter.feed(&buffer, false) {
            SplitAction::EmitChunk(n) => {
                // push() always scans to the end of the buffer, so the
                // only possible emission here is the final partial.
                debug_assert_eq!(n, buffer.len());
                let chunk = Chunk::with_offset(buffer.slice(..n), self.offset);
                self.offset += n as u64;
                Some(chunk)
            }
            SplitAction::NeedMoreInput | SplitAction::EndOfStream => None,
        }
    }

    /// Resets the chunker to chunk a new, independent stream.
    ///
    /// Installs a fresh splitter (window, accumulators and warm-up
    /// counter all start over) and clears pending data and offset.
    pub fn reset(&mut self) {
        self.splitter = StreamSplitter::with_config(self.config);
        self.pending = None;
        self.offset = 0;
    }

    /// Returns the stream offset of the next chunk to be emitted.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns the number of bytes scanned but not yet emitted as a
    /// chunk.
    pub fn pending_len(&self) -> usize {
        self.pending.as_ref().map(|b| b.len()).unwrap_or(0)
    }

    /// Returns the configuration used by this chunker.
    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// Creates a chunking iterator over a reader, as an independent
    /// stream with this chunker's configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use rollsplit::{Chunker, SplitConfig};
    /// use std::io::Cursor;
    ///
    /// let data = vec![3u8; 500];
    /// let chunker = Chunker::new(SplitConfig::default());
    /// let chunks: Vec<_> = chunker
    ///     .chunk(Cursor::new(&data))
    ///     .collect::<Result<_, _>>()?;
    /// assert!(!chunks.is_empty());
    /// # Ok::<(), rollsplit::ChunkError>(())
    /// ```
    pub fn chunk<R: Read>(&self, reader: R) -> ChunkIter<R> {
        ChunkIter::new(reader, self.config)
    }

    /// Chunks an in-memory buffer in one shot.
    ///
    /// Convenience for data that is already in memory; every chunk is a
    /// zero-copy slice of the input. Runs as an independent stream and
    /// does not disturb this chunker's `push()` state.
    ///
    /// # Example
    ///
    /// ```
    /// use rollsplit::{Chunker, SplitConfig};
    ///
    /// let chunker = Chunker::new(SplitConfig::default());
    /// let chunks = chunker.chunk_bytes(&b"hello world"[..]);
    ///
    /// assert_eq!(chunks.len(), 1);
    /// ```
    pub fn chunk_bytes(&self, data: impl Into<Bytes>) -> Vec<Chunk> {
        let mut splitter = StreamSplitter::with_config(self.config);
        let mut buffer: Bytes = data.into();
        let mut chunks = Vec::new();
        let mut offset = 0u64;

        loop {
            match splitter.feed(&buffer, false) {
                SplitAction::EmitChunk(n) => {
                    chunks.push(Chunk::with_offset(buffer.slice(..n), offset));
                    offset += n as u64;
                    buffer = buffer.slice(n..);
                }
                SplitAction::EndOfStream => break,
                // feed never stalls once the stream is marked ended.
                SplitAction::NeedMoreInput => break,
            }
        }

        chunks
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new(SplitConfig::default())
    }
}
