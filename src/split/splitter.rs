//! The incremental splitter - StreamSplitter with a feed() API.
//!
//! This is the public incremental contract of the crate: a pull-style
//! tokenizer expressed as an explicit state object instead of a
//! callback. The caller owns a growing input buffer; the splitter owns
//! a scan cursor into it and the rolling checksum, and each `feed`
//! call tells the caller what to do next.

use crate::config::SplitConfig;
use crate::error::ChunkError;
use crate::rollsum::{RollSum, WINDOW_SIZE};

/// What the caller should do after a [`StreamSplitter::feed`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitAction {
    /// The whole buffer was scanned without finding a boundary and more
    /// input may still arrive. Consume nothing; grow the buffer and
    /// call `feed` again.
    NeedMoreInput,

    /// A chunk ends here: consume this many bytes from the front of the
    /// buffer and emit them as one chunk.
    EmitChunk(usize),

    /// The stream is exhausted; no further chunks will be produced.
    EndOfStream,
}

/// Incremental content-defined splitter for a single byte stream.
///
/// `StreamSplitter` scans each input byte exactly once. Across `feed`
/// calls it remembers how far into the caller's buffer it has already
/// scanned, so re-presenting a grown buffer never rescans the prefix -
/// total work stays linear in the stream length no matter how the
/// input arrives.
///
/// Boundaries are a property of the whole stream's sliding window, not
/// of any single chunk: the checksum keeps rolling across chunk
/// boundaries and is never reset when one is emitted. Consequently one
/// splitter serves exactly one stream. Independent streams need
/// independent splitters, each starting from a fresh engine; a
/// splitter that returned [`SplitAction::EndOfStream`] is done and
/// stays done.
///
/// Memory use is O([`WINDOW_SIZE`]) regardless of chunk size; only the
/// caller's buffer grows, and that is the caller's concern.
///
/// # Contract
///
/// `feed(buffer, more_data_may_follow)` where `buffer` holds all bytes
/// currently available but not yet consumed (the same bytes as last
/// time, plus any newly arrived ones appended) and the flag says
/// whether more input could still arrive:
///
/// - [`SplitAction::EmitChunk`]`(k)`: remove the first `k` bytes from
///   the buffer and emit them as one chunk, then call `feed` again
///   with the remainder.
/// - [`SplitAction::NeedMoreInput`]: append more input and call again;
///   nothing was consumed. Never returned when `more_data_may_follow`
///   is false, so a caller that stops growing the buffer can never
///   stall.
/// - [`SplitAction::EndOfStream`]: terminal.
///
/// # Example
///
/// ```
/// use rollsplit::{SplitAction, StreamSplitter};
///
/// let data = vec![7u8; 200];
/// let mut splitter = StreamSplitter::new();
/// let mut buf: &[u8] = &data;
/// let mut chunks = Vec::new();
///
/// loop {
///     match splitter.feed(buf, false) {
///         SplitAction::EmitChunk(n) => {
///             chunks.push(&buf[..n]);
///             buf = &buf[n..];
///         }
///         SplitAction::EndOfStream => break,
///         SplitAction::NeedMoreInput => unreachable!(),
///     }
/// }
///
/// let total: usize = chunks.iter().map(|c| c.len()).sum();
/// assert_eq!(total, data.len());
/// ```
#[derive(Debug, Clone)]
pub struct StreamSplitter {
    sum: RollSum,
    config: SplitConfig,

    /// How far into the caller's unconsumed buffer we have scanned.
    scanned: usize,

    /// Bytes rolled since the absolute start of the stream; enforces
    /// the warm-up rule.
    rolled: u64,

    finished: bool,
}

impl StreamSplitter {
    /// Creates a splitter with the default bit-width
    /// ([`DEFAULT_SPLIT_BITS`](crate::DEFAULT_SPLIT_BITS), ~8 KiB mean
    /// chunks).
    pub fn new() -> Self {
        Self::with_config(SplitConfig::default())
    }

    /// Creates a splitter with an explicit boundary bit-width.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::InvalidConfig`] if `bits` is outside
    /// `1..=31`.
    pub fn with_bits(bits: u32) -> Result<Self, ChunkError> {
        Ok(Self::with_config(SplitConfig::new(bits)?))
    }

    /// Creates a splitter from a full configuration.
    pub fn with_config(config: SplitConfig) -> Self {
        Self {
            sum: RollSum::new(),
            config,
            scanned: 0,
            rolled: 0,
            finished: false,
        }
    }

    /// Returns the configuration this splitter was built with.
    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// Returns how many bytes of the current buffer have been scanned
    /// but not yet consumed.
    pub fn scanned(&self) -> usize {
        self.scanned
    }

    /// Scans forward from the saved cursor and reports what to do next.
    ///
    /// `buffer` must contain every byte not yet consumed, in order: the
    /// bytes presented last time (minus any prefix consumed via
    /// [`SplitAction::EmitChunk`]) followed by newly arrived bytes.
    /// Each byte is rolled into the checksum exactly once, and the
    /// boundary test runs after every byte once the window-full rule is
    /// met: no boundary is declared within the first [`WINDOW_SIZE`]
    /// bytes of the stream, so the first chunk is never shorter than
    /// the window unless the whole stream is.
    pub fn feed(&mut self, buffer: &[u8], more_data_may_follow: bool) -> SplitAction {
        if self.finished {
            return SplitAction::EndOfStream;
        }

        let bits = self.config.bits();
        while self.scanned < buffer.len() {
            self.sum.roll(buffer[self.scanned]);
            self.scanned += 1;
            self.rolled += 1;

            if self.rolled >= WINDOW_SIZE as u64 && self.sum.is_boundary(bits) {
                let consumed = self.scanned;
                self.scanned = 0;
                return SplitAction::EmitChunk(consumed);
            }
        }

        if more_data_may_follow {
            // Cursor stays put; the next call resumes exactly here.
            SplitAction::NeedMoreInput
        } else if !buffer.is_empty() {
            // Input exhausted mid-chunk: everything left is the final
            // chunk.
            self.scanned = 0;
            SplitAction::EmitChunk(buffer.len())
        } else {
            self.finished = true;
            SplitAction::EndOfStream
        }
    }
}

impl Default for StreamSplitter {
    fn default() -> Self {
        Self::new()
    }
}
