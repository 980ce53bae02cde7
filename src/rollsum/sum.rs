//! Rolling checksum implementation.
//!
//! The checksum is the bup/librsync pair of running sums: `s1` is the
//! plain sum of the window bytes and `s2` a position-weighted sum, both
//! offset by a per-byte constant and kept in wrapping u32 arithmetic.
//! Each incoming byte is added and the byte sliding out of the window
//! is subtracted, so the cost per byte is O(1) regardless of stream
//! length.
//!
//! Two independent sums rather than one avoid the degenerate
//! periodicities a single additive sum shows on structured input,
//! giving the low bits a usable distribution for the boundary test.
//!
//! The checksum is a function of exactly the trailing
//! `min(bytes_rolled, WINDOW_SIZE)` bytes. It is never reset at chunk
//! boundaries: a boundary decision at position `p` depends only on
//! bytes `[p - 63, p]`, which is what keeps boundaries stable under
//! edits elsewhere in the stream.

/// Number of trailing bytes the checksum is computed over.
pub const WINDOW_SIZE: usize = 64;

/// Added to every byte before it enters the sums, so that runs of zero
/// bytes still move `s2`.
const CHAR_OFFSET: u32 = 31;

const WINDOW: u32 = WINDOW_SIZE as u32;

/// Rolling checksum over the trailing [`WINDOW_SIZE`] bytes of a stream.
///
/// The window is a fixed-size ring buffer with a modulo-indexed write
/// cursor; no allocation happens after construction and memory use is
/// O([`WINDOW_SIZE`]) regardless of how much data is rolled through.
///
/// A fresh `RollSum` behaves as if the window were pre-filled with
/// zeros: the accumulators are seeded with the zero-window sums, so
/// evicting one of those phantom zero bytes is a no-op on the byte
/// term. This makes the warm-up path (fewer than [`WINDOW_SIZE`] bytes
/// seen) the same code as the steady state.
///
/// # Example
///
/// ```
/// use rollsplit::RollSum;
///
/// let mut sum = RollSum::new();
/// for &b in b"some stream bytes" {
///     sum.roll(b);
/// }
/// let digest = sum.digest();
/// # let _ = digest;
/// ```
#[derive(Debug, Clone)]
pub struct RollSum {
    /// Plain sum of window bytes (plus offsets).
    s1: u32,

    /// Position-weighted sum of window bytes (plus offsets).
    s2: u32,

    /// Ring buffer of the window contents.
    window: [u8; WINDOW_SIZE],

    /// Write cursor into `window`; the byte at this slot is the one
    /// about to slide out.
    wofs: usize,
}

impl RollSum {
    /// Creates a fresh engine with a zero-filled window.
    pub fn new() -> Self {
        Self {
            s1: WINDOW * CHAR_OFFSET,
            s2: WINDOW * (WINDOW - 1) * CHAR_OFFSET,
            window: [0; WINDOW_SIZE],
            wofs: 0,
        }
    }

    /// Clears the window and re-seeds both accumulators.
    ///
    /// Only meaningful at the start of a new, independent stream;
    /// resetting mid-stream discards the locality property for the
    /// bytes that follow.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Advances the window by one byte.
    ///
    /// The byte sliding out of the window is subtracted from both
    /// accumulators, `byte` is added, and the ring slot is overwritten.
    /// O(1) time, no allocation.
    #[inline]
    pub fn roll(&mut self, byte: u8) {
        let out = self.window[self.wofs];
        self.add(u32::from(out), u32::from(byte));
        self.window[self.wofs] = byte;
        self.wofs = (self.wofs + 1) % WINDOW_SIZE;
    }

    #[inline]
    fn add(&mut self, out: u32, inp: u32) {
        self.s1 = self.s1.wrapping_add(inp).wrapping_sub(out);
        self.s2 = self
            .s2
            .wrapping_add(self.s1)
            .wrapping_sub(WINDOW * (out + CHAR_OFFSET));
    }

    /// Returns the current checksum value.
    ///
    /// `s1` is packed into the high 16 bits and the low 16 bits of `s2`
    /// into the low 16 bits. The value is a deterministic function of
    /// exactly the last `min(bytes_rolled, WINDOW_SIZE)` bytes.
    #[inline]
    pub fn digest(&self) -> u32 {
        (self.s1 << 16) | (self.s2 & 0xffff)
    }

    /// Returns true if the checksum marks a chunk boundary for the
    /// given bit-width.
    ///
    /// The test is `s2 & mask == mask` with `mask = (1 << bits) - 1`:
    /// all of the low `bits` bits must be one. For random input that
    /// happens with probability `2^-bits` per byte, which is what makes
    /// `2^bits` the mean chunk length. `s2`'s low 16 bits are the
    /// digest's low bits, so for `bits <= 16` this is the low-bits test
    /// on [`RollSum::digest`].
    ///
    /// Callers are responsible for the stream-level warm-up rule: no
    /// boundary may be declared before [`WINDOW_SIZE`] bytes have been
    /// rolled since the start of the stream (see
    /// [`StreamSplitter`](crate::StreamSplitter)).
    ///
    /// `bits` must be in `1..=31`; wider shifts would overflow the u32
    /// mask. [`SplitConfig`](crate::SplitConfig) enforces the range on
    /// every splitter path.
    #[inline]
    pub fn is_boundary(&self, bits: u32) -> bool {
        debug_assert!((1..=31).contains(&bits), "bits must be in 1..=31");
        let mask = (1u32 << bits) - 1;
        self.s2 & mask == mask
    }
}

impl Default for RollSum {
    fn default() -> Self {
        Self::new()
    }
}
