//! The Chunk type - represents a content-defined chunk.

use bytes::Bytes;
use std::fmt;

/// A content-defined chunk: a contiguous span of the input stream
/// between two boundaries (or stream start/end).
///
/// Concatenating a stream's chunks in order reproduces the input
/// exactly; chunks are non-empty, contiguous and non-overlapping.
///
/// # Example
///
/// ```
/// use rollsplit::Chunk;
/// use bytes::Bytes;
///
/// let chunk = Chunk::with_offset(Bytes::from_static(b"hello world"), 0);
///
/// assert_eq!(chunk.len(), 11);
/// assert_eq!(chunk.range(), 0..11);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// The chunk data (usually a zero-copy slice of the input buffer).
    pub data: Bytes,

    /// The offset in the original stream (if available).
    pub offset: Option<u64>,
}

impl Chunk {
    /// Creates a new chunk with the given data.
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            offset: None,
        }
    }

    /// Creates a new chunk with an offset.
    pub fn with_offset(data: impl Into<Bytes>, offset: u64) -> Self {
        Self {
            data: data.into(),
            offset: Some(offset),
        }
    }

    /// Returns the length of the chunk data.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the chunk has no data.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns a reference to the chunk data.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Returns the offset, if set.
    pub fn offset(&self) -> Option<u64> {
        self.offset
    }

    /// Returns the start offset (0 if not set).
    pub fn start(&self) -> u64 {
        self.offset.unwrap_or(0)
    }

    /// Returns the end offset (exclusive).
    pub fn end(&self) -> u64 {
        self.start() + self.data.len() as u64
    }

    /// Returns the chunk's span of the stream as a range.
    pub fn range(&self) -> std::ops::Range<u64> {
        self.start()..self.end()
    }

    /// Consumes the chunk and returns the underlying data.
    pub fn into_data(self) -> Bytes {
        self.data
    }
}

impl From<Bytes> for Chunk {
    fn from(data: Bytes) -> Self {
        Self::new(data)
    }
}

impl From<Vec<u8>> for Chunk {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Chunk({} bytes", self.len())?;
        if let Some(offset) = self.offset {
            write!(f, " @ {}", offset)?;
        }
        write!(f, ")")
    }
}
