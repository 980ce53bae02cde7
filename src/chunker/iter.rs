//! Reader-driven chunk iterator.
//!
//! [`ChunkIter`] is the buffered-scanning collaborator around
//! [`StreamSplitter`]: it owns the growing input buffer, reads from a
//! [`std::io::Read`] source on demand, and exposes the resulting
//! chunks as a pull iterator.

use std::io::Read;

use bytes::BytesMut;

use crate::buffer::ReadBuffer;
use crate::chunk::Chunk;
use crate::config::SplitConfig;
use crate::error::ChunkError;
use crate::split::{SplitAction, StreamSplitter};

/// An iterator that yields chunks from a reader.
///
/// `ChunkIter` reads from the source in 8 KiB steps, feeds the
/// accumulated buffer to the splitter, and yields a chunk whenever a
/// boundary lands. Reads happen lazily, only when the splitter asks
/// for more input.
///
/// The internal buffer holds at most one chunk's worth of unsplit
/// input. Because the boundary policy enforces no maximum chunk
/// length, the buffer is capped at [`SplitConfig::max_buffered`];
/// exceeding the cap yields [`ChunkError::ChunkTooLarge`] and ends the
/// iteration.
///
/// # Example
///
/// ```
/// use rollsplit::{Chunker, SplitConfig};
/// use std::io::Cursor;
///
/// let data = vec![9u8; 4096];
/// let chunker = Chunker::new(SplitConfig::default());
///
/// let mut total = 0;
/// for chunk in chunker.chunk(Cursor::new(&data)) {
///     total += chunk?.len();
/// }
/// assert_eq!(total, data.len());
/// # Ok::<(), rollsplit::ChunkError>(())
/// ```
pub struct ChunkIter<R> {
    reader: R,
    splitter: StreamSplitter,
    buffer: BytesMut,
    scratch: ReadBuffer,
    offset: u64,
    max_buffered: usize,
    eof: bool,
    finished: bool,
}

impl<R: Read> ChunkIter<R> {
    /// Creates a new chunk iterator over `reader`.
    pub(crate) fn new(reader: R, config: SplitConfig) -> Self {
        Self {
            reader,
            splitter: StreamSplitter::with_config(config),
            buffer: BytesMut::new(),
            scratch: ReadBuffer::take(),
            offset: 0,
            max_buffered: config.max_buffered(),
            eof: false,
            finished: false,
        }
    }

    /// Splits the first `len` buffered bytes off as a chunk.
    fn emit_chunk(&mut self, len: usize) -> Chunk {
        let data = self.buffer.split_to(len).freeze();
        let chunk = Chunk::with_offset(data, self.offset);
        self.offset += len as u64;
        chunk
    }
}

impl<R: Read> Iterator for ChunkIter<R> {
    type Item = Result<Chunk, ChunkError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            match self.splitter.feed(&self.buffer, !self.eof) {
                SplitAction::EmitChunk(len) => {
                    return Some(Ok(self.emit_chunk(len)));
                }
                SplitAction::EndOfStream => {
                    self.finished = true;
                    return None;
                }
                SplitAction::NeedMoreInput => {
                    if self.buffer.len() >= self.max_buffered {
                        self.finished = true;
                        return Some(Err(ChunkError::ChunkTooLarge {
                            actual: self.buffer.len(),
                            max: self.max_buffered,
                        }));
                    }
                    match self.reader.read(&mut self.scratch) {
                        Ok(0) => self.eof = true,
                        Ok(n) => self.buffer.extend_from_slice(&self.scratch[..n]),
                        Err(e) => {
                            self.finished = true;
                            return Some(Err(e.into()));
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunker::Chunker;
    use std::io::Cursor;

    /// A reader that hands out at most `step` bytes per read call,
    /// exercising the grow-and-resume path.
    struct Trickle<'a> {
        data: &'a [u8],
        pos: usize,
        step: usize,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let n = self.step.min(buf.len()).min(self.data.len() - self.pos);
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    fn pseudo_random(len: usize, mut seed: u64) -> Vec<u8> {
        (0..len)
            .map(|_| {
                seed = seed.wrapping_add(0x9e37_79b9_7f4a_7c15);
                let mut z = seed;
                z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
                z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
                (z ^ (z >> 31)) as u8
            })
            .collect()
    }

    #[test]
    fn test_empty_reader() {
        let chunker = Chunker::default();
        let mut iter = chunker.chunk(Cursor::new(&[] as &[u8]));
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_reconstruction() {
        let data = pseudo_random(50_000, 3);
        let chunker = Chunker::new(SplitConfig::new(8).unwrap());

        let chunks: Vec<_> = chunker
            .chunk(Cursor::new(&data))
            .collect::<Result<_, _>>()
            .unwrap();

        let rebuilt: Vec<u8> = chunks.iter().flat_map(|c| c.data().to_vec()).collect();
        assert_eq!(rebuilt, data);
    }

    #[test]
    fn test_trickle_reader_matches_cursor() {
        let data = pseudo_random(20_000, 9);
        let chunker = Chunker::new(SplitConfig::new(8).unwrap());

        let fast: Vec<usize> = chunker
            .chunk(Cursor::new(&data))
            .map(|c| c.unwrap().len())
            .collect();

        let slow: Vec<usize> = chunker
            .chunk(Trickle {
                data: &data,
                pos: 0,
                step: 3,
            })
            .map(|c| c.unwrap().len())
            .collect();

        assert_eq!(fast, slow, "chunking must not depend on read sizes");
    }

    #[test]
    fn test_offsets_are_contiguous() {
        let data = pseudo_random(30_000, 5);
        let chunker = Chunker::new(SplitConfig::new(9).unwrap());

        let mut expected = 0u64;
        for chunk in chunker.chunk(Cursor::new(&data)) {
            let chunk = chunk.unwrap();
            assert_eq!(chunk.offset(), Some(expected));
            expected += chunk.len() as u64;
        }
        assert_eq!(expected, data.len() as u64);
    }

    #[test]
    fn test_buffer_cap_reported() {
        // Zero bytes never move the checksum off its seed value, so no
        // boundary ever fires and the cap must trip.
        let data = vec![0u8; 8192];
        let config = SplitConfig::default().with_max_buffered(1024);
        let chunker = Chunker::new(config);

        let mut iter = chunker.chunk(Cursor::new(&data));
        match iter.next() {
            Some(Err(ChunkError::ChunkTooLarge { actual, max })) => {
                assert!(actual >= max);
                assert_eq!(max, 1024);
            }
            other => panic!("expected ChunkTooLarge, got {:?}", other.map(|r| r.map(|c| c.len()))),
        }
        assert!(iter.next().is_none(), "iteration ends after the error");
    }

    #[test]
    fn test_io_error_surfaces() {
        struct Failing;
        impl Read for Failing {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "boom"))
            }
        }

        let chunker = Chunker::default();
        let mut iter = chunker.chunk(Failing);
        assert!(matches!(iter.next(), Some(Err(ChunkError::Io(_)))));
        assert!(iter.next().is_none());
    }
}
