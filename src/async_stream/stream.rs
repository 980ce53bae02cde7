//! Async stream adapter for chunking.
//!
//! The adapter owns the same growing buffer and [`StreamSplitter`] as
//! the sync iterator; only the acquisition of more input suspends. The
//! splitting core itself never blocks.

use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::BytesMut;
use futures_core::Stream;
use futures_io::AsyncRead;
use pin_project_lite::pin_project;

use crate::chunk::Chunk;
use crate::config::SplitConfig;
use crate::error::ChunkError;
use crate::split::{SplitAction, StreamSplitter};

const READ_BUFFER_SIZE: usize = 8 * 1024;

pin_project! {
    /// A stream that yields chunks from an async reader.
    ///
    /// Uses `futures_io::AsyncRead`, which is runtime-agnostic: it
    /// works with tokio (via `tokio_util::compat`), async-std, smol,
    /// or any futures-compatible runtime.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use rollsplit::{chunk_async, SplitConfig};
    /// use futures_util::StreamExt;
    ///
    /// async fn example<R: futures_io::AsyncRead + Unpin>(reader: R) -> Result<(), rollsplit::ChunkError> {
    ///     let mut stream = chunk_async(reader, SplitConfig::default());
    ///
    ///     while let Some(chunk) = stream.next().await {
    ///         let chunk = chunk?;
    ///         println!("chunk: {} bytes", chunk.len());
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub struct ChunkStream<R> {
        #[pin]
        reader: R,
        splitter: StreamSplitter,
        buffer: BytesMut,
        scratch: Vec<u8>,
        offset: u64,
        max_buffered: usize,
        eof: bool,
        finished: bool,
    }
}

impl<R> ChunkStream<R> {
    /// Creates a new chunk stream from an async reader.
    pub fn new(reader: R, config: SplitConfig) -> Self {
        Self {
            reader,
            splitter: StreamSplitter::with_config(config),
            buffer: BytesMut::new(),
            scratch: vec![0u8; READ_BUFFER_SIZE],
            offset: 0,
            max_buffered: config.max_buffered(),
            eof: false,
            finished: false,
        }
    }
}

impl<R: AsyncRead> Stream for ChunkStream<R> {
    type Item = Result<Chunk, ChunkError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.finished {
            return Poll::Ready(None);
        }

        loop {
            match this.splitter.feed(this.buffer, !*this.eof) {
                SplitAction::EmitChunk(len) => {
                    let data = this.buffer.split_to(len).freeze();
                    let chunk = Chunk::with_offset(data, *this.offset);
                    *this.offset += len as u64;
                    return Poll::Ready(Some(Ok(chunk)));
                }
                SplitAction::EndOfStream => {
                    *this.finished = true;
                    return Poll::Ready(None);
                }
                SplitAction::NeedMoreInput => {
                    if this.buffer.len() >= *this.max_buffered {
                        *this.finished = true;
                        return Poll::Ready(Some(Err(ChunkError::ChunkTooLarge {
                            actual: this.buffer.len(),
                            max: *this.max_buffered,
                        })));
                    }
                    match this.reader.as_mut().poll_read(cx, this.scratch) {
                        Poll::Pending => return Poll::Pending,
                        Poll::Ready(Err(e)) => {
                            *this.finished = true;
                            return Poll::Ready(Some(Err(ChunkError::Io(e))));
                        }
                        Poll::Ready(Ok(0)) => *this.eof = true,
                        Poll::Ready(Ok(n)) => {
                            this.buffer.extend_from_slice(&this.scratch[..n]);
                        }
                    }
                }
            }
        }
    }
}

/// Creates a chunk stream from an async reader.
///
/// Uses `futures_io::AsyncRead` for runtime-agnostic async I/O. Tokio
/// users can adapt a `tokio::io::AsyncRead` with
/// `tokio_util::compat::TokioAsyncReadCompatExt`:
///
/// ```ignore
/// use tokio_util::compat::TokioAsyncReadCompatExt;
/// use rollsplit::{chunk_async, SplitConfig};
///
/// let file = tokio::fs::File::open("data.bin").await?;
/// let stream = chunk_async(file.compat(), SplitConfig::default());
/// ```
///
/// # Returns
///
/// A [`ChunkStream`] implementing
/// `Stream<Item = Result<Chunk, ChunkError>>`.
pub fn chunk_async<R: AsyncRead>(reader: R, config: SplitConfig) -> ChunkStream<R> {
    ChunkStream::new(reader, config)
}
