//! rollsplit
//!
//! Incremental content-defined chunking for Rust.
//!
//! `rollsplit` cuts a byte stream into variable-length chunks whose
//! boundaries are decided by a rolling checksum over the trailing 64
//! bytes of content, not by fixed offsets. A small local edit therefore
//! moves only nearby boundaries; chunks far from the edit are
//! unchanged, which is what makes the output useful for delta
//! synchronization, deduplication and content-addressable storage.
//!
//! The crate intentionally:
//! - does NOT hash chunks
//! - does NOT persist chunks or talk to any store
//! - does NOT compress or encrypt
//!
//! It only does one thing: **bytes in → chunk boundaries out**
//!
//! # Incremental core
//!
//! The lowest-level surface is [`StreamSplitter::feed`], a pull-style
//! tokenizer contract: hand it everything you have buffered plus an
//! end-of-input flag, and it tells you to consume a chunk, fetch more
//! input, or stop.
//!
//! ```
//! use rollsplit::{SplitAction, StreamSplitter};
//!
//! let mut splitter = StreamSplitter::new();
//! let buf = vec![0u8; 1024];
//!
//! match splitter.feed(&buf, false) {
//!     SplitAction::EmitChunk(n) => assert_eq!(n, 1024),
//!     _ => unreachable!("end of input always drains the buffer"),
//! }
//! ```
//!
//! # Sync
//!
//! ```no_run
//! use std::fs::File;
//! use rollsplit::{Chunker, SplitConfig, ChunkError};
//!
//! fn main() -> Result<(), ChunkError> {
//!     let file = File::open("data.bin")?;
//!     let chunker = Chunker::new(SplitConfig::default());
//!
//!     for chunk in chunker.chunk(file) {
//!         let chunk = chunk?;
//!         println!("chunk {} bytes", chunk.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use rollsplit::{chunk_async, SplitConfig};
//!
//! async fn demo<R: futures_io::AsyncRead + Unpin>(reader: R) -> Result<(), rollsplit::ChunkError> {
//!     let mut stream = chunk_async(reader, SplitConfig::default());
//!
//!     while let Some(chunk) = stream.next().await {
//!         let chunk = chunk?;
//!         println!("chunk {}", chunk.len());
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chunk;
mod chunker;
mod config;
mod error;
mod rollsum;
mod split;

mod buffer; // internal (thread-local reuse)
mod util; // internal helpers

#[cfg(feature = "async-io")]
mod async_stream;

//
// Public surface (intentionally tiny)
//

pub use chunk::Chunk;
pub use chunker::{ChunkIter, Chunker};
pub use config::{DEFAULT_MAX_BUFFERED, DEFAULT_SPLIT_BITS, SplitConfig};
pub use error::ChunkError;
pub use rollsum::{RollSum, WINDOW_SIZE};
pub use split::{SplitAction, StreamSplitter};

#[cfg(feature = "async-io")]
pub use async_stream::{ChunkStream, chunk_async};
