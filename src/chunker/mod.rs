//! High-level chunking engines built on the incremental splitter.
//!
//! - [`Chunker`] - Stateful engine with a `push()`/`finish()` API
//! - [`ChunkIter`] - Iterator that yields chunks from a [`std::io::Read`] source

mod engine;
mod iter;

pub use engine::Chunker;
pub use iter::ChunkIter;
