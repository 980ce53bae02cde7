//! Incremental stream splitting.
//!
//! - [`StreamSplitter`] - Explicit-state incremental splitter
//! - [`SplitAction`] - What the caller should do next

mod splitter;

pub use splitter::{SplitAction, StreamSplitter};
