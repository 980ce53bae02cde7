//! Rolling checksum engine.
//!
//! This module contains the windowed checksum that drives boundary
//! detection: an O(1)-per-byte sum over the trailing [`WINDOW_SIZE`]
//! bytes of the stream.
//!
//! - [`RollSum`] - bup/librsync-style rolling checksum state

mod sum;

pub use sum::{RollSum, WINDOW_SIZE};
