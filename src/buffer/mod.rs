//! Internal buffer management.
//!
//! This module provides a thread-local pool of read scratch buffers so
//! short-lived iterators do not re-allocate their staging space. It is
//! an implementation detail and not part of the public API.

mod pool;

pub(crate) use pool::ReadBuffer;
