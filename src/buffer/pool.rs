//! Thread-local pool of read scratch buffers.

use std::cell::RefCell;
use std::ops::{Deref, DerefMut};

/// Size of a pooled read buffer (8 KiB, one read() worth of staging).
pub const READ_BUFFER_SIZE: usize = 8 * 1024;

/// Maximum number of buffers to keep per thread.
pub const MAX_POOL_SIZE: usize = 4;

/// A reusable read scratch buffer, returned to a thread-local pool on
/// drop.
pub struct ReadBuffer {
    data: Vec<u8>,
}

impl ReadBuffer {
    /// Takes a buffer from the thread-local pool or creates a new one.
    /// The buffer always comes back with `READ_BUFFER_SIZE` usable
    /// bytes.
    pub fn take() -> Self {
        let data = THREAD_BUFFER_POOL.with(|pool| {
            pool.borrow_mut()
                .pop()
                .unwrap_or_else(|| vec![0u8; READ_BUFFER_SIZE])
        });
        Self { data }
    }
}

impl Deref for ReadBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.data
    }
}

impl DerefMut for ReadBuffer {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl Drop for ReadBuffer {
    fn drop(&mut self) {
        if self.data.len() != READ_BUFFER_SIZE {
            return;
        }
        THREAD_BUFFER_POOL.with(|pool| {
            let mut pool = pool.borrow_mut();
            if pool.len() < MAX_POOL_SIZE {
                pool.push(std::mem::take(&mut self.data));
            }
        });
    }
}

impl Default for ReadBuffer {
    fn default() -> Self {
        Self::take()
    }
}

// Thread-local buffer pool
thread_local! {
    static THREAD_BUFFER_POOL: RefCell<Vec<Vec<u8>>> = const { RefCell::new(Vec::new()) };
}
