//! Error types for rollsplit.

use std::fmt;

/// Errors that can occur while driving a chunking adapter.
///
/// The splitting core itself has no failure modes - any byte sequence,
/// including the empty one, is legal input. Errors originate in the
/// reader-facing adapters that own the input buffer.
#[derive(Debug)]
pub enum ChunkError {
    /// An I/O error occurred while reading input data.
    Io(std::io::Error),

    /// The buffered, still-unsplit input exceeded the configured cap
    /// without a boundary being found.
    ChunkTooLarge {
        /// Bytes buffered when the cap was hit.
        actual: usize,
        /// The configured cap.
        max: usize,
    },

    /// Invalid configuration parameter.
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

impl fmt::Display for ChunkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChunkError::Io(e) => write!(f, "io error: {}", e),
            ChunkError::ChunkTooLarge { actual, max } => {
                write!(f, "chunk too large: {} bytes buffered (max {})", actual, max)
            }
            ChunkError::InvalidConfig { message } => {
                write!(f, "invalid config: {}", message)
            }
        }
    }
}

impl std::error::Error for ChunkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChunkError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ChunkError {
    fn from(e: std::io::Error) -> Self {
        ChunkError::Io(e)
    }
}
