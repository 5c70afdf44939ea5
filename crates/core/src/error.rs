//! Low-level error type shared by the durability layer and anything else
//! that touches I/O or serialization directly.

use std::io;
use thiserror::Error;

/// Result type alias for fallible `duelrank-core` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Low-level failures: I/O, (de)serialization, checksum mismatch.
///
/// Higher layers (`durability`, `session`) wrap this rather than
/// re-deriving their own I/O error variants.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (file operations).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A record's bytes did not deserialize to the expected type.
    #[error("deserialization error: {0}")]
    Deserialize(String),

    /// A record's CRC32 trailer did not match its payload.
    #[error("checksum mismatch (expected {expected:#010x}, got {actual:#010x})")]
    ChecksumMismatch {
        /// Checksum recorded in the trailer.
        expected: u32,
        /// Checksum recomputed over the payload bytes.
        actual: u32,
    },
}

impl From<Box<bincode::ErrorKind>> for Error {
    fn from(err: Box<bincode::ErrorKind>) -> Self {
        Error::Deserialize(err.to_string())
    }
}
