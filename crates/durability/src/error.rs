//! Errors raised by the durability layer.

use thiserror::Error;

/// Errors raised by [`crate::OperationLog`], [`crate::SnapshotStore`], and
/// the [`crate::blob`] helpers.
#[derive(Debug, Error)]
pub enum DurabilityError {
    /// Wraps an I/O or (de)serialization failure from `duelrank-core`.
    #[error(transparent)]
    Core(#[from] duelrank_core::Error),

    /// A record's trailing checksum did not match its payload — the
    /// write that produced it never reached its durability point. During
    /// replay this is treated as the end of valid data, not a hard
    /// failure; it is only surfaced as an error from one-shot reads
    /// (snapshots, the entities blob) where there is no "keep going"
    /// option.
    #[error("corrupt {what}: {detail}")]
    Corrupt {
        /// What was being read (e.g. `"snapshot"`, `"entities blob"`).
        what: &'static str,
        /// Human-readable detail.
        detail: String,
    },
}
