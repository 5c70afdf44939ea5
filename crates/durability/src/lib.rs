//! Crash-safe durability: the operation log, periodic snapshots, and the
//! checksummed blob format they're both built on.
//!
//! Recovery is snapshot-plus-replay: boot loads the latest snapshot (if
//! any), then replays every log event with a sequence greater than the
//! snapshot's horizon. A session with no snapshot yet replays the whole
//! log from the start.

#![warn(missing_docs)]

mod blob;
mod error;
mod format;
mod log;
mod paths;
mod snapshot;

pub use blob::{read_blob, write_blob};
pub use error::DurabilityError;
pub use format::{read_record, write_record, ReadOutcome};
pub use log::OperationLog;
pub use paths::SessionPaths;
pub use snapshot::SnapshotStore;
