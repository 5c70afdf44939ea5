//! Operation Log — append-only, totally ordered record of every
//! pair-issue and submit event.

use crate::error::DurabilityError;
use crate::format::{read_record, write_record, ReadOutcome};
use duelrank_core::{Clock, LogEvent, LoggedEvent, Sequence};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Append-only log of [`LoggedEvent`]s, backed by a single file.
///
/// `sequence` is assigned at append time and is strictly increasing
/// across the log's entire lifetime — including across restarts, since
/// `open` scans any existing records to resume numbering rather than
/// starting back at 1.
pub struct OperationLog {
    path: PathBuf,
    file: Mutex<File>,
    next_sequence: AtomicU64,
}

impl OperationLog {
    /// Open (creating if necessary) the log at `path`, scanning existing
    /// records so new appends continue the sequence rather than
    /// restarting it.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, DurabilityError> {
        let path = path.into();

        let existing = scan(&path)?;
        let next_sequence = existing
            .last()
            .map(|e| e.sequence.next().0)
            .unwrap_or(1);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(duelrank_core::Error::Io)?;

        Ok(Self {
            path,
            file: Mutex::new(file),
            next_sequence: AtomicU64::new(next_sequence),
        })
    }

    /// Append `event`, assigning it the next sequence number and the
    /// clock's current timestamp. Durable (fsynced) before returning.
    pub fn append(&self, event: LogEvent, clock: &dyn Clock) -> Result<LoggedEvent, DurabilityError> {
        let sequence = Sequence(self.next_sequence.fetch_add(1, Ordering::SeqCst));
        let logged = LoggedEvent {
            sequence,
            timestamp: clock.now(),
            event,
        };

        let payload = bincode::serialize(&logged).map_err(duelrank_core::Error::from)?;

        let mut file = self.file.lock();
        write_record(&mut *file, &payload).map_err(duelrank_core::Error::Io)?;
        file.sync_data().map_err(duelrank_core::Error::Io)?;

        tracing::debug!(sequence = sequence.0, "appended log event");
        Ok(logged)
    }

    /// Events with `sequence > sequence_floor`, in ascending order.
    pub fn replay_since(&self, sequence_floor: Sequence) -> Result<Vec<LoggedEvent>, DurabilityError> {
        let all = scan(&self.path)?;
        Ok(all
            .into_iter()
            .filter(|e| e.sequence > sequence_floor)
            .collect())
    }

    /// Discard all records and resume numbering from 1, for a fresh start.
    pub fn clear(&self) -> Result<(), DurabilityError> {
        let file = self.file.lock();
        file.set_len(0).map_err(duelrank_core::Error::Io)?;
        self.next_sequence.store(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Read every valid record from `path` in order. A truncated or
/// checksum-failing trailing record is treated as the boundary of valid
/// data (a torn write), not a hard error — matching a log file's
/// append-only, crash-tolerant contract.
fn scan(path: &Path) -> Result<Vec<LoggedEvent>, DurabilityError> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(duelrank_core::Error::Io(e).into()),
    };
    let mut reader = BufReader::new(file);
    let mut events = Vec::new();

    loop {
        match read_record(&mut reader).map_err(duelrank_core::Error::Io)? {
            ReadOutcome::Record(payload) => {
                let logged: LoggedEvent =
                    bincode::deserialize(&payload).map_err(duelrank_core::Error::from)?;
                events.push(logged);
            }
            ReadOutcome::EndOfData => break,
            ReadOutcome::Partial => {
                tracing::warn!(
                    path = %path.display(),
                    "log has a truncated or checksum-failing trailing record; stopping scan there"
                );
                break;
            }
        }
    }

    Ok(events)
}
