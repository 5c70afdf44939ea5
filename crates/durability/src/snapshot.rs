//! Snapshot Store — periodic full dumps of engine state, named by the
//! log sequence they were taken at, with bounded retention.

use crate::blob::{read_blob, write_blob};
use crate::error::DurabilityError;
use duelrank_core::Sequence;
use std::path::{Path, PathBuf};

const FILE_PREFIX: &str = "snap-";
const FILE_SUFFIX: &str = ".bin";

/// Snapshots live in a directory, one file per retained snapshot, named
/// `snap-<sequence, zero-padded>.bin` so a directory listing already
/// sorts oldest-to-newest.
pub struct SnapshotStore {
    dir: PathBuf,
    max_snapshots: usize,
}

impl SnapshotStore {
    /// `dir` must already exist (see [`crate::SessionPaths::create_directories`]).
    pub fn new(dir: impl Into<PathBuf>, max_snapshots: usize) -> Self {
        Self {
            dir: dir.into(),
            max_snapshots: max_snapshots.max(1),
        }
    }

    /// Write a new snapshot at `sequence`, then evict the oldest retained
    /// snapshots beyond `max_snapshots`.
    pub fn write(&self, sequence: Sequence, payload: &[u8]) -> Result<(), DurabilityError> {
        let path = self.file_path(sequence);
        write_blob(&path, payload)?;
        tracing::debug!(sequence = sequence.0, "wrote snapshot");
        self.evict_old()?;
        Ok(())
    }

    /// The most recently taken snapshot, if any, as `(sequence, payload)`.
    pub fn latest(&self) -> Result<Option<(Sequence, Vec<u8>)>, DurabilityError> {
        let mut sequences = self.list_sequences()?;
        let Some(sequence) = sequences.pop() else {
            return Ok(None);
        };
        let path = self.file_path(sequence);
        match read_blob(&path)? {
            Some(payload) => Ok(Some((sequence, payload))),
            None => Ok(None),
        }
    }

    /// Remove every retained snapshot, for a fresh start.
    pub fn clear(&self) -> Result<(), DurabilityError> {
        for sequence in self.list_sequences()? {
            let path = self.file_path(sequence);
            if let Err(e) = std::fs::remove_file(&path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    return Err(duelrank_core::Error::Io(e).into());
                }
            }
        }
        Ok(())
    }

    fn file_path(&self, sequence: Sequence) -> PathBuf {
        self.dir.join(format!("{FILE_PREFIX}{:020}{FILE_SUFFIX}", sequence.0))
    }

    fn list_sequences(&self) -> Result<Vec<Sequence>, DurabilityError> {
        let mut sequences = Vec::new();
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(sequences),
            Err(e) => return Err(duelrank_core::Error::Io(e).into()),
        };
        for entry in entries {
            let entry = entry.map_err(duelrank_core::Error::Io)?;
            if let Some(seq) = parse_sequence(&entry.path()) {
                sequences.push(seq);
            }
        }
        sequences.sort();
        Ok(sequences)
    }

    fn evict_old(&self) -> Result<(), DurabilityError> {
        let sequences = self.list_sequences()?;
        if sequences.len() <= self.max_snapshots {
            return Ok(());
        }
        let evict_count = sequences.len() - self.max_snapshots;
        for sequence in &sequences[..evict_count] {
            let path = self.file_path(*sequence);
            if let Err(e) = std::fs::remove_file(&path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    return Err(duelrank_core::Error::Io(e).into());
                }
            }
            tracing::debug!(sequence = sequence.0, "evicted old snapshot");
        }
        Ok(())
    }
}

fn parse_sequence(path: &Path) -> Option<Sequence> {
    let name = path.file_name()?.to_str()?;
    let digits = name.strip_prefix(FILE_PREFIX)?.strip_suffix(FILE_SUFFIX)?;
    digits.parse::<u64>().ok().map(Sequence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_is_none_when_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path(), 4);
        assert!(store.latest().unwrap().is_none());
    }

    #[test]
    fn latest_returns_highest_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path(), 4);
        store.write(Sequence(10), b"first").unwrap();
        store.write(Sequence(20), b"second").unwrap();
        let (seq, payload) = store.latest().unwrap().unwrap();
        assert_eq!(seq, Sequence(20));
        assert_eq!(payload, b"second");
    }

    #[test]
    fn retention_evicts_oldest_beyond_max() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path(), 2);
        store.write(Sequence(1), b"a").unwrap();
        store.write(Sequence(2), b"b").unwrap();
        store.write(Sequence(3), b"c").unwrap();
        let remaining = store.list_sequences().unwrap();
        assert_eq!(remaining, vec![Sequence(2), Sequence(3)]);
    }

    #[test]
    fn clear_removes_all_snapshots() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path(), 4);
        store.write(Sequence(1), b"a").unwrap();
        store.write(Sequence(2), b"b").unwrap();
        store.clear().unwrap();
        assert!(store.latest().unwrap().is_none());
    }

    #[test]
    fn ignores_unrelated_files_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("stray.txt"), b"noise").unwrap();
        let store = SnapshotStore::new(dir.path(), 4);
        store.write(Sequence(1), b"a").unwrap();
        assert_eq!(store.list_sequences().unwrap(), vec![Sequence(1)]);
    }
}
