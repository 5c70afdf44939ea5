//! Whole-file checksummed blobs — used for the persisted entity list,
//! which is written once at `start()` and read once at boot, unlike the
//! operation log's many-records-per-file shape.

use crate::error::DurabilityError;
use crate::format::{read_record, write_record, ReadOutcome};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Atomically write `payload` as a single checksummed record at `path`.
///
/// Writes to a temporary file in the same directory and renames into
/// place, so a reader never observes a half-written blob.
pub fn write_blob(path: &Path, payload: &[u8]) -> Result<(), DurabilityError> {
    let tmp_path = path.with_extension("tmp");
    {
        let file = File::create(&tmp_path).map_err(duelrank_core::Error::Io)?;
        let mut writer = BufWriter::new(file);
        write_record(&mut writer, payload).map_err(duelrank_core::Error::Io)?;
        std::io::Write::flush(&mut writer).map_err(duelrank_core::Error::Io)?;
    }
    std::fs::rename(&tmp_path, path).map_err(duelrank_core::Error::Io)?;
    Ok(())
}

/// Read the checksummed blob at `path`, or `None` if it doesn't exist.
///
/// # Errors
/// Returns [`DurabilityError::Corrupt`] if the file exists but its record
/// is truncated or fails its checksum.
pub fn read_blob(path: &Path) -> Result<Option<Vec<u8>>, DurabilityError> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(duelrank_core::Error::Io(e).into()),
    };
    let mut reader = BufReader::new(file);
    match read_record(&mut reader).map_err(duelrank_core::Error::Io)? {
        ReadOutcome::Record(payload) => Ok(Some(payload)),
        ReadOutcome::EndOfData => Ok(Some(Vec::new())),
        ReadOutcome::Partial => Err(DurabilityError::Corrupt {
            what: "blob",
            detail: format!("{} is truncated or fails its checksum", path.display()),
        }),
    }
}
