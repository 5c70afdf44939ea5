//! Low-level record framing shared by the operation log and by one-shot
//! blob files (snapshots, the persisted entity list).
//!
//! Each record is `len(8 LE) || payload || crc32(payload)(4 LE)`. A
//! checksum mismatch or a record truncated mid-write is treated the same
//! way during a scan: as the boundary of valid data, since both are the
//! signature of a write that was interrupted before reaching its
//! durability point, not corruption worth panicking over.

use std::io::{self, Read, Write};

/// Outcome of attempting to read one record from a stream.
pub enum ReadOutcome {
    /// A complete, checksum-valid record.
    Record(Vec<u8>),
    /// The stream ended cleanly between records.
    EndOfData,
    /// A record began but its bytes were truncated or its checksum did
    /// not match — the boundary of valid data.
    Partial,
}

/// Write one framed, checksummed record.
pub fn write_record<W: Write>(writer: &mut W, payload: &[u8]) -> io::Result<()> {
    let len = payload.len() as u64;
    writer.write_all(&len.to_le_bytes())?;
    writer.write_all(payload)?;
    let checksum = crc32fast::hash(payload);
    writer.write_all(&checksum.to_le_bytes())?;
    Ok(())
}

/// Read one framed, checksummed record from `reader`.
pub fn read_record<R: Read>(reader: &mut R) -> io::Result<ReadOutcome> {
    let mut len_buf = [0u8; 8];
    if let Err(e) = reader.read_exact(&mut len_buf) {
        return if e.kind() == io::ErrorKind::UnexpectedEof {
            Ok(ReadOutcome::EndOfData)
        } else {
            Err(e)
        };
    }
    let len = u64::from_le_bytes(len_buf) as usize;

    let mut payload = vec![0u8; len];
    if let Err(e) = reader.read_exact(&mut payload) {
        return if e.kind() == io::ErrorKind::UnexpectedEof {
            Ok(ReadOutcome::Partial)
        } else {
            Err(e)
        };
    }

    let mut checksum_buf = [0u8; 4];
    if let Err(e) = reader.read_exact(&mut checksum_buf) {
        return if e.kind() == io::ErrorKind::UnexpectedEof {
            Ok(ReadOutcome::Partial)
        } else {
            Err(e)
        };
    }

    let expected = u32::from_le_bytes(checksum_buf);
    let actual = crc32fast::hash(&payload);
    if expected != actual {
        return Ok(ReadOutcome::Partial);
    }

    Ok(ReadOutcome::Record(payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn round_trips_a_record() {
        let mut buf = Vec::new();
        write_record(&mut buf, b"hello").unwrap();
        let mut cursor = Cursor::new(buf);
        match read_record(&mut cursor).unwrap() {
            ReadOutcome::Record(payload) => assert_eq!(payload, b"hello"),
            _ => panic!("expected a record"),
        }
    }

    #[test]
    fn empty_stream_is_end_of_data() {
        let mut cursor = Cursor::new(Vec::new());
        assert!(matches!(read_record(&mut cursor).unwrap(), ReadOutcome::EndOfData));
    }

    #[test]
    fn truncated_record_is_partial() {
        let mut buf = Vec::new();
        write_record(&mut buf, b"hello world").unwrap();
        buf.truncate(buf.len() - 3);
        let mut cursor = Cursor::new(buf);
        assert!(matches!(read_record(&mut cursor).unwrap(), ReadOutcome::Partial));
    }

    #[test]
    fn corrupted_checksum_is_partial() {
        let mut buf = Vec::new();
        write_record(&mut buf, b"hello").unwrap();
        let last = buf.len() - 1;
        buf[last] ^= 0xFF;
        let mut cursor = Cursor::new(buf);
        assert!(matches!(read_record(&mut cursor).unwrap(), ReadOutcome::Partial));
    }

    #[test]
    fn multiple_records_read_in_order() {
        let mut buf = Vec::new();
        write_record(&mut buf, b"one").unwrap();
        write_record(&mut buf, b"two").unwrap();
        let mut cursor = Cursor::new(buf);
        let first = match read_record(&mut cursor).unwrap() {
            ReadOutcome::Record(p) => p,
            _ => panic!("expected a record"),
        };
        let second = match read_record(&mut cursor).unwrap() {
            ReadOutcome::Record(p) => p,
            _ => panic!("expected a record"),
        };
        assert_eq!(first, b"one");
        assert_eq!(second, b"two");
        assert!(matches!(read_record(&mut cursor).unwrap(), ReadOutcome::EndOfData));
    }
}
