//! Whole-file encoding of the index
//!
//! Padding is measured from the start of each entry. Since every entry ends
//! on an 8-byte boundary, this is the same as measuring from the start of
//! the entry region.

use crate::artifacts::index::checksum::{Checksum, append_checksum};
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::{ENTRY_FIXED_SIZE, HEADER_SIZE, SIGNATURE, VERSION};
use crate::errors::{Error, Result};
use bytes::{Bytes, BytesMut};

/// Decode an index file into its version and entries
///
/// An empty buffer is an empty index (version 0).
pub fn decode(data: &[u8]) -> Result<(u32, Vec<IndexEntry>)> {
    if data.is_empty() {
        return Ok((0, Vec::new()));
    }

    let mut reader = Checksum::new(data);
    let header = IndexHeader::parse(reader.read(HEADER_SIZE)?)?;

    // the header count is untrusted; every entry is at least its fixed part
    let max_entries = (data.len() - HEADER_SIZE) / ENTRY_FIXED_SIZE;
    let mut entries = Vec::with_capacity((header.entries_count as usize).min(max_entries));
    for _ in 0..header.entries_count {
        entries.push(IndexEntry::read_from(&mut reader)?);
    }

    reader.verify()?;
    Ok((header.version, entries))
}

/// Encode entries as a version 2 index, checksum included
pub fn encode(entries: &[IndexEntry]) -> Result<Bytes> {
    let entries_count = u32::try_from(entries.len())
        .map_err(|_| Error::InvalidArgument(format!("too many index entries: {}", entries.len())))?;

    let mut bytes = BytesMut::new();
    IndexHeader::new(SIGNATURE.to_string(), VERSION, entries_count).write_to(&mut bytes);
    for entry in entries {
        entry.write_to(&mut bytes)?;
    }
    append_checksum(&mut bytes);

    Ok(bytes.freeze())
}
