//! Index entry representation
//!
//! Each entry binds a repository-relative path to a blob id, plus the stat
//! data captured when the file was staged.
//!
//! ## Entry Format
//!
//! ```text
//! ctime sec/nsec, mtime sec/nsec, dev, ino      6 x 4 bytes
//! unused                                         2 bytes (zero)
//! mode                                           2 bytes
//! uid, gid, size                                 3 x 4 bytes
//! object id                                      20 bytes
//! flags                                          2 bytes
//! path                                           variable, NUL-terminated
//! padding                                        zeros up to a multiple of 8
//! ```

use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::entry_mode::{EntryMode, EntryType};
use crate::artifacts::index::file_stat::FileStat;
use crate::artifacts::index::{ENTRY_BLOCK, ENTRY_FIXED_SIZE, NAME_LENGTH_MASK};
use crate::artifacts::objects::OBJECT_ID_BYTES;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};
use bitflags::bitflags;
use byteorder::{ByteOrder, NetworkEndian};
use bytes::{BufMut, BytesMut};

bitflags! {
    /// High bits of the 16-bit flags field
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct IndexFlags: u16 {
        const ASSUME_VALID = 0x8000;
        const EXTENDED = 0x4000;
    }
}

const STAGE_MASK: u16 = 0x3000;
const STAGE_SHIFT: u16 = 12;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Path relative to the worktree root, `/`-separated
    pub name: String,
    pub oid: ObjectId,
    pub ctime: u32,
    pub ctime_nsec: u32,
    pub mtime: u32,
    pub mtime_nsec: u32,
    pub dev: u32,
    pub ino: u32,
    pub mode: EntryMode,
    pub uid: u32,
    pub gid: u32,
    pub size: u32,
    pub assume_valid: bool,
    /// Merge stage, 0 outside of conflicts
    pub stage: u8,
}

impl IndexEntry {
    pub fn new(name: String, oid: ObjectId, stat: &FileStat) -> Self {
        IndexEntry {
            name,
            oid,
            ctime: stat.ctime,
            ctime_nsec: stat.ctime_nsec,
            mtime: stat.mtime,
            mtime_nsec: stat.mtime_nsec,
            dev: stat.dev,
            ino: stat.ino,
            mode: stat.mode,
            uid: stat.uid,
            gid: stat.gid,
            size: stat.size,
            assume_valid: false,
            stage: 0,
        }
    }

    pub fn entry_type(&self) -> EntryType {
        self.mode.entry_type
    }

    /// Last path segment
    pub fn basename(&self) -> &str {
        self.name
            .rsplit_once('/')
            .map(|(_, base)| base)
            .unwrap_or(&self.name)
    }

    /// Containing directory, `""` for the root
    pub fn dirname(&self) -> &str {
        self.name
            .rsplit_once('/')
            .map(|(dir, _)| dir)
            .unwrap_or_default()
    }

    pub fn write_to(&self, bytes: &mut BytesMut) -> Result<()> {
        let start = bytes.len();

        bytes.put_u32(self.ctime);
        bytes.put_u32(self.ctime_nsec);
        bytes.put_u32(self.mtime);
        bytes.put_u32(self.mtime_nsec);
        bytes.put_u32(self.dev);
        bytes.put_u32(self.ino);
        bytes.put_u16(0);
        bytes.put_u16(self.mode.as_u16());
        bytes.put_u32(self.uid);
        bytes.put_u32(self.gid);
        bytes.put_u32(self.size);
        bytes.put_slice(&self.oid.to_raw_bytes()?);
        bytes.put_u16(self.flags()?);

        bytes.put_slice(self.name.as_bytes());
        bytes.put_u8(0);
        while (bytes.len() - start) % ENTRY_BLOCK != 0 {
            bytes.put_u8(0);
        }

        Ok(())
    }

    pub fn read_from(reader: &mut Checksum) -> Result<Self> {
        let start = reader.position();
        let fixed = reader.read(ENTRY_FIXED_SIZE)?;

        let ctime = NetworkEndian::read_u32(&fixed[0..4]);
        let ctime_nsec = NetworkEndian::read_u32(&fixed[4..8]);
        let mtime = NetworkEndian::read_u32(&fixed[8..12]);
        let mtime_nsec = NetworkEndian::read_u32(&fixed[12..16]);
        let dev = NetworkEndian::read_u32(&fixed[16..20]);
        let ino = NetworkEndian::read_u32(&fixed[20..24]);
        let unused = NetworkEndian::read_u16(&fixed[24..26]);
        if unused != 0 {
            return Err(Error::corruption(format!(
                "index entry at byte {start}: reserved mode bits are set"
            )));
        }
        let mode = EntryMode::try_from(NetworkEndian::read_u16(&fixed[26..28]))?;
        let uid = NetworkEndian::read_u32(&fixed[28..32]);
        let gid = NetworkEndian::read_u32(&fixed[32..36]);
        let size = NetworkEndian::read_u32(&fixed[36..40]);
        let oid = ObjectId::from_raw_bytes(&fixed[40..40 + OBJECT_ID_BYTES])?;

        let raw_flags = NetworkEndian::read_u16(&fixed[60..62]);
        let flags = IndexFlags::from_bits_truncate(raw_flags);
        if flags.contains(IndexFlags::EXTENDED) {
            return Err(Error::UnsupportedFormat(format!(
                "index entry at byte {start} uses extended flags"
            )));
        }
        let stage = ((raw_flags & STAGE_MASK) >> STAGE_SHIFT) as u8;
        let name_length = raw_flags & NAME_LENGTH_MASK;

        let name = if name_length < NAME_LENGTH_MASK {
            let name = reader.read(name_length as usize)?;
            if reader.read(1)? != [0] {
                return Err(Error::corruption(format!(
                    "index entry at byte {start}: path is not NUL-terminated"
                )));
            }
            name
        } else {
            reader.read_until_nul()?
        };
        let name = String::from_utf8(name.to_vec()).map_err(|_| {
            Error::corruption(format!("index entry at byte {start}: path is not UTF-8"))
        })?;

        let consumed = reader.position() - start;
        let padding = (ENTRY_BLOCK - consumed % ENTRY_BLOCK) % ENTRY_BLOCK;
        reader.read(padding)?;

        Ok(IndexEntry {
            name,
            oid,
            ctime,
            ctime_nsec,
            mtime,
            mtime_nsec,
            dev,
            ino,
            mode,
            uid,
            gid,
            size,
            assume_valid: flags.contains(IndexFlags::ASSUME_VALID),
            stage,
        })
    }

    fn flags(&self) -> Result<u16> {
        if self.stage > 3 {
            return Err(Error::InvalidArgument(format!(
                "merge stage {} of {} does not fit in two bits",
                self.stage, self.name
            )));
        }

        let mut flags = IndexFlags::empty();
        flags.set(IndexFlags::ASSUME_VALID, self.assume_valid);
        let name_length = self.name.len().min(NAME_LENGTH_MASK as usize) as u16;

        Ok(flags.bits() | ((self.stage as u16) << STAGE_SHIFT) | name_length)
    }
}
