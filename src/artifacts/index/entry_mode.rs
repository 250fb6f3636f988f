//! The 16-bit mode field of an index entry
//!
//! Top 4 bits hold the entry type, low 9 bits the permissions.

use crate::errors::{Error, Result};

const PERMISSIONS_MASK: u16 = 0o777;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryType {
    #[default]
    Regular,
    Symlink,
    Gitlink,
}

impl EntryType {
    pub fn bits(&self) -> u16 {
        match self {
            EntryType::Regular => 0b1000,
            EntryType::Symlink => 0b1010,
            EntryType::Gitlink => 0b1110,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Regular => "regular file",
            EntryType::Symlink => "symlink",
            EntryType::Gitlink => "git link",
        }
    }
}

impl TryFrom<u16> for EntryType {
    type Error = Error;

    fn try_from(bits: u16) -> Result<Self> {
        match bits {
            0b1000 => Ok(EntryType::Regular),
            0b1010 => Ok(EntryType::Symlink),
            0b1110 => Ok(EntryType::Gitlink),
            other => Err(Error::corruption(format!(
                "invalid index entry type {other:#06b}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntryMode {
    pub entry_type: EntryType,
    pub permissions: u16,
}

impl EntryMode {
    pub fn new(entry_type: EntryType, permissions: u16) -> Self {
        EntryMode {
            entry_type,
            permissions: permissions & PERMISSIONS_MASK,
        }
    }

    pub fn as_u16(&self) -> u16 {
        (self.entry_type.bits() << 12) | self.permissions
    }

    /// Mode string a tree leaf carries for this entry, e.g. `100644`
    pub fn tree_mode(&self) -> String {
        format!("{:02o}{:04o}", self.entry_type.bits(), self.permissions)
    }
}

impl TryFrom<u16> for EntryMode {
    type Error = Error;

    fn try_from(mode: u16) -> Result<Self> {
        let entry_type = EntryType::try_from(mode >> 12)?;
        Ok(EntryMode::new(entry_type, mode & PERMISSIONS_MASK))
    }
}
