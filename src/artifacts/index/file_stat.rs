//! File-system metadata recorded in index entries
//!
//! Only Unix exposes device, inode and ownership; other platforms report
//! zero for those fields.

use crate::artifacts::index::entry_mode::{EntryMode, EntryType};
use crate::errors::{IoResultExt, Result};
use is_executable::IsExecutable;
use std::fs::Metadata;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FileStat {
    pub ctime: u32,
    pub ctime_nsec: u32,
    pub mtime: u32,
    pub mtime_nsec: u32,
    pub dev: u32,
    pub ino: u32,
    pub uid: u32,
    pub gid: u32,
    pub size: u32,
    pub mode: EntryMode,
}

impl FileStat {
    /// Stat `path` without following a final symlink
    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata = std::fs::symlink_metadata(path).with_path(path)?;

        let mode = if metadata.file_type().is_symlink() {
            EntryMode::new(EntryType::Symlink, 0)
        } else if path.is_executable() {
            EntryMode::new(EntryType::Regular, 0o755)
        } else {
            EntryMode::new(EntryType::Regular, 0o644)
        };

        Ok(Self::from_metadata(&metadata, mode))
    }

    pub fn is_regular(&self) -> bool {
        self.mode.entry_type == EntryType::Regular
    }

    // index fields are 32 bits wide; larger values are truncated
    #[cfg(unix)]
    fn from_metadata(metadata: &Metadata, mode: EntryMode) -> Self {
        use std::os::unix::fs::MetadataExt;

        FileStat {
            ctime: metadata.ctime() as u32,
            ctime_nsec: metadata.ctime_nsec() as u32,
            mtime: metadata.mtime() as u32,
            mtime_nsec: metadata.mtime_nsec() as u32,
            dev: metadata.dev() as u32,
            ino: metadata.ino() as u32,
            uid: metadata.uid(),
            gid: metadata.gid(),
            size: metadata.size() as u32,
            mode,
        }
    }

    #[cfg(not(unix))]
    fn from_metadata(metadata: &Metadata, mode: EntryMode) -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};

        let split = |time: std::io::Result<SystemTime>| {
            time.ok()
                .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
                .map(|elapsed| (elapsed.as_secs() as u32, elapsed.subsec_nanos()))
                .unwrap_or_default()
        };
        let (ctime, ctime_nsec) = split(metadata.created());
        let (mtime, mtime_nsec) = split(metadata.modified());

        FileStat {
            ctime,
            ctime_nsec,
            mtime,
            mtime_nsec,
            size: metadata.len() as u32,
            mode,
            ..Default::default()
        }
    }
}
