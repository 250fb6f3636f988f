use crate::areas::repository::Repository;
use anyhow::Context;
use chrono::DateTime;
use std::io::Write;

impl Repository {
    pub fn ls_files(&self, verbose: bool) -> anyhow::Result<()> {
        let mut index = self.index();
        index.rehydrate().context("failed to read the index")?;

        if index.version() == 0 {
            return Ok(());
        }

        if verbose {
            writeln!(
                self.writer(),
                "Index file format v{}, containing {} entries",
                index.version(),
                index.len()
            )?;
        }

        for entry in index.entries() {
            writeln!(self.writer(), "{}", entry.name)?;
            if !verbose {
                continue;
            }

            let mut writer = self.writer();
            writeln!(
                writer,
                "  {} with perms: {:o}",
                entry.entry_type().as_str(),
                entry.mode.permissions
            )?;
            writeln!(writer, "  on blob: {}", entry.oid)?;
            writeln!(
                writer,
                "  created: {}, modified: {}",
                format_timestamp(entry.ctime, entry.ctime_nsec),
                format_timestamp(entry.mtime, entry.mtime_nsec)
            )?;
            writeln!(writer, "  device: {}, inode: {}", entry.dev, entry.ino)?;
            writeln!(writer, "  user: {}, group: {}", entry.uid, entry.gid)?;
            writeln!(
                writer,
                "  flags: stage={} assume_valid={}",
                entry.stage, entry.assume_valid
            )?;
        }

        Ok(())
    }
}

fn format_timestamp(seconds: u32, nanoseconds: u32) -> String {
    DateTime::from_timestamp(seconds.into(), nanoseconds)
        .map(|timestamp| timestamp.format("%Y-%m-%d %H:%M:%S%.9f UTC").to_string())
        .unwrap_or_else(|| format!("{seconds}.{nanoseconds:09}"))
}
