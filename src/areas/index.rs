//! Git index (staging area)
//!
//! The index is read wholesale, mutated in memory and rewritten wholesale.
//! Entries keep insertion order; staging a path again moves it to the end.
//!
//! ## Locking
//!
//! Reads take a shared `file_guard` lock on the index file and writes an
//! exclusive one, so two processes never interleave a read-modify-write.

use crate::artifacts::index::codec;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::errors::{IoResultExt, Result};
use std::io::{Read, Write};
use std::ops::DerefMut;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.git/index`)
    path: Box<Path>,
    /// 0 until an index file has been read
    version: u32,
    entries: Vec<IndexEntry>,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            version: 0,
            entries: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Load the index from disk
    ///
    /// A missing file is an empty index, not an error.
    pub fn rehydrate(&mut self) -> Result<()> {
        self.version = 0;
        self.entries.clear();

        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no index file, starting empty");
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new()
            .read(true)
            .open(&self.path)
            .with_path(&*self.path)?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)
            .with_path(&*self.path)?;

        let mut data = Vec::new();
        lock.deref_mut()
            .read_to_end(&mut data)
            .with_path(&*self.path)?;

        let (version, entries) = codec::decode(&data)?;
        tracing::debug!(version, entries = entries.len(), "loaded index");

        self.version = version;
        self.entries = entries;
        Ok(())
    }

    pub fn write_updates(&mut self) -> Result<()> {
        let bytes = codec::encode(&self.entries)?;

        // truncate only once the exclusive lock is held
        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)
            .with_path(&*self.path)?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Exclusive, 0, 1)
            .with_path(&*self.path)?;

        lock.deref_mut().set_len(0).with_path(&*self.path)?;
        lock.deref_mut().write_all(&bytes).with_path(&*self.path)?;
        tracing::debug!(entries = self.entries.len(), bytes = bytes.len(), "wrote index");

        self.version = crate::artifacts::index::VERSION;
        Ok(())
    }

    /// Stage an entry, replacing any entry with the same path
    pub fn add(&mut self, entry: IndexEntry) {
        self.entries.retain(|existing| existing.name != entry.name);
        self.entries.push(entry);
    }

    /// Unstage a path, reporting whether it was staged
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|existing| existing.name != name);

        self.entries.len() != before
    }

    pub fn entry_by_path(&self, name: &str) -> Option<&IndexEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
