//! Git references (HEAD, branches, tags)
//!
//! References are small text files under the metadata directory holding
//! either a 40-character object id or `ref: <path>` for a symbolic reference.
//!
//! ## Reference Types
//!
//! - HEAD: points at the current branch, or at a commit when detached
//! - Branches: `refs/heads/*`
//! - Tags: `refs/tags/*`
//! - Remote-tracking branches: `refs/remotes/*`

use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, IoResultExt, Result};
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// Symbolic chains longer than this are treated as cycles
pub const MAX_SYMREF_DEPTH: usize = 8;

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the metadata directory (typically `.git`)
    path: Box<Path>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum RefValue {
    Symbolic(String),
    Direct(ObjectId),
}

impl RefValue {
    /// `None` when the file is missing, not a regular file or blank
    fn read(path: &Path) -> Result<Option<RefValue>> {
        if !path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).with_path(path)?;
        let content = content.trim();
        if content.is_empty() {
            return Ok(None);
        }

        let symref = regex::Regex::new(SYMREF_REGEX)
            .map_err(|e| Error::InvalidArgument(format!("symbolic ref pattern: {e}")))?;
        if let Some(captures) = symref.captures(content) {
            return Ok(Some(RefValue::Symbolic(captures[1].trim().to_string())));
        }

        ObjectId::try_parse(content.to_string())
            .map(|oid| Some(RefValue::Direct(oid)))
            .map_err(|_| {
                Error::corruption(format!(
                    "ref {} holds neither an object id nor a symbolic ref",
                    path.display()
                ))
            })
    }
}

impl Refs {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Follow `ref_path` (e.g. `HEAD`, `refs/heads/main`) to an object id
    ///
    /// Returns `None` when any ref along the chain is absent.
    pub fn resolve_ref(&self, ref_path: &str) -> Result<Option<ObjectId>> {
        let mut current = ref_path.to_string();

        for _ in 0..=MAX_SYMREF_DEPTH {
            match RefValue::read(&self.ref_file(&current))? {
                Some(RefValue::Symbolic(target)) => {
                    tracing::trace!(from = %current, to = %target, "following symbolic ref");
                    current = target;
                }
                Some(RefValue::Direct(oid)) => {
                    tracing::trace!(name = %ref_path, oid = %oid, "resolved ref");
                    return Ok(Some(oid));
                }
                None => return Ok(None),
            }
        }

        Err(Error::corruption(format!(
            "symbolic ref chain from {ref_path} is longer than {MAX_SYMREF_DEPTH} hops"
        )))
    }

    pub fn read_head(&self) -> Result<Option<ObjectId>> {
        self.resolve_ref(HEAD_REF_NAME)
    }

    /// The ref a commit would advance: the last symbolic target reached from
    /// HEAD, or `HEAD` itself when detached
    pub fn current_ref(&self) -> Result<String> {
        let mut current = HEAD_REF_NAME.to_string();

        for _ in 0..=MAX_SYMREF_DEPTH {
            match RefValue::read(&self.ref_file(&current))? {
                Some(RefValue::Symbolic(target)) => current = target,
                Some(RefValue::Direct(_)) | None => return Ok(current),
            }
        }

        Err(Error::corruption(format!(
            "symbolic ref chain from {HEAD_REF_NAME} is longer than {MAX_SYMREF_DEPTH} hops"
        )))
    }

    /// Point whatever HEAD resolves through at `oid`
    pub fn update_head(&self, oid: &ObjectId) -> Result<()> {
        let target = self.current_ref()?;
        self.update_ref(&target, oid)
    }

    pub fn update_ref(&self, ref_path: &str, oid: &ObjectId) -> Result<()> {
        self.write_ref_file(ref_path, &format!("{oid}\n"))
    }

    pub fn set_symbolic_ref(&self, ref_path: &str, target: &str) -> Result<()> {
        self.write_ref_file(ref_path, &format!("ref: {target}\n"))
    }

    /// Every ref file under `refs/`, sorted, as `refs/...` paths
    pub fn list_refs(&self) -> Result<Vec<String>> {
        let refs_path = self.refs_path();
        if !refs_path.is_dir() {
            return Ok(Vec::new());
        }

        let mut refs = Vec::new();
        for entry in WalkDir::new(&refs_path).sort_by_file_name() {
            let entry = entry.map_err(|e| Error::Io {
                path: refs_path.clone(),
                source: e.into(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(&self.path)
                .unwrap_or(entry.path())
                .components()
                .map(|component| component.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            refs.push(relative);
        }

        refs.sort();
        Ok(refs)
    }

    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_REF_NAME)
    }

    pub fn refs_path(&self) -> PathBuf {
        self.path.join("refs")
    }

    pub fn heads_path(&self) -> PathBuf {
        self.refs_path().join("heads")
    }

    pub fn tags_path(&self) -> PathBuf {
        self.refs_path().join("tags")
    }

    fn ref_file(&self, ref_path: &str) -> PathBuf {
        ref_path
            .split('/')
            .fold(self.path.to_path_buf(), |path, segment| path.join(segment))
    }

    fn write_ref_file(&self, ref_path: &str, content: &str) -> Result<()> {
        let path = self.ref_file(ref_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_path(parent)?;
        }

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .with_path(&path)?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1).with_path(&path)?;
        lock.deref_mut().set_len(0).with_path(&path)?;
        lock.deref_mut()
            .write_all(content.as_bytes())
            .with_path(&path)?;

        tracing::debug!(name = %ref_path, content = content.trim_end(), "updated ref");
        Ok(())
    }
}
