use crate::artifacts::index::entry_mode::{EntryMode, EntryType};
use crate::artifacts::index::file_stat::FileStat;
use crate::artifacts::objects::blob::Blob;
use crate::errors::{Error, IoResultExt, Result};
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 1] = [".git"];

/// A directory tree of plain files, usually the working tree
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Files at or below `path`, relative to the workspace root and sorted
    ///
    /// A file yields itself; a directory is walked recursively, skipping the
    /// metadata directory.
    pub fn list_files(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let absolute = self.path.join(path);
        let metadata = std::fs::symlink_metadata(&absolute).with_path(&absolute)?;

        if !metadata.is_dir() {
            return Ok(vec![self.relative_path(&absolute)?]);
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(&absolute)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !Self::is_ignored(entry.path()));
        for entry in walker {
            let entry = entry.map_err(|e| Error::Io {
                path: absolute.clone(),
                source: e.into(),
            })?;
            if !entry.file_type().is_dir() {
                files.push(self.relative_path(entry.path())?);
            }
        }

        Ok(files)
    }

    /// Turn a user-supplied path into a `/`-separated, workspace-relative name
    ///
    /// Relative inputs are taken relative to the workspace root. `.` and `..`
    /// are folded lexically; escaping the workspace is an error.
    pub fn relative_name(&self, path: &Path) -> Result<String> {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.path.join(path)
        };
        let relative = self.relative_path(&absolute)?;

        let mut segments: Vec<String> = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(segment) => {
                    segments.push(segment.to_string_lossy().into_owned())
                }
                Component::CurDir => {}
                Component::ParentDir => {
                    segments.pop().ok_or_else(|| {
                        Error::InvalidArgument(format!(
                            "{} is outside of {}",
                            path.display(),
                            self.path.display()
                        ))
                    })?;
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(Error::InvalidArgument(format!(
                        "{} is outside of {}",
                        path.display(),
                        self.path.display()
                    )));
                }
            }
        }

        Ok(segments.join("/"))
    }

    /// Content of a file, or the target of a symlink
    pub fn read_file(&self, name: &Path) -> Result<Bytes> {
        let path = self.path.join(name);
        let metadata = std::fs::symlink_metadata(&path).with_path(&path)?;

        if metadata.file_type().is_symlink() {
            let target = std::fs::read_link(&path).with_path(&path)?;
            return Ok(Bytes::from(target.to_string_lossy().into_owned()));
        }

        Ok(Bytes::from(std::fs::read(&path).with_path(&path)?))
    }

    pub fn parse_blob(&self, name: &Path) -> Result<Blob> {
        Ok(Blob::new(self.read_file(name)?))
    }

    pub fn stat_file(&self, name: &Path) -> Result<FileStat> {
        FileStat::from_path(&self.path.join(name))
    }

    /// Write a file, creating parent directories, with permissions from `mode`
    ///
    /// Symlink modes create a link to `data` on unix.
    pub fn write_file(&self, name: &Path, data: &[u8], mode: EntryMode) -> Result<()> {
        let path = self.path.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_path(parent)?;
        }

        #[cfg(unix)]
        if mode.entry_type == EntryType::Symlink {
            let target = String::from_utf8_lossy(data);
            return std::os::unix::fs::symlink(target.as_ref(), &path).with_path(&path);
        }

        std::fs::write(&path, data).with_path(&path)?;

        #[cfg(unix)]
        if mode.entry_type == EntryType::Regular {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(mode.permissions.into());
            std::fs::set_permissions(&path, permissions).with_path(&path)?;
        }
        #[cfg(not(unix))]
        let _ = mode;

        Ok(())
    }

    pub fn make_directory(&self, name: &Path) -> Result<()> {
        let path = self.path.join(name);
        std::fs::create_dir_all(&path).with_path(&path)
    }

    pub fn remove_file(&self, name: &Path) -> Result<()> {
        let path = self.path.join(name);
        std::fs::remove_file(&path).with_path(&path)
    }

    fn relative_path(&self, path: &Path) -> Result<PathBuf> {
        path.strip_prefix(&self.path)
            .map(Path::to_path_buf)
            .map_err(|_| {
                Error::InvalidArgument(format!(
                    "{} is outside of {}",
                    path.display(),
                    self.path.display()
                ))
            })
    }

    fn is_ignored(path: &Path) -> bool {
        path.file_name()
            .map(|name| IGNORED_PATHS.contains(&name.to_string_lossy().as_ref()))
            .unwrap_or(false)
    }
}
