use crate::areas::config::Config;
use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::revision::resolver::Resolver;
use crate::errors::{Error, IoResultExt, Result};
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

/// Name of the metadata directory inside a working tree
pub const GIT_DIR: &str = ".git";

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: RefCell<Index>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    /// Handle on the working tree at `path`, creating the directory if needed
    ///
    /// Nothing under the metadata directory is touched until a command runs.
    pub fn new(path: &Path, writer: Box<dyn std::io::Write>) -> Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(path).with_path(path)?;
        }
        let path = path.canonicalize().with_path(path)?;
        let git_path = path.join(GIT_DIR);

        let index = Index::new(git_path.join("index").into_boxed_path());
        let database = Database::new(git_path.join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(git_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: RefCell::new(index),
            database,
            workspace,
            refs,
        })
    }

    /// Find the repository containing `start` by walking up to the first
    /// directory holding a metadata directory
    pub fn discover(start: &Path, writer: Box<dyn std::io::Write>) -> Result<Self> {
        let start = start.canonicalize().with_path(start)?;

        let root = start
            .ancestors()
            .find(|candidate| candidate.join(GIT_DIR).is_dir())
            .ok_or_else(|| {
                Error::NotFound(format!(
                    "not a repository (or any parent up to /): {}",
                    start.display()
                ))
            })?;
        tracing::debug!(root = %root.display(), "discovered repository");

        Self::new(root, writer)
    }

    /// Working tree root
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn git_path(&self) -> PathBuf {
        self.path.join(GIT_DIR)
    }

    pub fn config_path(&self) -> PathBuf {
        self.git_path().join("config")
    }

    pub fn config(&self) -> Result<Config> {
        Config::load_or_default(&self.config_path())
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&'_ self) -> RefMut<'_, Index> {
        self.index.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn resolver(&'_ self) -> Resolver<'_> {
        Resolver::new(&self.database, &self.refs)
    }
}
