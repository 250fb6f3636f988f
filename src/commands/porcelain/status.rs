use crate::areas::database::write_object;
use crate::areas::repository::Repository;
use crate::artifacts::ignore::matcher::GitIgnore;
use crate::artifacts::index::file_stat::FileStat;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use std::path::Path;

const BRANCH_PREFIX: &str = "refs/heads/";

/// Path -> (normalized mode, blob id) of every non-tree leaf below a tree
type FlatTree = BTreeMap<String, (String, ObjectId)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum FileStatus {
    Added,
    Modified,
    Deleted,
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            FileStatus::Added => "added:",
            FileStatus::Modified => "modified:",
            FileStatus::Deleted => "deleted:",
        };
        write!(f, "{label:<10}")
    }
}

// Terminology:
// - staged: the index differs from the tree of HEAD
// - unstaged: the working tree differs from the index
// - untracked: in the working tree, not in the index and not ignored
impl Repository {
    /// Report the branch, staged changes, unstaged changes and untracked files
    ///
    /// Nothing is written back: the index stays as it was read.
    pub fn status(&self) -> anyhow::Result<()> {
        let mut index = self.index();
        index.rehydrate().context("failed to read the index")?;

        self.report_branch()?;

        let head = match self.head_commit()? {
            Some(commit_id) => self.flatten_tree(&commit_id)?,
            None => FlatTree::new(),
        };
        let staged = staged_changes(&head, index.entries());

        let mut unstaged = Vec::new();
        for entry in index.entries() {
            if let Some(status) = self.worktree_change(entry)? {
                unstaged.push((entry.name.as_str(), status));
            }
        }

        let ignore = GitIgnore::read(&self.git_path(), &index, self.database())
            .context("failed to read ignore rules")?;
        let tracked: BTreeSet<&str> = index.entries().iter().map(|e| e.name.as_str()).collect();
        let mut untracked = Vec::new();
        for file in self.workspace().list_files(Path::new(""))? {
            let name = self.workspace().relative_name(&file)?;
            if !tracked.contains(name.as_str()) && !ignore.is_ignored(&name)? {
                untracked.push(name);
            }
        }

        let mut writer = self.writer();
        writeln!(writer, "Changes to be committed:")?;
        for (name, status) in &staged {
            writeln!(writer, "  {status}{name}")?;
        }
        writeln!(writer)?;
        writeln!(writer, "Changes not staged for commit:")?;
        for (name, status) in &unstaged {
            writeln!(writer, "  {status}{name}")?;
        }
        writeln!(writer)?;
        writeln!(writer, "Untracked files:")?;
        for name in &untracked {
            writeln!(writer, "  {name}")?;
        }

        Ok(())
    }

    fn report_branch(&self) -> anyhow::Result<()> {
        let current = self.refs().current_ref()?;

        match current.strip_prefix(BRANCH_PREFIX) {
            Some(branch) => writeln!(self.writer(), "On branch {branch}")?,
            None => {
                let head = self
                    .refs()
                    .read_head()?
                    .context("HEAD is detached but holds no object id")?;
                writeln!(self.writer(), "HEAD detached at {}", head.to_short_oid())?
            }
        }

        Ok(())
    }

    /// Every blob reachable from the tree of `commit_id`, keyed by full path
    fn flatten_tree(&self, commit_id: &ObjectId) -> anyhow::Result<FlatTree> {
        let tree_id = self
            .resolver()
            .find_object(commit_id.as_ref(), Some(ObjectType::Tree), true)?
            .with_context(|| format!("commit {commit_id} has no tree"))?;

        let mut flat = FlatTree::new();
        self.flatten_into(&tree_id, "", &mut flat)?;
        Ok(flat)
    }

    fn flatten_into(
        &self,
        tree_id: &ObjectId,
        prefix: &str,
        flat: &mut FlatTree,
    ) -> anyhow::Result<()> {
        let tree = self
            .database()
            .load_tree(tree_id)
            .with_context(|| format!("failed to read tree {tree_id}"))?;

        for leaf in tree.leaves() {
            let path = if prefix.is_empty() {
                leaf.name.clone()
            } else {
                format!("{prefix}/{}", leaf.name)
            };

            if leaf.is_tree() {
                self.flatten_into(&leaf.oid, &path, flat)?;
            } else {
                flat.insert(path, (leaf.normalized_mode(), leaf.oid.clone()));
            }
        }

        Ok(())
    }

    /// Compare an index entry with the file it was staged from
    ///
    /// Matching size, mode and mtime count as unchanged; otherwise the file
    /// is hashed and compared with the staged blob.
    fn worktree_change(&self, entry: &IndexEntry) -> anyhow::Result<Option<FileStatus>> {
        let name = Path::new(&entry.name);
        if self.workspace().path().join(name).symlink_metadata().is_err() {
            return Ok(Some(FileStatus::Deleted));
        }

        let stat = self.workspace().stat_file(name)?;
        if !stat_match(entry, &stat) {
            return Ok(Some(FileStatus::Modified));
        }
        if times_match(entry, &stat) {
            return Ok(None);
        }

        let blob = self
            .workspace()
            .parse_blob(name)
            .with_context(|| format!("failed to read {}", entry.name))?;
        if write_object(&blob, None)? != entry.oid {
            return Ok(Some(FileStatus::Modified));
        }

        Ok(None)
    }
}

/// Index entries against the flattened HEAD tree, in path order
fn staged_changes<'a>(
    head: &'a FlatTree,
    entries: &'a [IndexEntry],
) -> Vec<(&'a str, FileStatus)> {
    let mut changes = Vec::new();

    for entry in entries {
        match head.get(&entry.name) {
            None => changes.push((entry.name.as_str(), FileStatus::Added)),
            Some((mode, oid)) if *oid != entry.oid || *mode != entry.mode.tree_mode() => {
                changes.push((entry.name.as_str(), FileStatus::Modified))
            }
            Some(_) => {}
        }
    }

    let staged: BTreeSet<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    changes.extend(
        head.keys()
            .filter(|name| !staged.contains(name.as_str()))
            .map(|name| (name.as_str(), FileStatus::Deleted)),
    );
    changes.sort();
    changes
}

fn stat_match(entry: &IndexEntry, stat: &FileStat) -> bool {
    entry.size == stat.size && entry.mode == stat.mode
}

fn times_match(entry: &IndexEntry, stat: &FileStat) -> bool {
    entry.mtime == stat.mtime && entry.mtime_nsec == stat.mtime_nsec
}
