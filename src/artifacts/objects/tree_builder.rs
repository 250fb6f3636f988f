//! Build a tree hierarchy from the flat staging index
//!
//! Entries are grouped by containing directory. Directories are then written
//! deepest first, so by the time a directory's tree is serialized every child
//! tree id is known and has been pushed into it as a `40000` leaf.

use crate::areas::database::{Database, write_object};
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::{DIRECTORY_MODE, Tree, TreeLeaf};
use crate::errors::{Error, Result};
use std::collections::BTreeMap;

/// Write one tree per directory and return the root tree id
///
/// Without a database nothing is persisted and only the ids are computed.
/// An empty index yields the empty tree.
pub fn build_tree(entries: &[IndexEntry], database: Option<&Database>) -> Result<ObjectId> {
    let mut directories: BTreeMap<String, Vec<TreeLeaf>> = BTreeMap::new();
    directories.insert(String::new(), Vec::new());

    for entry in entries {
        let dirname = entry.dirname();
        for ancestor in ancestors(dirname) {
            directories.entry(ancestor.to_string()).or_default();
        }

        directories
            .entry(dirname.to_string())
            .or_default()
            .push(TreeLeaf::new(
                entry.mode.tree_mode(),
                entry.basename().to_string(),
                entry.oid.clone(),
            ));
    }

    let mut order = directories.keys().cloned().collect::<Vec<_>>();
    order.sort_by(|a, b| depth(b).cmp(&depth(a)).then_with(|| a.cmp(b)));

    for directory in order {
        let leaves = directories.remove(&directory).unwrap_or_default();
        let tree_id = write_object(&Tree::new(leaves), database)?;
        tracing::trace!(directory = %directory, oid = %tree_id, "wrote tree");

        match directory.rsplit_once('/') {
            Some((parent, name)) => push_subtree(&mut directories, parent, name, tree_id)?,
            None if directory.is_empty() => return Ok(tree_id),
            None => push_subtree(&mut directories, "", &directory, tree_id)?,
        }
    }

    Err(Error::corruption("root directory was never written"))
}

fn push_subtree(
    directories: &mut BTreeMap<String, Vec<TreeLeaf>>,
    parent: &str,
    name: &str,
    tree_id: ObjectId,
) -> Result<()> {
    let leaves = directories
        .get_mut(parent)
        .ok_or_else(|| Error::corruption(format!("parent directory {parent:?} was written early")))?;
    leaves.push(TreeLeaf::new(
        DIRECTORY_MODE.to_string(),
        name.to_string(),
        tree_id,
    ));
    Ok(())
}

/// `a/b/c` yields `a`, `a/b`
fn ancestors(dirname: &str) -> impl Iterator<Item = &str> {
    dirname
        .match_indices('/')
        .map(move |(position, _)| &dirname[..position])
}

/// Root is 0, `a` is 1, `a/b` is 2
fn depth(directory: &str) -> usize {
    if directory.is_empty() {
        0
    } else {
        directory.matches('/').count() + 1
    }
}
