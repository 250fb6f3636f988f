use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::objects::object::GitObject;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use std::path::{Path, PathBuf};

impl Repository {
    /// Write the tree of `commit` into `target`
    ///
    /// `target` must be missing or an empty directory. Neither the index nor
    /// HEAD change.
    pub fn checkout(&self, commit: &str, target: &Path) -> anyhow::Result<()> {
        let tree_id = self
            .resolver()
            .find_object(commit, Some(ObjectType::Tree), true)?
            .with_context(|| format!("{commit} does not name a tree"))?;

        if target.exists() {
            if !target.is_dir() {
                anyhow::bail!("{} is not a directory", target.display());
            }
            let mut contents = std::fs::read_dir(target)
                .with_context(|| format!("failed to read {}", target.display()))?;
            if contents.next().is_some() {
                anyhow::bail!("{} is not empty", target.display());
            }
        } else {
            std::fs::create_dir_all(target)
                .with_context(|| format!("failed to create {}", target.display()))?;
        }

        let root = target
            .canonicalize()
            .with_context(|| format!("failed to resolve {}", target.display()))?;
        let workspace = Workspace::new(root.into_boxed_path());
        tracing::debug!(oid = %tree_id, target = %workspace.path().display(), "checking out");

        self.checkout_tree(&workspace, &tree_id, PathBuf::new())
    }

    fn checkout_tree(
        &self,
        workspace: &Workspace,
        tree_id: &ObjectId,
        prefix: PathBuf,
    ) -> anyhow::Result<()> {
        let tree = self
            .database()
            .load_tree(tree_id)
            .with_context(|| format!("failed to read tree {tree_id}"))?;

        for leaf in tree.leaves() {
            let path = prefix.join(&leaf.name);
            let object_type = leaf
                .object_type()
                .with_context(|| format!("unknown mode {} for {}", leaf.mode, path.display()))?;

            match object_type {
                ObjectType::Tree => {
                    workspace.make_directory(&path)?;
                    self.checkout_tree(workspace, &leaf.oid, path)?;
                }
                ObjectType::Blob => {
                    let GitObject::Blob(blob) = self.database().load(&leaf.oid)? else {
                        anyhow::bail!("{} is not a blob", leaf.oid);
                    };
                    let mode = u16::from_str_radix(&leaf.normalized_mode(), 8)
                        .ok()
                        .and_then(|bits| EntryMode::try_from(bits).ok())
                        .with_context(|| format!("invalid mode {} for {}", leaf.mode, path.display()))?;
                    workspace.write_file(&path, blob.data(), mode)?;
                }
                // submodules stay empty directories
                ObjectType::Commit | ObjectType::Tag => workspace.make_directory(&path)?,
            }
        }

        Ok(())
    }
}
