use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use std::io::Write;

impl Repository {
    /// `<mode> <type> <id>\t<path>` per leaf
    ///
    /// Commits are peeled to their tree. With `recursive`, subtrees are
    /// expanded instead of listed.
    pub fn ls_tree(&self, name: &str, recursive: bool) -> anyhow::Result<()> {
        let tree_id = self
            .resolver()
            .find_object(name, Some(ObjectType::Tree), true)?
            .with_context(|| format!("{name} does not name a tree"))?;

        self.list_tree(&tree_id, recursive, "")
    }

    fn list_tree(&self, tree_id: &ObjectId, recursive: bool, prefix: &str) -> anyhow::Result<()> {
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
            let object_type = leaf
                .object_type()
                .with_context(|| format!("unknown mode {} for {path}", leaf.mode))?;

            if recursive && object_type == ObjectType::Tree {
                self.list_tree(&leaf.oid, recursive, &path)?;
            } else {
                writeln!(
                    self.writer(),
                    "{} {} {}\t{}",
                    leaf.normalized_mode(),
                    object_type,
                    leaf.oid,
                    path
                )?;
            }
        }

        Ok(())
    }
}
