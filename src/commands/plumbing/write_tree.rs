use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree_builder::build_tree;
use anyhow::Context;
use std::io::Write;

impl Repository {
    pub fn write_tree(&self) -> anyhow::Result<()> {
        let tree_id = self.store_index_tree()?;
        writeln!(self.writer(), "{tree_id}")?;

        Ok(())
    }

    /// Load the index and store one tree per staged directory
    pub(crate) fn store_index_tree(&self) -> anyhow::Result<ObjectId> {
        let mut index = self.index();
        index.rehydrate().context("failed to read the index")?;

        let tree_id = build_tree(index.entries(), Some(self.database()))
            .context("failed to write trees")?;
        tracing::debug!(oid = %tree_id, entries = index.len(), "wrote index as tree");

        Ok(tree_id)
    }
}
