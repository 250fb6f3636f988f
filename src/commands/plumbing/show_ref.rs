use crate::areas::repository::Repository;
use anyhow::Context;
use std::io::Write;

impl Repository {
    /// `<id> <ref>` for every resolvable ref under `refs/`
    pub fn show_ref(&self) -> anyhow::Result<()> {
        let refs = self.refs().list_refs().context("failed to list refs")?;

        for name in refs {
            match self.refs().resolve_ref(&name)? {
                Some(object_id) => writeln!(self.writer(), "{object_id} {name}")?,
                None => tracing::debug!(name, "skipping dangling ref"),
            }
        }

        Ok(())
    }
}
