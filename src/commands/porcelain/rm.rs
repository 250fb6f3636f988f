use crate::areas::repository::Repository;
use anyhow::Context;
use std::path::Path;

impl Repository {
    /// Unstage paths and, unless `cached`, delete them from the working tree
    ///
    /// Fails without changing anything if any path is not staged.
    pub fn rm(&self, cwd: &Path, paths: &[String], cached: bool) -> anyhow::Result<()> {
        let mut index = self.index();
        index.rehydrate().context("failed to read the index")?;

        let names = paths
            .iter()
            .map(|path| self.workspace().relative_name(&cwd.join(path)))
            .collect::<Result<Vec<_>, _>>()?;

        let missing = names
            .iter()
            .filter(|name| index.entry_by_path(name).is_none())
            .map(String::as_str)
            .collect::<Vec<_>>();
        if !missing.is_empty() {
            anyhow::bail!("cannot remove paths not in the index: {}", missing.join(", "));
        }

        for name in &names {
            index.remove(name);
        }
        index.write_updates().context("failed to write the index")?;

        if cached {
            return Ok(());
        }

        for name in &names {
            let path = Path::new(name);
            if std::fs::symlink_metadata(self.workspace().path().join(path)).is_ok() {
                self.workspace()
                    .remove_file(path)
                    .with_context(|| format!("failed to delete {name}"))?;
            }
        }

        Ok(())
    }
}
