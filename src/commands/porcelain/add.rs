use crate::areas::repository::{GIT_DIR, Repository};
use crate::artifacts::index::index_entry::IndexEntry;
use anyhow::Context;
use std::path::{Path, PathBuf};

impl Repository {
    /// Stage files, expanding directories recursively
    ///
    /// Every path is expanded before the index is touched, so one missing
    /// path stages nothing.
    pub fn add(&self, cwd: &Path, paths: &[String]) -> anyhow::Result<()> {
        let mut index = self.index();
        index.rehydrate().context("failed to read the index")?;

        let mut files: Vec<PathBuf> = Vec::new();
        for path in paths {
            let name = self.workspace().relative_name(&cwd.join(path))?;
            if name == GIT_DIR || name.starts_with(&format!("{GIT_DIR}/")) {
                anyhow::bail!("'{path}' is inside the repository metadata directory");
            }

            let listed = self
                .workspace()
                .list_files(Path::new(&name))
                .with_context(|| format!("pathspec '{path}' did not match any files"))?;
            files.extend(listed);
        }

        for file in files {
            let name = self.workspace().relative_name(&file)?;
            let blob = self
                .workspace()
                .parse_blob(&file)
                .with_context(|| format!("failed to read {name}"))?;
            let stat = self.workspace().stat_file(&file)?;

            let blob_id = self.database().store(&blob)?;
            tracing::debug!(name, oid = %blob_id, "staging");
            index.add(IndexEntry::new(name, blob_id, &stat));
        }

        index.write_updates().context("failed to write the index")?;

        Ok(())
    }
}
