use crate::areas::repository::Repository;
use crate::artifacts::ignore::matcher::GitIgnore;
use anyhow::Context;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Echo every path the ignore rules exclude
    ///
    /// Paths are taken relative to `cwd` and matched relative to the root.
    pub fn check_ignore(&self, cwd: &Path, paths: &[String]) -> anyhow::Result<()> {
        let mut index = self.index();
        index.rehydrate().context("failed to read the index")?;

        let rules = GitIgnore::read(&self.git_path(), &index, self.database())
            .context("failed to read ignore rules")?;

        for path in paths {
            let name = self.workspace().relative_name(&cwd.join(path))?;
            if rules.is_ignored(&name)? {
                writeln!(self.writer(), "{path}")?;
            }
        }

        Ok(())
    }
}
