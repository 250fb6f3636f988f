use crate::areas::config::Config;
use crate::areas::refs::HEAD_REF_NAME;
use crate::areas::repository::Repository;
use anyhow::Context;
use std::fs;
use std::io::Write;

const DEFAULT_BRANCH: &str = "main";
const DESCRIPTION: &str =
    "Unnamed repository; edit this file 'description' to name the repository.\n";

impl Repository {
    /// Create the metadata layout; existing HEAD, config and description
    /// files are left alone
    pub fn init(&self) -> anyhow::Result<()> {
        let git_path = self.git_path();

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .git/objects directory")?;
        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .git/refs/heads directory")?;
        fs::create_dir_all(self.refs().tags_path())
            .context("Failed to create .git/refs/tags directory")?;
        fs::create_dir_all(git_path.join("info"))
            .context("Failed to create .git/info directory")?;

        let description = git_path.join("description");
        if !description.exists() {
            fs::write(&description, DESCRIPTION)
                .context("Failed to create .git/description file")?;
        }

        if !self.refs().head_path().exists() {
            self.refs()
                .set_symbolic_ref(HEAD_REF_NAME, &format!("refs/heads/{DEFAULT_BRANCH}"))
                .context("Failed to create initial HEAD reference")?;
        }

        if !self.config_path().exists() {
            Config::default()
                .save(&self.config_path())
                .context("Failed to write .git/config")?;
        }

        writeln!(
            self.writer(),
            "Initialized empty plumb repository in {}",
            git_path.display()
        )?;

        Ok(())
    }
}
