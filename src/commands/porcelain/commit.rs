use crate::areas::config::{Config, global_config_path, identity_from_env};
use crate::areas::refs::HEAD_REF_NAME;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::ErrorKind;
use anyhow::Context;
use std::io::Write;

const BRANCH_PREFIX: &str = "refs/heads/";

impl Repository {
    /// Snapshot the index as a commit on top of HEAD and advance the
    /// current branch
    pub fn commit(&self, message: &str) -> anyhow::Result<()> {
        let message = message.trim();
        if message.is_empty() {
            anyhow::bail!("aborting commit due to empty commit message");
        }

        let tree_id = self.store_index_tree()?;
        let parent = self.head_commit()?;

        let author = self.author()?;
        let commit = Commit::new(
            tree_id,
            parent.iter().cloned().collect(),
            &author,
            &author,
            &format!("{message}\n"),
        )?;
        let commit_id = self.database().store(&commit)?;
        self.refs()
            .update_head(&commit_id)
            .context("failed to update HEAD")?;
        tracing::debug!(oid = %commit_id, "committed");

        let current = self.refs().current_ref()?;
        let branch = current
            .strip_prefix(BRANCH_PREFIX)
            .unwrap_or("detached HEAD");
        let root = if parent.is_none() { " (root-commit)" } else { "" };

        writeln!(
            self.writer(),
            "[{branch}{root} {}] {}",
            commit_id.to_short_oid(),
            commit.short_message()
        )?;

        Ok(())
    }

    /// `None` while HEAD is unborn
    pub(crate) fn head_commit(&self) -> anyhow::Result<Option<ObjectId>> {
        match self
            .resolver()
            .find_object(HEAD_REF_NAME, Some(ObjectType::Commit), true)
        {
            Ok(Some(oid)) => Ok(Some(oid)),
            Ok(None) => anyhow::bail!("{HEAD_REF_NAME} does not point at a commit"),
            Err(e) if e.kind() == ErrorKind::NoSuchReference => Ok(None),
            Err(e) => Err(e).context("failed to resolve HEAD"),
        }
    }

    /// Repository config, then the user config, then the environment
    fn author(&self) -> anyhow::Result<Author> {
        let mut identity = self.config()?.identity();
        if identity.is_none()
            && let Some(path) = global_config_path()
        {
            identity = Config::load_or_default(&path)?.identity();
        }

        let (name, email) = identity.or_else(identity_from_env).context(
            "no identity configured; set [user] name and email in the config \
             or GIT_AUTHOR_NAME and GIT_AUTHOR_EMAIL",
        )?;

        match std::env::var("GIT_AUTHOR_DATE") {
            Ok(date) => {
                let timestamp = Author::parse_date(&date)
                    .with_context(|| format!("invalid GIT_AUTHOR_DATE: {date}"))?;
                Ok(Author::new_with_timestamp(name, email, timestamp))
            }
            Err(_) => Ok(Author::new(name, email)),
        }
    }
}
