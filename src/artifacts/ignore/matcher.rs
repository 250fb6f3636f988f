use crate::areas::config::xdg_config_home;
use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::artifacts::ignore::IGNORE_FILE_NAME;
use crate::artifacts::ignore::rule::{Rule, evaluate, parse_rules};
use crate::artifacts::objects::object::GitObject;
use crate::errors::{Error, IoResultExt, Result};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitIgnore {
    /// Repository-wide groups, in reading order
    absolute: Vec<Vec<Rule>>,
    /// Rules keyed by the directory of their `.gitignore`, `""` for the root
    scoped: BTreeMap<String, Vec<Rule>>,
}

impl GitIgnore {
    pub fn new(absolute: Vec<Vec<Rule>>, scoped: BTreeMap<String, Vec<Rule>>) -> Self {
        GitIgnore { absolute, scoped }
    }

    /// Collect every rule source of a repository
    ///
    /// `git_path` is the metadata directory. In-tree `.gitignore` files are
    /// read from the object store through the index, so only staged content
    /// counts.
    pub fn read(git_path: &Path, index: &Index, database: &Database) -> Result<Self> {
        let mut absolute = Vec::new();

        let exclude = git_path.join("info").join("exclude");
        if let Some(rules) = read_rules_file(&exclude)? {
            absolute.push(rules);
        }

        if let Some(config_home) = xdg_config_home() {
            let global = config_home.join("git").join("ignore");
            if let Some(rules) = read_rules_file(&global)? {
                absolute.push(rules);
            }
        }

        let mut scoped = BTreeMap::new();
        for entry in index.entries() {
            if entry.basename() != IGNORE_FILE_NAME {
                continue;
            }

            let GitObject::Blob(blob) = database.load(&entry.oid)? else {
                return Err(Error::corruption(format!(
                    "{} is staged as {}, which is not a blob",
                    entry.name, entry.oid
                )));
            };
            let text = String::from_utf8_lossy(blob.data());
            let rules = parse_rules(text.split(['\n', '\r']));
            if !rules.is_empty() {
                tracing::trace!(directory = entry.dirname(), rules = rules.len(), "scoped ignore rules");
                scoped.insert(entry.dirname().to_string(), rules);
            }
        }

        Ok(GitIgnore { absolute, scoped })
    }

    /// Whether a repository-relative path is ignored
    pub fn is_ignored(&self, rel_path: &str) -> Result<bool> {
        if rel_path.starts_with('/') || Path::new(rel_path).is_absolute() {
            return Err(Error::InvalidArgument(format!(
                "{rel_path} must be relative to the repository root"
            )));
        }

        if self.is_ignored_scoped(rel_path) {
            return Ok(true);
        }

        Ok(self
            .absolute
            .iter()
            .fold(false, |ignored, rules| evaluate(rules, rel_path) || ignored))
    }

    fn is_ignored_scoped(&self, rel_path: &str) -> bool {
        let mut directory = parent(rel_path);

        loop {
            if let Some(rules) = self.scoped.get(directory)
                && evaluate(rules, relative_to(directory, rel_path))
            {
                return true;
            }
            if directory.is_empty() {
                return false;
            }
            directory = parent(directory);
        }
    }
}

fn parent(path: &str) -> &str {
    path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or_default()
}

/// `rel_path` as seen from `directory`, which must be one of its ancestors
fn relative_to<'p>(directory: &str, rel_path: &'p str) -> &'p str {
    if directory.is_empty() {
        return rel_path;
    }

    rel_path
        .strip_prefix(directory)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(rel_path)
}

/// `None` when the file does not exist
fn read_rules_file(path: &Path) -> Result<Option<Vec<Rule>>> {
    if !path.is_file() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).with_path(path)?;
    Ok(Some(parse_rules(content.lines())))
}
