use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use std::collections::HashSet;
use std::io::Write;

impl Repository {
    /// Commit ancestry of `name` as a Graphviz `digraph`
    ///
    /// Every reachable commit is emitted once, followed by an edge to each of
    /// its parents.
    pub fn log(&self, name: &str) -> anyhow::Result<()> {
        let start = self
            .resolver()
            .find_object(name, Some(ObjectType::Commit), true)?
            .with_context(|| format!("{name} does not name a commit"))?;

        let mut writer = self.writer();
        writeln!(writer, "digraph plumblog{{")?;
        writeln!(writer, "  node[shape=rect]")?;

        let mut seen: HashSet<ObjectId> = HashSet::new();
        let mut pending = vec![start];
        while let Some(commit_id) = pending.pop() {
            if !seen.insert(commit_id.clone()) {
                continue;
            }

            let commit = self
                .database()
                .load(&commit_id)?
                .into_commit()
                .with_context(|| format!("{commit_id} is not a commit"))?;

            writeln!(
                writer,
                "  c_{commit_id} [label=\"{}: {}\"]",
                commit_id.to_short_oid(),
                escape_label(commit.short_message())
            )?;
            for parent in commit.parents() {
                writeln!(writer, "  c_{commit_id} -> c_{parent};")?;
            }

            pending.extend(commit.parents().iter().rev().cloned());
        }

        writeln!(writer, "}}")?;

        Ok(())
    }
}

fn escape_label(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
