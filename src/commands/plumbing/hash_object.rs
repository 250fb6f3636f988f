use crate::areas::database::write_object;
use crate::areas::repository::Repository;
use crate::artifacts::objects::object::GitObject;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Print the id `file` would have as an object of `object_type`
    ///
    /// The payload has to parse as that type. With `write` the object is also
    /// stored, which requires an initialized repository.
    pub fn hash_object(
        &self,
        file: &Path,
        object_type: ObjectType,
        write: bool,
    ) -> anyhow::Result<()> {
        let data = std::fs::read(file)
            .with_context(|| format!("failed to read {}", file.display()))?;
        let object = GitObject::parse(object_type, Bytes::from(data))
            .with_context(|| format!("{} is not a valid {object_type} object", file.display()))?;

        let database = if write {
            if !self.database().objects_path().is_dir() {
                anyhow::bail!("not a repository: {}", self.path().display());
            }
            Some(self.database())
        } else {
            None
        };

        let object_id = write_object(&object, database)?;
        writeln!(self.writer(), "{object_id}")?;

        Ok(())
    }
}
