use crate::areas::repository::Repository;
use crate::artifacts::objects::object_type::ObjectType;
use std::io::Write;

impl Repository {
    pub fn rev_parse(&self, name: &str, object_type: Option<ObjectType>) -> anyhow::Result<()> {
        match self.resolver().find_object(name, object_type, true)? {
            Some(object_id) => writeln!(self.writer(), "{object_id}")?,
            None => anyhow::bail!(
                "{name} cannot be peeled to a {}",
                object_type.map(|t| t.as_str()).unwrap_or("object")
            ),
        }

        Ok(())
    }
}
