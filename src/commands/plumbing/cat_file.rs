use crate::areas::repository::Repository;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use std::io::Write;

impl Repository {
    /// Write the raw payload of `name`, peeled to `object_type`
    pub fn cat_file(&self, object_type: ObjectType, name: &str) -> anyhow::Result<()> {
        let object_id = self
            .resolver()
            .find_object(name, Some(object_type), true)?
            .with_context(|| format!("{name} does not name a {object_type}"))?;

        let (_, payload) = self
            .database()
            .load_raw(&object_id)
            .with_context(|| format!("failed to read object {object_id}"))?;
        self.writer().write_all(&payload)?;

        Ok(())
    }
}
