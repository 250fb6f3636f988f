//! Annotated tag object
//!
//! Same KVLM layout as a commit. The `object` header names the tagged
//! object and `type` its format.
//!
//! ```text
//! object <sha>
//! type commit
//! tag v1.0
//! tagger <name> <email> <timestamp> <timezone>
//!
//! <tag message>
//! ```

use crate::artifacts::objects::commit::Author;
use crate::artifacts::objects::kvlm::Kvlm;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Error, Result};
use bytes::Bytes;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Tag {
    kvlm: Kvlm,
    object: ObjectId,
}

impl Tag {
    pub fn new(
        object: ObjectId,
        object_type: ObjectType,
        name: &str,
        tagger: &Author,
        message: &str,
    ) -> Result<Self> {
        let mut kvlm = Kvlm::default();
        kvlm.push("object", object.as_ref())?;
        kvlm.push("type", object_type.as_str())?;
        kvlm.push("tag", name)?;
        kvlm.push("tagger", tagger.display())?;
        kvlm.set_message(message);

        Ok(Tag { kvlm, object })
    }

    /// The tagged object
    pub fn object(&self) -> &ObjectId {
        &self.object
    }

    pub fn tagger(&self) -> Result<Author> {
        let line = self
            .kvlm
            .first("tagger")
            .ok_or_else(|| Error::corruption("tag has no tagger header"))?;
        Author::try_from(line)
    }

    pub fn message(&self) -> &str {
        self.kvlm.message()
    }
}

impl Packable for Tag {
    fn serialize(&self) -> Result<Bytes> {
        Ok(self.kvlm.serialize())
    }
}

impl Unpackable for Tag {
    fn deserialize(data: Bytes) -> Result<Self> {
        let kvlm = Kvlm::parse(&data)?;
        let object = kvlm
            .first("object")
            .ok_or_else(|| Error::corruption("tag has no object header"))
            .and_then(|object| {
                ObjectId::try_parse(object.to_string()).map_err(|_| {
                    Error::corruption(format!("tag object is not an object id: {object}"))
                })
            })?;

        Ok(Tag { kvlm, object })
    }
}

impl Object for Tag {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tag
    }
}
