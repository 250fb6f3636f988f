use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tag::Tag;
use crate::artifacts::objects::tree::Tree;
use crate::errors::{Error, Result};
use bytes::{BufMut, Bytes, BytesMut};

/// Encode an object's payload (without the envelope header)
pub trait Packable {
    fn serialize(&self) -> Result<Bytes>;
}

/// Decode an object's payload (the envelope header is already stripped)
pub trait Unpackable {
    fn deserialize(data: Bytes) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    /// Full `"<type> <len>\0<payload>"` byte string the id is computed over
    fn envelope(&self) -> Result<Bytes> {
        let payload = self.serialize()?;
        Ok(envelope(self.object_type(), &payload))
    }

    fn object_id(&self) -> Result<ObjectId> {
        Ok(ObjectId::hash(&self.envelope()?))
    }
}

pub fn envelope(object_type: ObjectType, payload: &[u8]) -> Bytes {
    let header = format!("{} {}\0", object_type.as_str(), payload.len());

    let mut bytes = BytesMut::with_capacity(header.len() + payload.len());
    bytes.put_slice(header.as_bytes());
    bytes.put_slice(payload);
    bytes.freeze()
}

/// Split a decompressed envelope into its type and payload
///
/// The declared length must equal the number of payload bytes.
pub fn split_envelope(raw: Bytes) -> Result<(ObjectType, Bytes)> {
    let space = raw
        .iter()
        .position(|&b| b == b' ')
        .ok_or_else(|| Error::corruption("malformed object header: missing type separator"))?;
    let nul = raw
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| Error::corruption("malformed object header: missing NUL terminator"))?;
    if nul < space {
        return Err(Error::corruption(
            "malformed object header: NUL precedes type separator",
        ));
    }

    let format = std::str::from_utf8(&raw[..space])
        .map_err(|_| Error::corruption("malformed object header: non-UTF-8 type"))?;
    let object_type = ObjectType::try_from(format)?;

    let declared = std::str::from_utf8(&raw[space + 1..nul])
        .ok()
        .and_then(|size| size.parse::<usize>().ok())
        .ok_or_else(|| Error::corruption("malformed object header: invalid length"))?;
    let payload = raw.slice(nul + 1..);
    if declared != payload.len() {
        return Err(Error::corruption(format!(
            "bad object length: header declares {declared} bytes, found {}",
            payload.len()
        )));
    }

    Ok((object_type, payload))
}

/// Closed set of object variants, each carrying its own parsed fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitObject {
    Blob(Blob),
    Tree(Tree),
    Commit(Commit),
    Tag(Tag),
}

impl GitObject {
    pub fn parse(object_type: ObjectType, payload: Bytes) -> Result<Self> {
        Ok(match object_type {
            ObjectType::Blob => GitObject::Blob(Blob::deserialize(payload)?),
            ObjectType::Tree => GitObject::Tree(Tree::deserialize(payload)?),
            ObjectType::Commit => GitObject::Commit(Commit::deserialize(payload)?),
            ObjectType::Tag => GitObject::Tag(Tag::deserialize(payload)?),
        })
    }

    pub fn into_tree(self) -> Option<Tree> {
        match self {
            GitObject::Tree(tree) => Some(tree),
            _ => None,
        }
    }

    pub fn into_commit(self) -> Option<Commit> {
        match self {
            GitObject::Commit(commit) => Some(commit),
            _ => None,
        }
    }
}

impl Packable for GitObject {
    fn serialize(&self) -> Result<Bytes> {
        match self {
            GitObject::Blob(blob) => blob.serialize(),
            GitObject::Tree(tree) => tree.serialize(),
            GitObject::Commit(commit) => commit.serialize(),
            GitObject::Tag(tag) => tag.serialize(),
        }
    }
}

impl Object for GitObject {
    fn object_type(&self) -> ObjectType {
        match self {
            GitObject::Blob(_) => ObjectType::Blob,
            GitObject::Tree(_) => ObjectType::Tree,
            GitObject::Commit(_) => ObjectType::Commit,
            GitObject::Tag(_) => ObjectType::Tag,
        }
    }
}
