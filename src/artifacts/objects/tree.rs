//! Git tree object
//!
//! Trees are directory snapshots: a list of leaves, each naming a blob,
//! a subtree or a gitlink.
//!
//! ## Format
//!
//! Each leaf is `<mode> <name>\0<20-byte-sha1>`, leaves are concatenated
//! without separators.
//!
//! ## Ordering
//!
//! Leaves are written sorted by name, where a directory compares as if its
//! name ended in `/`. So `foo.txt` < `foo` (dir) < `foo0`, because
//! `.` < `/` < `0`.

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::OBJECT_ID_BYTES;
use crate::errors::{Error, Result};
use bytes::{BufMut, Bytes, BytesMut};
use derive_new::new;
use std::cmp::Ordering;

pub const DIRECTORY_MODE: &str = "40000";

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeLeaf {
    /// Octal mode as written on disk; 5 digits for directories, 6 otherwise
    pub mode: String,
    pub name: String,
    pub oid: ObjectId,
}

impl TreeLeaf {
    /// Mode zero-padded to 6 digits
    pub fn normalized_mode(&self) -> String {
        format!("{:0>6}", self.mode)
    }

    pub fn is_tree(&self) -> bool {
        self.normalized_mode().starts_with("04")
    }

    /// Object format the mode points at, if recognized
    pub fn object_type(&self) -> Option<ObjectType> {
        match &self.normalized_mode()[..2] {
            "04" => Some(ObjectType::Tree),
            "10" | "12" => Some(ObjectType::Blob),
            "16" => Some(ObjectType::Commit),
            _ => None,
        }
    }

    fn sort_key(&self) -> Vec<u8> {
        let mut key = self.name.as_bytes().to_vec();
        if self.is_tree() {
            key.push(b'/');
        }
        key
    }
}

/// Canonical leaf order
pub fn compare_leaves(a: &TreeLeaf, b: &TreeLeaf) -> Ordering {
    a.sort_key().cmp(&b.sort_key())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    leaves: Vec<TreeLeaf>,
}

impl Tree {
    pub fn new(leaves: Vec<TreeLeaf>) -> Self {
        Tree { leaves }
    }

    /// Leaves in the order they were read or inserted
    pub fn leaves(&self) -> &[TreeLeaf] {
        &self.leaves
    }

    pub fn sorted_leaves(&self) -> Vec<&TreeLeaf> {
        let mut leaves = self.leaves.iter().collect::<Vec<_>>();
        leaves.sort_by(|a, b| compare_leaves(a, b));
        leaves
    }
}

impl Packable for Tree {
    fn serialize(&self) -> Result<Bytes> {
        let mut bytes = BytesMut::new();

        for leaf in self.sorted_leaves() {
            bytes.put_slice(leaf.mode.as_bytes());
            bytes.put_u8(b' ');
            bytes.put_slice(leaf.name.as_bytes());
            bytes.put_u8(0);
            bytes.put_slice(&leaf.oid.to_raw_bytes()?);
        }

        Ok(bytes.freeze())
    }
}

impl Unpackable for Tree {
    fn deserialize(data: Bytes) -> Result<Self> {
        let mut leaves = Vec::new();
        let mut position = 0;

        while position < data.len() {
            let space = data[position..]
                .iter()
                .position(|&b| b == b' ')
                .map(|offset| position + offset)
                .ok_or_else(|| {
                    Error::corruption(format!("tree leaf at byte {position}: missing mode terminator"))
                })?;
            let mode = std::str::from_utf8(&data[position..space])
                .ok()
                .filter(|mode| !mode.is_empty() && mode.bytes().all(|b| (b'0'..=b'7').contains(&b)))
                .ok_or_else(|| {
                    Error::corruption(format!("tree leaf at byte {position}: invalid mode"))
                })?;
            if mode.len() != 5 && mode.len() != 6 {
                tracing::warn!(mode, "tree leaf mode has unexpected width");
            }

            let nul = data[space + 1..]
                .iter()
                .position(|&b| b == 0)
                .map(|offset| space + 1 + offset)
                .ok_or_else(|| {
                    Error::corruption(format!("tree leaf at byte {position}: missing name terminator"))
                })?;
            let name = std::str::from_utf8(&data[space + 1..nul]).map_err(|_| {
                Error::corruption(format!("tree leaf at byte {position}: name is not UTF-8"))
            })?;

            let id_end = nul + 1 + OBJECT_ID_BYTES;
            if id_end > data.len() {
                return Err(Error::corruption(format!(
                    "tree leaf {name:?}: truncated object id"
                )));
            }
            let oid = ObjectId::from_raw_bytes(&data[nul + 1..id_end])?;

            leaves.push(TreeLeaf::new(mode.to_string(), name.to_string(), oid));
            position = id_end;
        }

        Ok(Tree { leaves })
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }
}
