//! Object identifier (SHA-1 hash)
//!
//! Object IDs are 40-character lowercase hexadecimal strings. They are derived
//! from the object's envelope bytes, so identical content always maps to the
//! same id.
//!
//! ## Storage
//!
//! Loose objects live at `.git/objects/<first-2-chars>/<remaining-38-chars>`

use crate::artifacts::objects::{OBJECT_ID_BYTES, OBJECT_ID_LENGTH};
use crate::errors::{Error, Result};
use sha1::{Digest, Sha1};
use std::path::PathBuf;
use std::str::FromStr;

/// Git object identifier (SHA-1 hash)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// Accepts upper- or lowercase hex and stores it lowercased.
    pub fn try_parse(id: String) -> Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(Error::InvalidArgument(format!(
                "invalid object id length {}: {}",
                id.len(),
                id
            )));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidArgument(format!(
                "invalid object id characters: {id}"
            )));
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Hash an arbitrary byte string into an id
    pub fn hash(data: &[u8]) -> Self {
        let digest = Sha1::digest(data);
        Self(hex::encode(digest))
    }

    /// Build an id from its 20-byte binary form (tree leaves, index entries)
    pub fn from_raw_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != OBJECT_ID_BYTES {
            return Err(Error::corruption(format!(
                "expected {} raw id bytes, found {}",
                OBJECT_ID_BYTES,
                bytes.len()
            )));
        }
        Ok(Self(hex::encode(bytes)))
    }

    /// Binary form of the id (20 bytes)
    pub fn to_raw_bytes(&self) -> Result<[u8; OBJECT_ID_BYTES]> {
        let mut raw = [0u8; OBJECT_ID_BYTES];
        hex::decode_to_slice(&self.0, &mut raw)
            .map_err(|e| Error::InvalidArgument(format!("object id {}: {e}", self.0)))?;
        Ok(raw)
    }

    /// Split the hash as `XX/YYYYYY...` where XX is the first 2 chars
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }

    /// First 7 characters of the hash
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

impl FromStr for ObjectId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::try_parse(s.to_string())
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
