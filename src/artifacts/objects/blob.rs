//! Git blob object
//!
//! Blobs store file content. They carry no metadata such as file name or
//! permissions (those live in trees and the index), and their codec is the
//! identity function.

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::Result;
use bytes::Bytes;
use derive_new::new;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    #[new(into)]
    data: Bytes,
}

impl Blob {
    pub fn data(&self) -> &Bytes {
        &self.data
    }
}

impl Packable for Blob {
    fn serialize(&self) -> Result<Bytes> {
        Ok(self.data.clone())
    }
}

impl Unpackable for Blob {
    fn deserialize(data: Bytes) -> Result<Self> {
        Ok(Self { data })
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }
}
