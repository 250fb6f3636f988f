//! Git object types and codecs
//!
//! Every piece of content is stored as an object identified by the SHA-1 of its
//! envelope `<type> <size>\0<payload>`. There are four kinds:
//!
//! - **Blob**: raw file content
//! - **Tree**: directory listing of `(mode, name, id)` leaves
//! - **Commit**: snapshot metadata in the KVLM header format
//! - **Tag**: annotated pointer to another object, also KVLM
//!
//! `tree_builder` folds the flat staging index into a hierarchy of trees.

pub mod blob;
pub mod commit;
pub mod kvlm;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tag;
pub mod tree;
pub mod tree_builder;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of a SHA-1 hash in raw bytes
pub const OBJECT_ID_BYTES: usize = 20;
