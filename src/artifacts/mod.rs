//! Git data structures and algorithms
//!
//! - `ignore`: Ignore rule parsing and matching
//! - `index`: Index/staging area data structures and codec
//! - `objects`: Object types, codecs and the tree builder
//! - `revision`: Resolving names to object ids

pub mod ignore;
pub mod index;
pub mod objects;
pub mod revision;
