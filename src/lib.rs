//! A content-addressable object store and staging index that reads and
//! writes the git on-disk format.
//!
//! - `areas`: stateful parts of a repository (object database, index, refs,
//!   config, working tree)
//! - `artifacts`: object and index codecs, tree building, name resolution and
//!   ignore rules
//! - `commands`: plumbing and porcelain commands on [`areas::repository::Repository`]
//! - `errors`: the error type shared by everything below the command layer

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
