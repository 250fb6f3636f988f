//! Plumbing commands (low-level operations)
//!
//! ## Commands
//!
//! - `hash-object`: Compute an object id and optionally store the object
//! - `cat-file`: Print the payload of an object
//! - `ls-tree`: List the contents of a tree
//! - `write-tree`: Store the index as a tree hierarchy
//! - `rev-parse`: Resolve a name to an object id
//! - `ls-files`: List staged entries
//! - `show-ref`: List references
//! - `check-ignore`: Report which paths the ignore rules exclude

pub mod cat_file;
pub mod check_ignore;
pub mod hash_object;
pub mod ls_files;
pub mod ls_tree;
pub mod rev_parse;
pub mod show_ref;
pub mod write_tree;
