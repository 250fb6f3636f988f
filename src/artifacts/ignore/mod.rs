//! Ignore rules
//!
//! Rules come from three places:
//!
//! - `<meta>/info/exclude` and the user-level `git/ignore` file apply to the
//!   whole repository (absolute groups)
//! - every staged `.gitignore` applies to its own directory and below
//!   (scoped lists)
//!
//! Within one list the last matching rule wins. Scoped lists are consulted
//! from the path's directory up to the root and any of them ignoring the path
//! settles it; absolute groups are then OR-combined, so a later group cannot
//! un-ignore what an earlier one ignored.

pub mod matcher;
pub mod rule;

/// Name of in-tree ignore files
pub const IGNORE_FILE_NAME: &str = ".gitignore";
