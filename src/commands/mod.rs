//! Command implementations
//!
//! Commands are methods on [`Repository`](crate::areas::repository::Repository)
//! that write their output to the repository's writer, split the way git
//! splits them:
//!
//! - `plumbing`: Low-level commands for direct object, index and ref access
//! - `porcelain`: User-facing commands for version control workflows
//!
//! Library errors are wrapped into `anyhow::Error` here, with the context a
//! user needs to act on them.

pub mod plumbing;
pub mod porcelain;
