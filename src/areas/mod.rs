//! Core repository components
//!
//! This module contains the stateful building blocks of a repository:
//!
//! - `config`: TOML repository and user configuration
//! - `database`: Object database for storing blobs, trees, commits and tags
//! - `index`: Staging area (index/cache) for tracking file changes
//! - `refs`: Reference management (branches, HEAD, tags)
//! - `repository`: Handle tying the other areas together
//! - `workspace`: Working directory file system operations

pub mod config;
pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
