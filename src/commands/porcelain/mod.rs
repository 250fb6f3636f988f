//! Porcelain commands (user-facing operations)
//!
//! Porcelain commands compose the object store, index and refs into the
//! everyday workflow.
//!
//! ## Commands
//!
//! - `init`: Initialize a new repository
//! - `add`: Stage files for commit
//! - `rm`: Unstage files and delete them from the working tree
//! - `status`: Compare HEAD, the index and the working tree
//! - `commit`: Create a new commit from the index
//! - `log`: Render commit ancestry as a Graphviz graph
//! - `checkout`: Materialize a commit into an empty directory

pub mod add;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod rm;
pub mod status;
