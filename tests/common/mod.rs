#![allow(dead_code)]

pub mod command;

/// Ids the reference implementation assigns to the fixtures below
pub const HI_BLOB: &str = "45b983be36b73c0788dc9cbcb76cbb80fc7bb057";
pub const BYE_BLOB: &str = "b023018cabc396e7692c70bbf5784a93d3f738ab";
pub const DIR_TREE: &str = "c9db045e560dbacb78b6ca99470bca14bdb06221";
pub const ROOT_TREE: &str = "2ca877beb35d25011aef8ba8d7ee26da1bf63478";
pub const EMPTY_TREE: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";
/// `initial` on top of nothing, see [`command::plumb_commit`]
pub const ROOT_COMMIT: &str = "ac3c3d8645201bc96f41d789d4e3de8ca832daca";
/// `second`, adding `c.txt` with `hi\n`
pub const SECOND_COMMIT: &str = "78ba91073455564d35f920c4201b3e2f540a7b48";

pub fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}
