//! Turning user-supplied names into object ids
//!
//! Names are either `HEAD` or a 4-40 character hex string. A hex name is
//! matched against stored object ids by prefix and also tried as a tag,
//! branch and remote-tracking branch.

pub mod resolver;

/// Abbreviated or full object id
pub const OID_PREFIX_REGEX: &str = r"^[0-9A-Fa-f]{4,40}$";

/// Ref namespaces a hex-like name is also looked up in, in order
pub const REF_NAMESPACES: [&str; 3] = ["refs/tags", "refs/heads", "refs/remotes"];
