//! Error kinds shared by the object store, index, refs and ignore layers
//!
//! Codecs and stores never guess a fallback value: they return one of these
//! variants and let the caller decide whether absence is acceptable. Command
//! implementations wrap them into `anyhow::Error` with extra context.

use crate::artifacts::objects::object_id::ObjectId;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("corrupt data: {0}")]
    Corruption(String),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("ambiguous reference {name}: candidates are:\n{}", format_candidates(.candidates))]
    AmbiguousReference {
        name: String,
        candidates: Vec<ObjectId>,
    },

    #[error("no such reference: {0}")]
    NoSuchReference(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Discriminant of [`Error`] for callers that branch on the failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Corruption,
    UnsupportedFormat,
    AmbiguousReference,
    NoSuchReference,
    InvalidArgument,
    Io,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::Corruption(_) => ErrorKind::Corruption,
            Error::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            Error::AmbiguousReference { .. } => ErrorKind::AmbiguousReference,
            Error::NoSuchReference(_) => ErrorKind::NoSuchReference,
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::Io { .. } => ErrorKind::Io,
        }
    }

    pub fn corruption(message: impl Into<String>) -> Self {
        Error::Corruption(message.into())
    }
}

fn format_candidates(candidates: &[ObjectId]) -> String {
    candidates
        .iter()
        .map(|oid| oid.as_ref())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Attach the offending path to a raw `std::io::Error`.
pub trait IoResultExt<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| Error::Io {
            path: path.into(),
            source,
        })
    }
}
