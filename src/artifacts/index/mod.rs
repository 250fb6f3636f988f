//! Git index file format
//!
//! The index (also called staging area or cache) lists the files that make up
//! the next snapshot, together with enough file-system metadata to notice
//! when a working-tree file changed.
//!
//! ## File Format (Version 2)
//!
//! ```text
//! Header (12 bytes):
//!   - Signature: "DIRC" (4 bytes)
//!   - Version: 2 (4 bytes)
//!   - Entry count (4 bytes)
//!
//! Entries (variable length):
//!   - 62-byte fixed block, path, NUL
//!   - each entry zero-padded to a multiple of 8 bytes
//!
//! Checksum (20 bytes):
//!   - SHA-1 hash of all preceding bytes
//! ```
//!
//! All integers are big-endian.

pub mod checksum;
pub mod codec;
pub mod entry_mode;
pub mod file_stat;
pub mod index_entry;
pub mod index_header;

/// Size of SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20;

/// Size of index header in bytes
pub const HEADER_SIZE: usize = 12; // 4 bytes for marker, 4 for version, 4 for entries_count

/// Magic signature identifying index files
pub const SIGNATURE: &str = "DIRC";

/// Index file format version
pub const VERSION: u32 = 2;

/// Size of the fixed part of an entry, before the path
pub const ENTRY_FIXED_SIZE: usize = 62;

/// Block size for entry alignment
pub const ENTRY_BLOCK: usize = 8;

/// Name-length sentinel: the path is 4095 bytes or longer and NUL-terminated
pub const NAME_LENGTH_MASK: u16 = 0xFFF;
