use crate::artifacts::index::CHECKSUM_SIZE;
use crate::errors::{Error, Result};
use bytes::{BufMut, BytesMut};
use sha1::{Digest, Sha1};

/// Cursor over raw index bytes that checks the SHA-1 trailer once the
/// entries are consumed
#[derive(Debug)]
pub struct Checksum<'d> {
    data: &'d [u8],
    position: usize,
}

impl<'d> Checksum<'d> {
    pub fn new(data: &'d [u8]) -> Self {
        Checksum { data, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn read(&mut self, size: usize) -> Result<&'d [u8]> {
        let end = self.position + size;
        if end > self.data.len() {
            return Err(Error::corruption(format!(
                "unexpected end of index at byte {}, wanted {size} more",
                self.position
            )));
        }

        let chunk = &self.data[self.position..end];
        self.position = end;
        Ok(chunk)
    }

    /// Read up to (not including) the next NUL byte, consuming the NUL
    pub fn read_until_nul(&mut self) -> Result<&'d [u8]> {
        let length = self.data[self.position..]
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| {
                Error::corruption(format!(
                    "unterminated path starting at byte {}",
                    self.position
                ))
            })?;

        let chunk = self.read(length)?;
        self.position += 1;
        Ok(chunk)
    }

    /// Check whatever follows the entries
    ///
    /// Nothing at all is accepted. Otherwise the last 20 bytes must be the
    /// SHA-1 of everything before them; extension blocks in between are
    /// covered by the hash and skipped.
    pub fn verify(&self) -> Result<()> {
        let remaining = self.data.len() - self.position;
        if remaining == 0 {
            return Ok(());
        }
        if remaining < CHECKSUM_SIZE {
            return Err(Error::corruption(format!(
                "index has {remaining} trailing bytes, too short for a checksum"
            )));
        }

        let (content, expected) = self.data.split_at(self.data.len() - CHECKSUM_SIZE);
        let actual = Sha1::digest(content);
        if actual.as_slice() != expected {
            return Err(Error::corruption(
                "index checksum does not match value stored on disk",
            ));
        }

        Ok(())
    }
}

/// Append the SHA-1 of everything written so far
pub fn append_checksum(bytes: &mut BytesMut) {
    let checksum = Sha1::digest(&bytes[..]);
    bytes.put_slice(checksum.as_slice());
}
