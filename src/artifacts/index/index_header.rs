use crate::artifacts::index::{HEADER_SIZE, SIGNATURE, VERSION};
use crate::errors::{Error, Result};
use byteorder::{ByteOrder, NetworkEndian};
use bytes::{BufMut, BytesMut};
use derive_new::new;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexHeader {
    pub marker: String,
    pub version: u32,
    pub entries_count: u32,
}

impl IndexHeader {
    pub fn write_to(&self, bytes: &mut BytesMut) {
        bytes.put_slice(self.marker.as_bytes());
        bytes.put_u32(self.version);
        bytes.put_u32(self.entries_count);
    }

    /// Parse and validate the 12-byte header
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(Error::corruption(format!(
                "index header is {} bytes, expected {HEADER_SIZE}",
                bytes.len()
            )));
        }

        let marker = String::from_utf8_lossy(&bytes[0..4]).into_owned();
        if marker != SIGNATURE {
            return Err(Error::corruption(format!(
                "invalid index signature {marker:?}"
            )));
        }

        let version = NetworkEndian::read_u32(&bytes[4..8]);
        if version != VERSION {
            return Err(Error::UnsupportedFormat(format!(
                "index version {version}, only version {VERSION} is supported"
            )));
        }

        let entries_count = NetworkEndian::read_u32(&bytes[8..12]);

        Ok(IndexHeader {
            marker,
            version,
            entries_count,
        })
    }
}
