//! Key-value list with message
//!
//! Commits and tags share the same payload layout: a block of header lines
//! followed by a blank line and a free-text message.
//!
//! ```text
//! tree 29ff16c9c14e2652b22f8b78bb08a5a07930c147
//! parent 206941306e8a8af65b66eaaaea388a7ae24d49a0
//! author Thibault Polge <thibault@thb.lt> 1527025023 +0200
//! gpgsig -----BEGIN PGP SIGNATURE-----
//!  iQIzBAABCAAdFiEExwXquOM8bWb4Q2zVGxM2FxoLkGQFAlsEjZQACgkQGxM2FxoL
//!  -----END PGP SIGNATURE-----
//!
//! Create first draft
//! ```
//!
//! A value continues onto the next line when that line starts with a space.
//! Repeated keys keep every value in encounter order.

use crate::errors::{Error, Result};
use bytes::Bytes;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Kvlm {
    headers: Vec<(String, Vec<String>)>,
    message: String,
}

impl Kvlm {
    pub fn parse(raw: &[u8]) -> Result<Self> {
        let mut kvlm = Kvlm::default();
        let mut start = 0;

        loop {
            let space = find_from(raw, start, b' ');
            let newline = find_from(raw, start, b'\n');

            match (space, newline) {
                (Some(space), Some(newline)) if space < newline => {
                    let key = utf8(&raw[start..space], "header key")?;
                    let end = value_end(raw, space + 1)?;
                    let value = utf8(&raw[space + 1..end], "header value")?.replace("\n ", "\n");

                    kvlm.push(key, value)?;
                    start = end + 1;
                }
                (_, Some(newline)) if newline == start => {
                    kvlm.message = utf8(&raw[start + 1..], "message")?.to_string();
                    return Ok(kvlm);
                }
                _ => {
                    return Err(Error::corruption(format!(
                        "malformed header block at byte {start}: expected a blank line before the message"
                    )));
                }
            }
        }
    }

    pub fn serialize(&self) -> Bytes {
        let mut out = String::new();

        for (key, values) in &self.headers {
            for value in values {
                out.push_str(key);
                out.push(' ');
                out.push_str(&value.replace('\n', "\n "));
                out.push('\n');
            }
        }
        out.push('\n');
        out.push_str(&self.message);

        Bytes::from(out)
    }

    /// Append a value under `key`, keeping the key's first-seen position
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let key = key.into();
        if key.is_empty() || key.contains([' ', '\n']) {
            return Err(Error::InvalidArgument(format!(
                "invalid header key {key:?}"
            )));
        }

        match self.headers.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, values)) => values.push(value.into()),
            None => self.headers.push((key, vec![value.into()])),
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> &[String] {
        self.headers
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, values)| values.as_slice())
            .unwrap_or_default()
    }

    pub fn first(&self, key: &str) -> Option<&str> {
        self.get(key).first().map(String::as_str)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }
}

fn find_from(raw: &[u8], start: usize, byte: u8) -> Option<usize> {
    raw[start..]
        .iter()
        .position(|&b| b == byte)
        .map(|offset| start + offset)
}

// Index of the newline terminating a value that begins at `from`
fn value_end(raw: &[u8], from: usize) -> Result<usize> {
    let mut cursor = from;
    loop {
        let newline = find_from(raw, cursor, b'\n').ok_or_else(|| {
            Error::corruption(format!("unterminated header value at byte {from}"))
        })?;

        if raw.get(newline + 1) != Some(&b' ') {
            return Ok(newline);
        }
        cursor = newline + 1;
    }
}

fn utf8<'a>(bytes: &'a [u8], what: &str) -> Result<&'a str> {
    std::str::from_utf8(bytes).map_err(|_| Error::corruption(format!("{what} is not valid UTF-8")))
}
