//! Loose object store
//!
//! Objects live under `objects/<2 hex>/<38 hex>`, zlib-compressed. A file at
//! an object's path is never rewritten: content addressing means an existing
//! file already holds the same bytes.

use crate::artifacts::objects::object::{GitObject, Object, split_envelope};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::{Error, IoResultExt, Result};
use bytes::Bytes;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

/// Hash an object and, when a database is given, persist it
///
/// Without a database this is a dry run that only computes the id.
pub fn write_object(object: &impl Object, database: Option<&Database>) -> Result<ObjectId> {
    let envelope = object.envelope()?;
    let object_id = ObjectId::hash(&envelope);

    if let Some(database) = database {
        database.write_envelope(&object_id, envelope)?;
    }

    Ok(object_id)
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn store(&self, object: &impl Object) -> Result<ObjectId> {
        write_object(object, Some(self))
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).is_file()
    }

    pub fn load(&self, object_id: &ObjectId) -> Result<GitObject> {
        let (object_type, payload) = self.load_raw(object_id)?;
        GitObject::parse(object_type, payload)
    }

    /// Type and undecoded payload of an object
    pub fn load_raw(&self, object_id: &ObjectId) -> Result<(ObjectType, Bytes)> {
        let object_path = self.path.join(object_id.to_path());
        let compressed = match std::fs::read(&object_path) {
            Ok(content) => content,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                return Err(Error::NotFound(format!("object {object_id}")));
            }
            Err(error) => return Err(error).with_path(&object_path),
        };

        let raw = Self::decompress(&compressed)
            .map_err(|e| Error::corruption(format!("object {object_id}: {e}")))?;
        tracing::trace!(oid = %object_id, bytes = raw.len(), "loaded object");

        split_envelope(raw)
    }

    pub fn object_type(&self, object_id: &ObjectId) -> Result<ObjectType> {
        let (object_type, _) = self.load_raw(object_id)?;
        Ok(object_type)
    }

    pub fn load_tree(&self, object_id: &ObjectId) -> Result<Tree> {
        match self.load(object_id)? {
            GitObject::Tree(tree) => Ok(tree),
            other => Err(Error::InvalidArgument(format!(
                "{object_id} is a {}, not a tree",
                other.object_type()
            ))),
        }
    }

    /// Find all objects whose id starts with the given lowercase hex prefix
    ///
    /// Prefixes of two or more characters only scan their fan-out directory.
    pub fn find_objects_by_prefix(&self, prefix: &str) -> Result<Vec<ObjectId>> {
        let mut matches = Vec::new();

        let directories = if prefix.len() >= 2 {
            vec![prefix[..2].to_string()]
        } else {
            (0..=255u8).map(|i| format!("{i:02x}")).collect()
        };

        for dir_name in directories {
            let dir_path = self.path.join(&dir_name);
            if !dir_path.is_dir() {
                continue;
            }

            for entry in std::fs::read_dir(&dir_path).with_path(&dir_path)? {
                let entry = entry.with_path(&dir_path)?;
                let full_oid = format!("{}{}", dir_name, entry.file_name().to_string_lossy());

                if full_oid.starts_with(prefix) {
                    // temp files share the directory but never parse as ids
                    if let Ok(oid) = ObjectId::try_parse(full_oid) {
                        matches.push(oid);
                    }
                }
            }
        }

        matches.sort();
        Ok(matches)
    }

    fn write_envelope(&self, object_id: &ObjectId, envelope: Bytes) -> Result<()> {
        let object_path = self.path.join(object_id.to_path());
        if object_path.exists() {
            tracing::trace!(oid = %object_id, "object already stored");
            return Ok(());
        }

        let object_dir = object_path
            .parent()
            .ok_or_else(|| Error::InvalidArgument(format!("invalid object path {}", object_path.display())))?;
        std::fs::create_dir_all(object_dir).with_path(object_dir)?;

        let compressed = Self::compress(&envelope).with_path(&object_path)?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .with_path(&temp_object_path)?;
        file.write_all(&compressed).with_path(&temp_object_path)?;

        // rename into place so readers never observe a partial object
        std::fs::rename(&temp_object_path, &object_path).with_path(&object_path)?;
        tracing::debug!(oid = %object_id, path = %object_path.display(), "stored object");

        Ok(())
    }

    fn compress(data: &[u8]) -> io::Result<Vec<u8>> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(data)?;
        encoder.finish()
    }

    fn decompress(data: &[u8]) -> io::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(data);
        let mut decompressed = Vec::new();
        decoder.read_to_end(&mut decompressed)?;

        Ok(decompressed.into())
    }

    fn generate_temp_name() -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.subsec_nanos())
            .unwrap_or_default();
        format!("tmp-obj-{}-{nanos}", std::process::id())
    }
}

impl From<PathBuf> for Database {
    fn from(path: PathBuf) -> Self {
        Database::new(path.into_boxed_path())
    }
}
