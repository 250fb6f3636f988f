use crate::areas::database::Database;
use crate::areas::refs::{HEAD_REF_NAME, Refs};
use crate::artifacts::objects::object::{GitObject, Object};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::revision::{OID_PREFIX_REGEX, REF_NAMESPACES};
use crate::errors::{Error, Result};
use derive_new::new;
use std::collections::BTreeSet;

#[derive(Debug, new)]
pub struct Resolver<'r> {
    database: &'r Database,
    refs: &'r Refs,
}

impl<'r> Resolver<'r> {
    /// Every object id `name` could refer to
    ///
    /// An empty set means no match; names that are neither `HEAD` nor hex-like
    /// never match.
    pub fn resolve_name(&self, name: &str) -> Result<BTreeSet<ObjectId>> {
        let mut candidates = BTreeSet::new();

        if name.is_empty() {
            return Ok(candidates);
        }

        if name == HEAD_REF_NAME {
            candidates.extend(self.refs.read_head()?);
            return Ok(candidates);
        }

        let oid_prefix = regex::Regex::new(OID_PREFIX_REGEX)
            .map_err(|e| Error::InvalidArgument(format!("object id pattern: {e}")))?;
        if !oid_prefix.is_match(name) {
            tracing::debug!(name, "name is neither HEAD nor hex-like");
            return Ok(candidates);
        }

        let prefix = name.to_ascii_lowercase();
        candidates.extend(self.database.find_objects_by_prefix(&prefix)?);

        for namespace in REF_NAMESPACES {
            candidates.extend(self.refs.resolve_ref(&format!("{namespace}/{name}"))?);
        }

        tracing::trace!(name, candidates = candidates.len(), "resolved name");
        Ok(candidates)
    }

    /// Resolve `name` to exactly one object, optionally of a given type
    ///
    /// With `follow`, tags are peeled to their target and commits to their
    /// tree until `want` is reached. `Ok(None)` means the single candidate
    /// cannot be turned into the wanted type.
    pub fn find_object(
        &self,
        name: &str,
        want: Option<ObjectType>,
        follow: bool,
    ) -> Result<Option<ObjectId>> {
        let mut candidates = self.resolve_name(name)?.into_iter();

        let mut oid = match (candidates.next(), candidates.next()) {
            (None, _) => return Err(Error::NoSuchReference(name.to_string())),
            (Some(oid), None) => oid,
            (Some(first), Some(second)) => {
                let mut all = vec![first, second];
                all.extend(candidates);
                return Err(Error::AmbiguousReference {
                    name: name.to_string(),
                    candidates: all,
                });
            }
        };

        let Some(want) = want else {
            return Ok(Some(oid));
        };

        loop {
            let object = self.database.load(&oid)?;
            if object.object_type() == want {
                return Ok(Some(oid));
            }
            if !follow {
                return Ok(None);
            }

            oid = match object {
                GitObject::Tag(tag) => tag.object().clone(),
                GitObject::Commit(commit) if want == ObjectType::Tree => commit.tree().clone(),
                _ => return Ok(None),
            };
            tracing::trace!(oid = %oid, want = %want, "following to");
        }
    }
}
