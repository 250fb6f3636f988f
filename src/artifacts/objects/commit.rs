//! Git commit object
//!
//! Commits are KVLM payloads. The required `tree` header names the snapshot,
//! zero or more `parent` headers link history, and `author` / `committer`
//! carry identity plus timestamp.
//!
//! ## Format
//!
//! ```text
//! tree <tree-sha>
//! parent <parent-sha>
//! author <name> <email> <timestamp> <timezone>
//! committer <name> <email> <timestamp> <timezone>
//!
//! <commit message>
//! ```

use crate::artifacts::objects::kvlm::Kvlm;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Error, Result};
use bytes::Bytes;

/// Author or committer information
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author {
    name: String,
    email: String,
    timestamp: chrono::DateTime<chrono::FixedOffset>,
}

impl Author {
    /// Create a new author stamped with the current local time
    pub fn new(name: String, email: String) -> Self {
        Author {
            name,
            email,
            timestamp: chrono::Local::now().fixed_offset(),
        }
    }

    pub fn new_with_timestamp(
        name: String,
        email: String,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
    ) -> Self {
        Author {
            name,
            email,
            timestamp,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn timestamp(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.timestamp
    }

    /// Format complete author info as stored in the header
    ///
    /// `Name <email> 1527025023 +0200`
    pub fn display(&self) -> String {
        format!(
            "{} <{}> {} {}",
            self.name,
            self.email,
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )
    }

    /// Parse `GIT_AUTHOR_DATE` style values
    ///
    /// Accepts RFC 2822 or `%Y-%m-%d %H:%M:%S %z`.
    pub fn parse_date(date: &str) -> Option<chrono::DateTime<chrono::FixedOffset>> {
        chrono::DateTime::parse_from_rfc2822(date)
            .or_else(|_| chrono::DateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S %z"))
            .ok()
    }
}

impl TryFrom<&str> for Author {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        // "name <email> timestamp timezone", split from the right
        let parts: Vec<&str> = value.rsplitn(3, ' ').collect();
        if parts.len() < 3 {
            return Err(Error::corruption(format!("invalid author line: {value}")));
        }

        let timezone = parts[0];
        let seconds = parts[1]
            .parse::<i64>()
            .map_err(|_| Error::corruption(format!("invalid author timestamp: {}", parts[1])))?;
        let name_email = parts[2];

        let email_start = name_email
            .find('<')
            .ok_or_else(|| Error::corruption("invalid author line: missing '<'"))?;
        let email_end = name_email
            .rfind('>')
            .filter(|&end| end > email_start)
            .ok_or_else(|| Error::corruption("invalid author line: missing '>'"))?;

        let offset = parse_offset(timezone)
            .ok_or_else(|| Error::corruption(format!("invalid author timezone: {timezone}")))?;
        let timestamp = chrono::DateTime::from_timestamp(seconds, 0)
            .ok_or_else(|| Error::corruption(format!("author timestamp out of range: {seconds}")))?
            .with_timezone(&offset);

        Ok(Author {
            name: name_email[..email_start].trim().to_string(),
            email: name_email[email_start + 1..email_end].to_string(),
            timestamp,
        })
    }
}

// "+0530" / "-0800"
fn parse_offset(timezone: &str) -> Option<chrono::FixedOffset> {
    if timezone.len() != 5 || !timezone.is_ascii() {
        return None;
    }
    let (sign, digits) = timezone.split_at(1);
    let hours = digits[..2].parse::<i32>().ok()?;
    let minutes = digits[2..].parse::<i32>().ok()?;
    let seconds = hours * 3600 + minutes * 60;

    match sign {
        "+" => chrono::FixedOffset::east_opt(seconds),
        "-" => chrono::FixedOffset::west_opt(seconds),
        _ => None,
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    kvlm: Kvlm,
    tree: ObjectId,
    parents: Vec<ObjectId>,
}

impl Commit {
    pub fn new(
        tree: ObjectId,
        parents: Vec<ObjectId>,
        author: &Author,
        committer: &Author,
        message: &str,
    ) -> Result<Self> {
        let mut kvlm = Kvlm::default();
        kvlm.push("tree", tree.as_ref())?;
        for parent in &parents {
            kvlm.push("parent", parent.as_ref())?;
        }
        kvlm.push("author", author.display())?;
        kvlm.push("committer", committer.display())?;
        kvlm.set_message(message);

        Ok(Commit {
            kvlm,
            tree,
            parents,
        })
    }

    pub fn tree(&self) -> &ObjectId {
        &self.tree
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn author(&self) -> Result<Author> {
        self.identity("author")
    }

    pub fn committer(&self) -> Result<Author> {
        self.identity("committer")
    }

    pub fn message(&self) -> &str {
        self.kvlm.message()
    }

    /// First line of the message
    pub fn short_message(&self) -> &str {
        self.message().lines().next().unwrap_or_default()
    }

    fn identity(&self, key: &str) -> Result<Author> {
        let line = self
            .kvlm
            .first(key)
            .ok_or_else(|| Error::corruption(format!("commit has no {key} header")))?;
        Author::try_from(line)
    }
}

impl Packable for Commit {
    fn serialize(&self) -> Result<Bytes> {
        Ok(self.kvlm.serialize())
    }
}

impl Unpackable for Commit {
    fn deserialize(data: Bytes) -> Result<Self> {
        let kvlm = Kvlm::parse(&data)?;

        let tree = match kvlm.get("tree") {
            [tree] => ObjectId::try_parse(tree.clone())
                .map_err(|_| Error::corruption(format!("commit tree is not an object id: {tree}")))?,
            trees => {
                return Err(Error::corruption(format!(
                    "commit must carry exactly one tree header, found {}",
                    trees.len()
                )));
            }
        };
        let parents = kvlm
            .get("parent")
            .iter()
            .map(|parent| {
                ObjectId::try_parse(parent.clone()).map_err(|_| {
                    Error::corruption(format!("commit parent is not an object id: {parent}"))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Commit {
            kvlm,
            tree,
            parents,
        })
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}
