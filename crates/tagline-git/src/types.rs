//! Git types
//!
//! Commits are created once by the commit parser and are read-only afterwards,
//! apart from processors that rewrite text fields before extraction.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Long and short commit identifiers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hash {
    /// Full hash
    pub long: String,
    /// Abbreviated hash
    pub short: String,
}

/// Author or committer identity with a timestamp
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Name
    pub name: String,
    /// Email address
    pub email: String,
    /// Timestamp; the epoch when the raw value was unparsable
    pub date: DateTime<Utc>,
}

/// Merge information, present when the header matched the merge pattern
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Merge {
    /// Pull request reference (e.g. `123`)
    #[serde(rename = "ref")]
    pub reference: String,
    /// Source branch (e.g. `owner/branch`)
    pub source: String,
}

/// Revert information, present when the header matched the revert pattern
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revert {
    /// Header of the reverted commit
    pub header: String,
}

/// An issue or pull request reference found in a header or body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ref {
    /// Action keyword as written (e.g. `Closes`), empty for bare references
    pub action: String,
    /// Reference number (e.g. `123`)
    #[serde(rename = "ref")]
    pub reference: String,
    /// Repository the reference points into (e.g. `owner/repo`), may be empty
    pub source: String,
}

/// A keyword-triggered annotation such as a breaking change note
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Keyword as written (e.g. `BREAKING CHANGE`)
    pub title: String,
    /// Note content, possibly spanning several lines
    pub body: String,
}

/// Co-author or sign-off identity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Name
    pub name: String,
    /// Email address
    pub email: String,
}

/// A parsed commit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Commit hashes
    pub hash: Hash,
    /// Author
    pub author: Signature,
    /// Committer
    pub committer: Signature,
    /// Set for merge commits
    pub merge: Option<Merge>,
    /// Set for revert commits
    pub revert: Option<Revert>,
    /// Issue references, unique on all three fields
    pub refs: Vec<Ref>,
    /// Notes in body order
    pub notes: Vec<Note>,
    /// Mentioned user names, unique, in first-seen order
    pub mentions: Vec<String>,
    /// `Co-authored-by` contacts
    pub co_authors: Vec<Contact>,
    /// `Signed-off-by` contacts
    pub signers: Vec<Contact>,
    /// Raw header line
    pub header: String,
    /// Header fields assigned from the header pattern (e.g. `Type`, `Scope`, `Subject`)
    pub fields: BTreeMap<String, String>,
    /// Raw body
    pub body: String,
    /// Body without notes, references, mentions, co-authors and sign-offs
    pub trimmed_body: String,
}

impl Commit {
    /// Get a header field by its configured name
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// The `Type` header field, or an empty string
    pub fn commit_type(&self) -> &str {
        self.field("Type").unwrap_or_default()
    }

    /// The `Scope` header field, or an empty string
    pub fn scope(&self) -> &str {
        self.field("Scope").unwrap_or_default()
    }

    /// The `Subject` header field, or an empty string
    pub fn subject(&self) -> &str {
        self.field("Subject").unwrap_or_default()
    }

    /// Whether this is a merge commit
    pub fn is_merge(&self) -> bool {
        self.merge.is_some()
    }

    /// Whether this is a revert commit
    pub fn is_revert(&self) -> bool {
        self.revert.is_some()
    }
}

/// Lightweight sibling reference held by a [`Tag`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedTag {
    /// Tag name
    pub name: String,
    /// Tag subject
    pub subject: String,
    /// Tag date
    pub date: DateTime<Utc>,
}

/// Information about a git tag
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name
    pub name: String,
    /// Tag subject (annotation or commit summary)
    pub subject: String,
    /// Tag date
    pub date: DateTime<Utc>,
    /// The tag that follows this one in reader order (newer)
    pub next: Option<RelatedTag>,
    /// The tag that precedes this one in reader order (older)
    pub previous: Option<RelatedTag>,
}

impl Tag {
    /// Create a new Tag without siblings
    pub fn new(name: impl Into<String>, subject: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            subject: subject.into(),
            date,
            next: None,
            previous: None,
        }
    }

    /// A sibling reference to this tag
    pub fn related(&self) -> RelatedTag {
        RelatedTag {
            name: self.name.clone(),
            subject: self.subject.clone(),
            date: self.date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_field_accessors() {
        let mut commit = Commit::default();
        commit.fields.insert("Type".to_string(), "feat".to_string());
        commit.fields.insert("Subject".to_string(), "add X".to_string());

        assert_eq!(commit.commit_type(), "feat");
        assert_eq!(commit.scope(), "");
        assert_eq!(commit.subject(), "add X");
        assert_eq!(commit.field("JiraIssueID"), None);
    }

    #[test]
    fn test_related_tag() {
        let tag = Tag::new("v1.0.0", "Release 1.0.0", DateTime::<Utc>::default());
        let related = tag.related();
        assert_eq!(related.name, "v1.0.0");
        assert_eq!(related.subject, "Release 1.0.0");
        assert!(tag.next.is_none() && tag.previous.is_none());
    }
}
