//! Field lookup by path
//!
//! Configuration names commit and group fields with dotted paths such as
//! `Scope`, `Author.Name` or `Title`. Paths are resolved once into accessors
//! when an extractor is built; looking a value up afterwards cannot fail on
//! an unknown name, only on a missing optional record (e.g. `Merge.Ref` of a
//! commit that is not a merge).

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use tagline_core::error::ConfigError;
use tagline_git::Commit;

use crate::types::CommitGroup;

/// A value that can be filtered on and ordered.
///
/// `Author.Date` and `Committer.Date` read as `Timestamp`; every other path,
/// header fields included, reads as `Text`. No path reads as `Int` yet; it is
/// reserved for numeric fields and already ordered by [`compare`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderableValue {
    Text(String),
    Int(i64),
    Timestamp(DateTime<Utc>),
}

impl OrderableValue {
    /// The string form, for text values only
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for OrderableValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for OrderableValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<DateTime<Utc>> for OrderableValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

/// Three-way comparison of two values of the same kind; `None` when the kinds differ
pub fn compare(a: &OrderableValue, b: &OrderableValue) -> Option<Ordering> {
    match (a, b) {
        (OrderableValue::Text(a), OrderableValue::Text(b)) => Some(a.cmp(b)),
        (OrderableValue::Int(a), OrderableValue::Int(b)) => Some(a.cmp(b)),
        (OrderableValue::Timestamp(a), OrderableValue::Timestamp(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Ordering used by sorts: a missing value or a kind mismatch compares equal,
/// which leaves the pair in input order
pub fn sort_order(a: Option<OrderableValue>, b: Option<OrderableValue>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => compare(&a, &b).unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    }
}

type CommitAccessor = fn(&Commit) -> Option<OrderableValue>;

fn text(value: &str) -> Option<OrderableValue> {
    Some(OrderableValue::Text(value.to_string()))
}

fn fixed_accessor(path: &str) -> Option<CommitAccessor> {
    let get: CommitAccessor = match path {
        "Hash.Long" => |c| text(&c.hash.long),
        "Hash.Short" => |c| text(&c.hash.short),
        "Author.Name" => |c| text(&c.author.name),
        "Author.Email" => |c| text(&c.author.email),
        "Author.Date" => |c| Some(c.author.date.into()),
        "Committer.Name" => |c| text(&c.committer.name),
        "Committer.Email" => |c| text(&c.committer.email),
        "Committer.Date" => |c| Some(c.committer.date.into()),
        "Merge.Ref" => |c| c.merge.as_ref().and_then(|m| text(&m.reference)),
        "Merge.Source" => |c| c.merge.as_ref().and_then(|m| text(&m.source)),
        "Revert.Header" => |c| c.revert.as_ref().and_then(|r| text(&r.header)),
        "Header" => |c| text(&c.header),
        "Body" => |c| text(&c.body),
        "TrimmedBody" => |c| text(&c.trimmed_body),
        _ => return None,
    };
    Some(get)
}

/// Upper-case the first letter of every path segment (`author.name` -> `Author.Name`)
fn normalize_path(path: &str) -> String {
    path.split('.')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}

#[derive(Clone)]
enum CommitAccess {
    Fixed(CommitAccessor),
    /// A header field assigned from the header pattern
    Header { name: String, normalized: String },
}

impl fmt::Debug for CommitAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(_) => f.write_str("Fixed"),
            Self::Header { name, .. } => f.debug_struct("Header").field("name", name).finish(),
        }
    }
}

/// A resolved commit field path
#[derive(Debug, Clone)]
pub struct CommitField {
    path: String,
    access: CommitAccess,
}

impl CommitField {
    /// Resolve `path`; `setting` names the option it came from for error messages.
    ///
    /// Single-segment paths that are not built-in fields refer to header
    /// fields and read as an empty string when the header did not set them.
    pub fn resolve(setting: &str, path: &str) -> Result<Self, ConfigError> {
        let normalized = normalize_path(path.trim());
        if let Some(get) = fixed_accessor(&normalized) {
            return Ok(Self {
                path: path.to_string(),
                access: CommitAccess::Fixed(get),
            });
        }

        if normalized.is_empty() || normalized.contains('.') {
            return Err(ConfigError::UnknownField {
                field: setting.to_string(),
                path: path.to_string(),
            });
        }

        Ok(Self {
            path: path.to_string(),
            access: CommitAccess::Header {
                name: path.trim().to_string(),
                normalized,
            },
        })
    }

    /// The path as configured
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn get(&self, commit: &Commit) -> Option<OrderableValue> {
        match &self.access {
            CommitAccess::Fixed(get) => get(commit),
            CommitAccess::Header { name, normalized } => text(
                commit
                    .field(name)
                    .or_else(|| commit.field(normalized))
                    .unwrap_or_default(),
            ),
        }
    }
}

/// A resolved commit group field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupField {
    Title,
    RawTitle,
}

impl GroupField {
    pub fn resolve(setting: &str, path: &str) -> Result<Self, ConfigError> {
        match normalize_path(path.trim()).as_str() {
            "Title" => Ok(Self::Title),
            "RawTitle" => Ok(Self::RawTitle),
            _ => Err(ConfigError::UnknownField {
                field: setting.to_string(),
                path: path.to_string(),
            }),
        }
    }

    pub fn get(&self, group: &CommitGroup) -> Option<OrderableValue> {
        match self {
            Self::Title => text(&group.title),
            Self::RawTitle => text(&group.raw_title),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tagline_git::{Merge, Signature};

    fn make_commit() -> Commit {
        let mut commit = Commit {
            header: "feat(core): add X".to_string(),
            author: Signature {
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
                date: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            },
            ..Commit::default()
        };
        commit.fields.insert("Type".to_string(), "feat".to_string());
        commit.fields.insert("Scope".to_string(), "core".to_string());
        commit
    }

    #[test]
    fn test_compare_same_kind() {
        assert_eq!(compare(&"a".into(), &"b".into()), Some(Ordering::Less));
        assert_eq!(compare(&2i64.into(), &1i64.into()), Some(Ordering::Greater));

        let early = Utc.timestamp_opt(0, 0).unwrap();
        let late = Utc.timestamp_opt(10, 0).unwrap();
        assert_eq!(compare(&early.into(), &late.into()), Some(Ordering::Less));
        assert_eq!(compare(&late.into(), &late.into()), Some(Ordering::Equal));
    }

    #[test]
    fn test_compare_mixed_kinds() {
        assert_eq!(compare(&"1".into(), &1i64.into()), None);
        assert_eq!(sort_order(Some("1".into()), Some(1i64.into())), Ordering::Equal);
        assert_eq!(sort_order(None, Some("a".into())), Ordering::Equal);
    }

    #[test]
    fn test_resolve_fixed_paths() {
        let commit = make_commit();

        let name = CommitField::resolve("options.commits.sort_by", "Author.Name").unwrap();
        assert_eq!(name.get(&commit), Some("Alice".into()));

        let date = CommitField::resolve("options.commits.sort_by", "author.date").unwrap();
        assert_eq!(date.get(&commit), Some(OrderableValue::Timestamp(commit.author.date)));
        assert_eq!(date.path(), "author.date");
    }

    #[test]
    fn test_value_kind_per_path() {
        let commit = make_commit();
        let paths = [
            "Hash.Long",
            "Hash.Short",
            "Author.Name",
            "Author.Email",
            "Author.Date",
            "Committer.Name",
            "Committer.Email",
            "Committer.Date",
            "Header",
            "Body",
            "TrimmedBody",
            "Scope",
        ];

        for path in paths {
            let value = CommitField::resolve("options.commits.sort_by", path)
                .unwrap()
                .get(&commit)
                .unwrap();
            match value {
                OrderableValue::Timestamp(_) => assert!(path.ends_with(".Date"), "{}", path),
                OrderableValue::Text(_) => assert!(!path.ends_with(".Date"), "{}", path),
                OrderableValue::Int(_) => panic!("{} read as Int", path),
            }
        }
    }

    #[test]
    fn test_resolve_header_fields() {
        let commit = make_commit();

        let scope = CommitField::resolve("options.commits.sort_by", "Scope").unwrap();
        assert_eq!(scope.get(&commit), Some("core".into()));

        let lower = CommitField::resolve("options.commit_groups.group_by", "type").unwrap();
        assert_eq!(lower.get(&commit), Some("feat".into()));

        let unset = CommitField::resolve("options.commits.sort_by", "JiraIssueID").unwrap();
        assert_eq!(unset.get(&commit), Some("".into()));
    }

    #[test]
    fn test_optional_record_lookup() {
        let mut commit = make_commit();
        let source = CommitField::resolve("options.commits.filters", "Merge.Source").unwrap();
        assert_eq!(source.get(&commit), None);

        commit.merge = Some(Merge {
            reference: "12".to_string(),
            source: "owner/branch".to_string(),
        });
        assert_eq!(source.get(&commit), Some("owner/branch".into()));
    }

    #[test]
    fn test_resolve_unknown_path() {
        let err = CommitField::resolve("options.commits.sort_by", "Author.Phone").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownField { ref path, .. } if path == "Author.Phone"));
        assert!(CommitField::resolve("options.commits.sort_by", "").is_err());
    }

    #[test]
    fn test_resolve_group_field() {
        assert_eq!(
            GroupField::resolve("options.commit_groups.sort_by", "title").unwrap(),
            GroupField::Title
        );
        assert!(GroupField::resolve("options.commit_groups.sort_by", "Commits").is_err());
    }
}
