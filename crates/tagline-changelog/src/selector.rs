//! Tag range selection
//!
//! Queries:
//!
//! - `..`          every tag
//! - `old..new`    from `old` through `new`, inclusive
//! - `tag..`       from `tag` to the end of the list
//! - `..tag`       from `tag` to the end of the list
//! - `tag`         from `tag` to the end of the list
//!
//! Alongside the selected tags, selection yields the name of the tag that
//! bounds the oldest selected version from below ("first"), or an empty
//! string when the oldest version reaches back to the start of history.

use tagline_core::error::ChangelogError;
use tagline_git::Tag;
use tracing::{debug, instrument};

/// Tags picked by a query plus the lower bound tag name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub tags: Vec<Tag>,
    pub first: String,
}

impl Selection {
    fn new(tags: Vec<Tag>, first: impl Into<String>) -> Self {
        Self {
            tags,
            first: first.into(),
        }
    }

    fn names(&self) -> Vec<&str> {
        self.tags.iter().map(|t| t.name.as_str()).collect()
    }
}

/// Interprets range queries over a tag list, keeping the list's order
#[derive(Debug, Clone, Copy, Default)]
pub struct TagSelector;

impl TagSelector {
    pub fn new() -> Self {
        Self
    }

    /// Select tags for `query`.
    ///
    /// An empty tag list selects nothing without error. An empty or
    /// whitespace-only query selects every tag. Tag names are matched
    /// exactly, surrounding whitespace included.
    #[instrument(skip(self, tags), fields(tag_count = tags.len()))]
    pub fn select(&self, tags: &[Tag], query: &str) -> Result<Selection, ChangelogError> {
        if tags.is_empty() {
            return Ok(Selection::default());
        }

        let selection = if query.trim().is_empty() || query == ".." {
            Selection::new(tags.to_vec(), "")
        } else if query.contains("..") {
            let mut tokens = query.split("..");
            let from = tokens.next().unwrap_or_default();
            let to = tokens.next().unwrap_or_default();

            match (from.is_empty(), to.is_empty()) {
                (false, false) => select_range(tags, from, to)?,
                (false, true) => select_from(tags, from)?,
                (true, false) => select_through(tags, to)?,
                (true, true) => Selection::new(tags.to_vec(), ""),
            }
        } else {
            select_through(tags, query)?
        };

        debug!(query, selected = ?selection.names(), first = %selection.first, "selected tags");
        Ok(selection)
    }
}

fn not_found(name: &str) -> ChangelogError {
    ChangelogError::TagNotFound {
        name: name.to_string(),
    }
}

fn position(tags: &[Tag], name: &str) -> Option<usize> {
    tags.iter().position(|t| t.name == name)
}

/// `from..to`: collect from the first `from` until `to` is reached, inclusive
fn select_range(tags: &[Tag], from: &str, to: &str) -> Result<Selection, ChangelogError> {
    if position(tags, to).is_none() {
        return Err(not_found(to));
    }
    let start = position(tags, from).ok_or_else(|| not_found(from))?;

    let mut selected = Vec::new();
    for tag in &tags[start..] {
        selected.push(tag.clone());
        if tag.name == to {
            break;
        }
    }

    // Unreachable: the walk starts at `from`, so at least one tag is collected
    debug_assert!(!selected.is_empty());
    if selected.is_empty() {
        return Err(ChangelogError::NoRelevantTags {
            query: format!("{}..{}", from, to),
        });
    }
    Ok(Selection::new(selected, from))
}

/// `from..`: everything from the first `from` to the end
fn select_from(tags: &[Tag], from: &str) -> Result<Selection, ChangelogError> {
    let start = position(tags, from).ok_or_else(|| not_found(from))?;
    Ok(Selection::new(tags[start..].to_vec(), from))
}

/// `..name` and bare `name`: everything from the first `name` to the end.
///
/// The lower bound is the tag after the last collected one, which is always
/// past the end of the list, so it comes out empty.
fn select_through(tags: &[Tag], name: &str) -> Result<Selection, ChangelogError> {
    let start = position(tags, name).ok_or_else(|| not_found(name))?;

    let mut first = "";
    for i in start..tags.len() {
        first = tags.get(i + 1).map_or("", |t| t.name.as_str());
    }

    Ok(Selection::new(tags[start..].to_vec(), first))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn make_tags(names: &[&str]) -> Vec<Tag> {
        names
            .iter()
            .map(|n| Tag::new(*n, *n, DateTime::<Utc>::default()))
            .collect()
    }

    fn select(names: &[&str], query: &str) -> Result<(Vec<String>, String), ChangelogError> {
        let selection = TagSelector::new().select(&make_tags(names), query)?;
        let selected = selection.tags.iter().map(|t| t.name.clone()).collect();
        Ok((selected, selection.first))
    }

    #[test]
    fn test_range_covers_whole_list() {
        let (tags, first) = select(&["1.0.0", "1.1.0", "2.0.0"], "1.0.0..2.0.0").unwrap();
        assert_eq!(tags, vec!["1.0.0", "1.1.0", "2.0.0"]);
        assert_eq!(first, "1.0.0");
    }

    #[test]
    fn test_double_dot_selects_all() {
        let (tags, first) = select(&["v1", "v2"], "..").unwrap();
        assert_eq!(tags, vec!["v1", "v2"]);
        assert_eq!(first, "");
    }

    #[test]
    fn test_empty_query_selects_all() {
        let (tags, first) = select(&["v2", "v1"], "").unwrap();
        assert_eq!(tags, vec!["v2", "v1"]);
        assert_eq!(first, "");
    }

    #[test]
    fn test_whitespace_query() {
        let (tags, first) = select(&["v2", "v1"], "  ").unwrap();
        assert_eq!(tags, vec!["v2", "v1"]);
        assert_eq!(first, "");

        let err = select(&["v1"], " v1").unwrap_err();
        assert!(matches!(err, ChangelogError::TagNotFound { ref name } if name == " v1"));
    }

    #[test]
    fn test_empty_tag_list() {
        let (tags, first) = select(&[], "v1..v2").unwrap();
        assert!(tags.is_empty());
        assert_eq!(first, "");
    }

    #[test]
    fn test_range_is_contiguous_for_every_pair() {
        let names = ["a", "b", "c", "d", "e"];
        for i in 0..names.len() {
            for j in i..names.len() {
                let query = format!("{}..{}", names[i], names[j]);
                let (tags, first) = select(&names, &query).unwrap();
                let expected: Vec<_> = names[i..=j].iter().map(|s| s.to_string()).collect();
                assert_eq!(tags, expected, "query {}", query);
                assert_eq!(first, names[i]);
            }
        }
    }

    #[test]
    fn test_range_missing_tag() {
        let err = select(&["v3", "v2", "v1"], "v1..v9").unwrap_err();
        assert!(matches!(err, ChangelogError::TagNotFound { ref name } if name == "v9"));

        let err = select(&["v3", "v2", "v1"], "v0..v2").unwrap_err();
        assert!(matches!(err, ChangelogError::TagNotFound { ref name } if name == "v0"));
    }

    #[test]
    fn test_open_ended_from() {
        let (tags, first) = select(&["v3", "v2", "v1"], "v2..").unwrap();
        assert_eq!(tags, vec!["v2", "v1"]);
        assert_eq!(first, "v2");

        assert!(select(&["v3", "v2", "v1"], "v9..").is_err());
    }

    #[test]
    fn test_open_ended_to() {
        let (tags, first) = select(&["v3", "v2", "v1"], "..v2").unwrap();
        assert_eq!(tags, vec!["v2", "v1"]);
        assert_eq!(first, "");

        let err = select(&["v3", "v2", "v1"], "..v9").unwrap_err();
        assert!(matches!(err, ChangelogError::TagNotFound { ref name } if name == "v9"));
    }

    #[test]
    fn test_bare_tag_name() {
        let (tags, first) = select(&["v3", "v2", "v1"], "v3").unwrap();
        assert_eq!(tags, vec!["v3", "v2", "v1"]);
        assert_eq!(first, "");

        assert!(select(&["v3", "v2", "v1"], "v4").is_err());
    }

    #[test]
    fn test_range_single_tag() {
        let (tags, first) = select(&["v3", "v2", "v1"], "v2..v2").unwrap();
        assert_eq!(tags, vec!["v2"]);
        assert_eq!(first, "v2");
    }
}
