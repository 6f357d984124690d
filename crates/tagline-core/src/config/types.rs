//! Configuration types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Main configuration for tagline
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Hosting style used for presets and link processing
    pub style: Style,

    /// Changelog metadata
    pub info: InfoConfig,

    /// Extraction options
    pub options: OptionsConfig,
}

/// Repository hosting style
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// No hosting-specific behaviour
    #[default]
    None,
    /// GitHub
    Github,
    /// GitLab
    Gitlab,
    /// Bitbucket
    Bitbucket,
}

/// Metadata handed through to the templating layer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InfoConfig {
    /// Title of the changelog
    pub title: String,

    /// URL of the repository, without a trailing slash
    pub repository_url: String,
}

/// How the tag reader orders tags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagSort {
    /// Newest tag date first
    #[default]
    Date,
    /// Highest semantic version first
    Semver,
}

/// Options controlling parsing, selection and grouping
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionsConfig {
    /// Treat unreleased commits as this tag (experimental)
    pub next_tag: String,

    /// Regular expression tags must match to be considered
    pub tag_filter_pattern: String,

    /// Tag ordering, `date` or `semver`
    pub sort: String,

    /// Compare filter values and group titles case-insensitively
    pub no_case_sensitive: bool,

    /// Only include commits touching these paths
    pub paths: Vec<String>,

    /// Commit filtering and ordering
    pub commits: CommitOptions,

    /// Commit grouping
    pub commit_groups: CommitGroupOptions,

    /// Header pattern
    pub header: PatternOptions,

    /// Issue reference prefixes
    pub issues: IssueOptions,

    /// Reference actions
    pub refs: RefOptions,

    /// Merge commit pattern
    pub merges: PatternOptions,

    /// Revert commit pattern
    pub reverts: PatternOptions,

    /// Note keywords
    pub notes: NoteOptions,
}

impl OptionsConfig {
    /// The normalised tag ordering
    pub fn tag_sort(&self) -> TagSort {
        if self.sort.eq_ignore_ascii_case("semver") {
            TagSort::Semver
        } else {
            TagSort::Date
        }
    }
}

/// Commit filtering and ordering
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitOptions {
    /// Field path -> allowed values; an empty list imposes no constraint
    pub filters: HashMap<String, Vec<String>>,

    /// Field path used to order commits inside a group (e.g. `Scope`)
    pub sort_by: String,
}

/// Commit grouping
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitGroupOptions {
    /// Field path commits are grouped by (e.g. `Type`)
    pub group_by: String,

    /// Group field used for ordering, or `Custom` to use `title_order`
    pub sort_by: String,

    /// Raw titles in display order, used when `sort_by` is `Custom`
    pub title_order: Vec<String>,

    /// Raw title -> display title
    pub title_maps: HashMap<String, String>,
}

/// A pattern and the names its capture groups are assigned to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternOptions {
    /// Regular expression
    pub pattern: String,

    /// Field name for each capture group, in order
    pub pattern_maps: Vec<String>,
}

impl PatternOptions {
    /// Create pattern options
    pub fn new(pattern: impl Into<String>, maps: &[&str]) -> Self {
        Self {
            pattern: pattern.into(),
            pattern_maps: maps.iter().map(|m| m.to_string()).collect(),
        }
    }

    /// Whether neither a pattern nor maps were configured
    pub fn is_unset(&self) -> bool {
        self.pattern.is_empty() && self.pattern_maps.is_empty()
    }
}

/// Issue reference prefixes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueOptions {
    /// Prefixes such as `#` or `gh-`
    pub prefix: Vec<String>,
}

/// Reference actions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RefOptions {
    /// Words such as `closes` or `fixes`
    pub actions: Vec<String>,
}

/// Note keywords
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteOptions {
    /// Keywords such as `BREAKING CHANGE`
    pub keywords: Vec<String>,
}
