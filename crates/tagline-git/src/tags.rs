//! Tag reading

use std::cmp::Ordering;

use chrono::{DateTime, TimeZone, Utc};
use regex::Regex;
use semver::Version;
use tracing::{debug, info, instrument};

use tagline_core::config::{OptionsConfig, TagSort};
use tagline_core::error::ConfigError;

use crate::repository::{GitRepo, Result};
use crate::types::{RelatedTag, Tag};

/// How tags are filtered and ordered when read
#[derive(Debug, Clone, Default)]
pub struct TagReadOptions {
    /// Tags whose name does not match are skipped
    pub filter: Option<Regex>,
    /// Ordering of the result
    pub sort: TagSort,
}

impl TagReadOptions {
    /// Compile a filter pattern; an empty pattern keeps every tag
    pub fn new(filter_pattern: &str, sort: TagSort) -> std::result::Result<Self, ConfigError> {
        let filter = if filter_pattern.is_empty() {
            None
        } else {
            Some(ConfigError::compile(
                "options.tag_filter_pattern",
                filter_pattern,
            )?)
        };
        Ok(Self { filter, sort })
    }

    pub fn from_config(options: &OptionsConfig) -> std::result::Result<Self, ConfigError> {
        Self::new(&options.tag_filter_pattern, options.tag_sort())
    }
}

impl GitRepo {
    /// Read all tags newest first, with siblings linked
    #[instrument(skip(self, options), fields(sort = ?options.sort))]
    pub fn read_tags(&self, options: &TagReadOptions) -> Result<Vec<Tag>> {
        let names = self.repo.tag_names(None)?;
        let mut tags = Vec::new();

        for name in names.iter().flatten() {
            if let Some(filter) = &options.filter {
                if !filter.is_match(name) {
                    debug!(name, "tag skipped by filter");
                    continue;
                }
            }
            tags.push(self.read_tag(name)?);
        }

        sort_tags(&mut tags, options.sort);
        link_tags(&mut tags);

        info!(count = tags.len(), "read tags");
        Ok(tags)
    }

    fn read_tag(&self, name: &str) -> Result<Tag> {
        let object = self.repo.revparse_single(&format!("refs/tags/{}", name))?;
        let commit = object.peel_to_commit()?;

        // Annotated tags carry their own subject and date
        if let Some(annotated) = object.as_tag() {
            let subject = annotated
                .message()
                .and_then(|m| m.lines().next())
                .unwrap_or_default()
                .trim()
                .to_string();
            let seconds = annotated
                .tagger()
                .map(|t| t.when().seconds())
                .unwrap_or_else(|| commit.time().seconds());
            return Ok(Tag::new(name, subject, timestamp(seconds)));
        }

        Ok(Tag::new(
            name,
            commit.summary().unwrap_or_default(),
            timestamp(commit.time().seconds()),
        ))
    }
}

fn timestamp(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(seconds, 0).single().unwrap_or_default()
}

/// Order tags newest first.
///
/// `Semver` puts tags without a parseable version after the versioned ones;
/// ties and unversioned tags fall back to date order.
pub fn sort_tags(tags: &mut [Tag], sort: TagSort) {
    match sort {
        TagSort::Date => tags.sort_by(|a, b| b.date.cmp(&a.date)),
        TagSort::Semver => tags.sort_by(|a, b| {
            match (extract_version(&a.name), extract_version(&b.name)) {
                (Some(va), Some(vb)) => vb.cmp(&va),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
            .then_with(|| b.date.cmp(&a.date))
        }),
    }
}

/// Link each tag to its neighbours: `next` is the tag before it, `previous` the one after
pub fn link_tags(tags: &mut [Tag]) {
    let related: Vec<RelatedTag> = tags.iter().map(Tag::related).collect();
    for (i, tag) in tags.iter_mut().enumerate() {
        tag.next = i.checked_sub(1).map(|j| related[j].clone());
        tag.previous = related.get(i + 1).cloned();
    }
}

/// Extract a semantic version from tag names such as `v1.0.0`, `1.0.0`,
/// `package@1.0.0` or `package-v1.0.0`
pub fn extract_version(name: &str) -> Option<Version> {
    let name = name.strip_prefix('v').unwrap_or(name);

    if let Some((_, version)) = name.rsplit_once('@') {
        return Version::parse(version.strip_prefix('v').unwrap_or(version)).ok();
    }
    if let Some((_, version)) = name.rsplit_once("-v") {
        if let Ok(version) = Version::parse(version) {
            return Some(version);
        }
    }
    Version::parse(name).ok()
}
