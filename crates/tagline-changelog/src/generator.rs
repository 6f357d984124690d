//! Changelog generation
//!
//! Assembles the unreleased section and one version per selected tag. Each
//! version's commits are the log of a revision range derived from its
//! position in the selection:
//!
//! - the configured next tag: `previous..HEAD`, or `HEAD` without a previous tag
//! - any other tag followed by an older one: `older..tag`
//! - the last selected tag: `first..tag`, or `tag` when there is no lower bound

use chrono::{DateTime, Utc};
use tagline_core::config::{validate_config, Config, InfoConfig, OptionsConfig};
use tagline_core::error::{ChangelogError, GitError, Result};
use tagline_git::{Commit, GitRepo, LogSource, RevisionRange, Tag, TagReadOptions};
use tracing::{debug, info, instrument};

use crate::extractor::{CommitExtractor, ExtractOptions};
use crate::parser::{CommitParser, ParserConfig};
use crate::processor::{processor_for_style, CommitProcessor};
use crate::selector::{Selection, TagSelector};
use crate::types::{Changelog, Unreleased, Version};

const HEAD: &str = "HEAD";

/// Changelog generator
pub struct ChangelogGenerator<S: LogSource> {
    source: S,
    info: InfoConfig,
    options: OptionsConfig,
    parser: CommitParser,
    selector: TagSelector,
    extractor: CommitExtractor,
    processors: Vec<Box<dyn CommitProcessor>>,
}

impl<S: LogSource> ChangelogGenerator<S> {
    /// Create a generator reading commit logs from `source`.
    ///
    /// The configuration is normalised and validated, and every pattern and
    /// field path is compiled here. The style's link processor, if any, is
    /// installed first.
    pub fn new(config: &Config, source: S) -> Result<Self> {
        let mut config = config.clone();
        config.normalize();
        validate_config(&config)?;

        let parser = CommitParser::new(&ParserConfig::from(&config.options))?;
        let extractor = CommitExtractor::new(&ExtractOptions::from(&config.options))?;

        Ok(Self {
            source,
            processors: processor_for_style(&config).into_iter().collect(),
            info: config.info,
            options: config.options,
            parser,
            selector: TagSelector::new(),
            extractor,
        })
    }

    /// Run `processor` on every parsed commit, after the ones already added
    pub fn with_processor<P: CommitProcessor + 'static>(mut self, processor: P) -> Self {
        self.processors.push(Box::new(processor));
        self
    }

    /// Generate a changelog for `query` over `tags` (newest first).
    #[instrument(skip(self, tags), fields(tag_count = tags.len()))]
    pub fn generate(&self, tags: &[Tag], query: &str) -> Result<Changelog> {
        info!(query, "generating changelog");

        let all_tags = self.with_next_tag(tags)?;
        let selection = self.selector.select(&all_tags, query)?;

        let unreleased = self.read_unreleased(tags)?;
        let versions = self.read_versions(&selection)?;

        if versions.is_empty() {
            return Err(ChangelogError::NoCommitsFound {
                query: query.to_string(),
            }
            .into());
        }

        info!(
            versions = versions.len(),
            unreleased = unreleased.commits.len(),
            "changelog generated"
        );

        Ok(Changelog {
            info: self.info.clone(),
            unreleased,
            versions,
        })
    }

    fn is_next_tag(&self, tag: &Tag) -> bool {
        !self.options.next_tag.is_empty() && tag.name == self.options.next_tag
    }

    /// Prepend the virtual next tag, linked to the newest real tag
    fn with_next_tag(&self, tags: &[Tag]) -> Result<Vec<Tag>> {
        let mut tags = tags.to_vec();
        let name = &self.options.next_tag;
        if name.is_empty() {
            return Ok(tags);
        }
        if tags.iter().any(|t| &t.name == name) {
            return Err(GitError::TagExists(name.clone()).into());
        }

        let mut next = Tag::new(name, name, DateTime::<Utc>::default());
        if let Some(newest) = tags.first_mut() {
            next.previous = Some(newest.related());
            newest.next = Some(next.related());
        }
        debug!(tag = %name, "added next tag");
        tags.insert(0, next);
        Ok(tags)
    }

    fn read_unreleased(&self, tags: &[Tag]) -> Result<Unreleased> {
        let newest = match tags.first() {
            Some(tag) if self.options.next_tag.is_empty() => tag,
            _ => return Ok(Unreleased::default()),
        };

        let commits = self.read_commits(&RevisionRange::between(&newest.name, HEAD))?;
        let extraction = self.extractor.extract(&commits);
        Ok(Unreleased::new(commits, extraction))
    }

    fn read_versions(&self, selection: &Selection) -> Result<Vec<Version>> {
        let mut versions = Vec::with_capacity(selection.tags.len());

        for (i, tag) in selection.tags.iter().enumerate() {
            let range = self.version_range(tag, selection.tags.get(i + 1), &selection.first);
            debug!(tag = %tag.name, %range, "reading version");

            let commits = self.read_commits(&range)?;
            let mut tag = tag.clone();
            if self.is_next_tag(&tag) {
                if let Some(newest) = commits.first() {
                    tag.date = newest.author.date;
                }
            }

            let extraction = self.extractor.extract(&commits);
            versions.push(Version::new(tag, commits, extraction));
        }

        Ok(versions)
    }

    fn version_range(&self, tag: &Tag, older: Option<&Tag>, first: &str) -> RevisionRange {
        if self.is_next_tag(tag) {
            return match &tag.previous {
                Some(previous) => RevisionRange::between(&previous.name, HEAD),
                None => RevisionRange::single(HEAD),
            };
        }

        match older {
            Some(older) => RevisionRange::between(&older.name, &tag.name),
            None if !first.is_empty() => RevisionRange::between(first, &tag.name),
            None => RevisionRange::single(&tag.name),
        }
    }

    fn read_commits(&self, range: &RevisionRange) -> Result<Vec<Commit>> {
        let raw = self.source.log(range, &self.options.paths)?;
        let commits: Vec<Commit> = self
            .parser
            .parse_log(&raw)
            .into_iter()
            .filter_map(|commit| self.process(commit))
            .collect();
        debug!(%range, count = commits.len(), "read commits");
        Ok(commits)
    }

    fn process(&self, commit: Commit) -> Option<Commit> {
        self.processors
            .iter()
            .try_fold(commit, |commit, processor| processor.process(commit))
    }
}

impl ChangelogGenerator<&GitRepo> {
    /// Read tags from the repository and generate a changelog for `query`
    pub fn generate_from_repo(&self, query: &str) -> Result<Changelog> {
        let options = TagReadOptions::from_config(&self.options)?;
        let tags = self.source.read_tags(&options)?;
        self.generate(&tags, query)
    }
}
