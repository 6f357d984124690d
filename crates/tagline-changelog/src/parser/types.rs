//! Parser configuration types

use tagline_core::config::{OptionsConfig, PatternOptions};

/// Configuration for the commit parser
#[derive(Debug, Clone, Default)]
pub struct ParserConfig {
    /// Header pattern and the field names its captures are assigned to
    pub header: PatternOptions,
    /// Merge pattern, captures assigned to `Ref` / `Source`
    pub merge: PatternOptions,
    /// Revert pattern, captures assigned to `Header`
    pub revert: PatternOptions,
    /// Issue prefixes (e.g. `#`, `gh-`)
    pub issue_prefixes: Vec<String>,
    /// Reference action keywords (e.g. `closes`)
    pub ref_actions: Vec<String>,
    /// Note keywords (e.g. `BREAKING CHANGE`)
    pub note_keywords: Vec<String>,
}

impl ParserConfig {
    /// Create an empty config; nothing is extracted until patterns are added
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the header pattern
    pub fn with_header(mut self, pattern: &str, maps: &[&str]) -> Self {
        self.header = PatternOptions::new(pattern, maps);
        self
    }

    /// Set the merge pattern
    pub fn with_merge(mut self, pattern: &str, maps: &[&str]) -> Self {
        self.merge = PatternOptions::new(pattern, maps);
        self
    }

    /// Set the revert pattern
    pub fn with_revert(mut self, pattern: &str, maps: &[&str]) -> Self {
        self.revert = PatternOptions::new(pattern, maps);
        self
    }

    /// Add an issue prefix
    pub fn issue_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.issue_prefixes.push(prefix.into());
        self
    }

    /// Add a reference action keyword
    pub fn ref_action(mut self, action: impl Into<String>) -> Self {
        self.ref_actions.push(action.into());
        self
    }

    /// Add a note keyword
    pub fn note_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.note_keywords.push(keyword.into());
        self
    }
}

impl From<&OptionsConfig> for ParserConfig {
    fn from(options: &OptionsConfig) -> Self {
        Self {
            header: options.header.clone(),
            merge: options.merges.clone(),
            revert: options.reverts.clone(),
            issue_prefixes: options.issues.prefix.clone(),
            ref_actions: options.refs.actions.clone(),
            note_keywords: options.notes.keywords.clone(),
        }
    }
}
