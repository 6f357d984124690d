//! Tagline Changelog - commit and tag extraction
//!
//! This crate provides:
//! - Parsing of raw commit logs into structured commits
//! - Tag range selection (`old..new`, `tag..`, `..tag`, `tag`)
//! - Filtering, grouping and ordering of commits and notes
//! - Hosting-specific link processors
//! - Assembly of the unreleased section and per-tag versions

pub mod extractor;
pub mod field;
pub mod generator;
pub mod parser;
pub mod processor;
pub mod selector;
pub mod types;

pub use extractor::{CommitExtractor, ExtractOptions};
pub use field::{CommitField, GroupField, OrderableValue};
pub use generator::ChangelogGenerator;
pub use parser::{CommitParser, ParserConfig};
pub use processor::{
    processor_for_style, BitbucketProcessor, CommitProcessor, GitHubProcessor, GitLabProcessor,
};
pub use selector::{Selection, TagSelector};
pub use types::{Changelog, CommitGroup, Extraction, NoteGroup, Unreleased, Version};
