//! Changelog types

use serde::{Deserialize, Serialize};
use tagline_core::config::InfoConfig;
use tagline_git::{Commit, Note, Tag};

/// Commits sharing one value of the group-by field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitGroup {
    /// Unmodified group-by value (e.g. `feat`)
    pub raw_title: String,
    /// Display title (e.g. `Features`)
    pub title: String,
    /// Commits in this group
    pub commits: Vec<Commit>,
}

/// Notes sharing one title
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteGroup {
    /// Note title as written (e.g. `BREAKING CHANGE`)
    pub title: String,
    /// Notes in this group
    pub notes: Vec<Note>,
}

/// Result of extracting one list of commits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    pub commit_groups: Vec<CommitGroup>,
    pub merge_commits: Vec<Commit>,
    pub revert_commits: Vec<Commit>,
    pub note_groups: Vec<NoteGroup>,
}

/// One released (or next) version
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub tag: Tag,
    /// Every commit in the version's range, newest first
    pub commits: Vec<Commit>,
    pub commit_groups: Vec<CommitGroup>,
    pub merge_commits: Vec<Commit>,
    pub revert_commits: Vec<Commit>,
    pub note_groups: Vec<NoteGroup>,
}

impl Version {
    pub fn new(tag: Tag, commits: Vec<Commit>, extraction: Extraction) -> Self {
        Self {
            tag,
            commits,
            commit_groups: extraction.commit_groups,
            merge_commits: extraction.merge_commits,
            revert_commits: extraction.revert_commits,
            note_groups: extraction.note_groups,
        }
    }
}

/// Commits after the newest tag
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unreleased {
    pub commits: Vec<Commit>,
    pub commit_groups: Vec<CommitGroup>,
    pub merge_commits: Vec<Commit>,
    pub revert_commits: Vec<Commit>,
    pub note_groups: Vec<NoteGroup>,
}

impl Unreleased {
    pub fn new(commits: Vec<Commit>, extraction: Extraction) -> Self {
        Self {
            commits,
            commit_groups: extraction.commit_groups,
            merge_commits: extraction.merge_commits,
            revert_commits: extraction.revert_commits,
            note_groups: extraction.note_groups,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }
}

/// Everything a templating layer needs to render a changelog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Changelog {
    pub info: InfoConfig,
    pub unreleased: Unreleased,
    /// Versions in selection order
    pub versions: Vec<Version>,
}
