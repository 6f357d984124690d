//! Commit history as a log source

use git2::{DiffOptions, Sort};
use tracing::{debug, instrument};

use crate::format::{render_log, LogIdentity, LogRecord};
use crate::repository::{GitRepo, Result};
use crate::source::{LogSource, RevisionRange};

impl GitRepo {
    /// Walk a revision range newest first and collect the commits as log records.
    ///
    /// With a non-empty `paths`, only commits touching one of them are kept.
    #[instrument(skip(self), fields(range = %range))]
    pub fn log_records(&self, range: &RevisionRange, paths: &[String]) -> Result<Vec<LogRecord>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;

        match range {
            RevisionRange::Between { from, to } => {
                revwalk.push(self.resolve_commit(to)?)?;
                revwalk.hide(self.resolve_commit(from)?)?;
            }
            RevisionRange::Single(rev) => {
                revwalk.push(self.resolve_commit(rev)?)?;
            }
        }

        let mut records = Vec::new();
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            if !self.touches_paths(&commit, paths)? {
                continue;
            }
            records.push(commit_to_record(&commit));
        }

        debug!(count = records.len(), "collected commits");
        Ok(records)
    }

    /// Whether the commit changes one of `paths`; always true without a filter
    fn touches_paths(&self, commit: &git2::Commit<'_>, paths: &[String]) -> Result<bool> {
        if paths.is_empty() {
            return Ok(true);
        }

        let tree = commit.tree()?;
        let parent_tree = match commit.parent(0) {
            Ok(parent) => Some(parent.tree()?),
            Err(_) => None,
        };

        let mut opts = DiffOptions::new();
        for path in paths {
            opts.pathspec(path);
        }

        let diff = self
            .repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut opts))?;
        Ok(diff.deltas().len() > 0)
    }
}

impl LogSource for GitRepo {
    fn log(&self, range: &RevisionRange, paths: &[String]) -> tagline_core::Result<String> {
        let records = self.log_records(range, paths)?;
        Ok(render_log(&records))
    }
}

fn identity(signature: &git2::Signature<'_>) -> LogIdentity {
    LogIdentity::new(
        signature.name().unwrap_or_default(),
        signature.email().unwrap_or_default(),
        signature.when().seconds(),
    )
}

/// Convert a git2 Commit to a LogRecord
fn commit_to_record(commit: &git2::Commit<'_>) -> LogRecord {
    let hash = commit.id().to_string();
    let short_hash = hash.chars().take(7).collect();

    LogRecord {
        hash,
        short_hash,
        author: identity(&commit.author()),
        committer: identity(&commit.committer()),
        subject: commit.summary().unwrap_or_default().to_string(),
        body: commit.body().unwrap_or_default().to_string(),
    }
}
