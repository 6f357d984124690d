//! Revision ranges and the log source seam

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use tagline_core::error::{GitError, Result};

/// A git revision range
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RevisionRange {
    /// Commits reachable from `to` but not from `from` (`from..to`)
    Between { from: String, to: String },
    /// Everything reachable from one revision
    Single(String),
}

impl RevisionRange {
    pub fn between(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::Between {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn single(rev: impl Into<String>) -> Self {
        Self::Single(rev.into())
    }
}

impl fmt::Display for RevisionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Between { from, to } => write!(f, "{}..{}", from, to),
            Self::Single(rev) => f.write_str(rev),
        }
    }
}

/// Supplies raw log text (see [`crate::format`]) for a revision range.
///
/// A non-empty `paths` restricts the log to commits touching one of the
/// paths. Calls are blocking; a failure aborts whatever requested the range.
pub trait LogSource {
    fn log(&self, range: &RevisionRange, paths: &[String]) -> Result<String>;
}

impl<T: LogSource + ?Sized> LogSource for &T {
    fn log(&self, range: &RevisionRange, paths: &[String]) -> Result<String> {
        (**self).log(range, paths)
    }
}

/// Log source answering from pre-fetched text, keyed by the rendered range.
///
/// The text is returned as registered; path filtering is left to whoever
/// prepared it.
///
/// Unknown ranges fail with [`GitError::RevisionNotFound`]. Every request is
/// recorded and can be inspected with [`MemoryLogSource::requested`].
#[derive(Debug, Default)]
pub struct MemoryLogSource {
    logs: HashMap<String, String>,
    requested: RefCell<Vec<String>>,
}

impl MemoryLogSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the raw log for a range such as `v1.0.0..v1.1.0` or `HEAD`
    pub fn with_log(mut self, range: impl Into<String>, raw: impl Into<String>) -> Self {
        self.logs.insert(range.into(), raw.into());
        self
    }

    /// Ranges requested so far, in request order
    pub fn requested(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }
}

impl LogSource for MemoryLogSource {
    fn log(&self, range: &RevisionRange, _paths: &[String]) -> Result<String> {
        let key = range.to_string();
        self.requested.borrow_mut().push(key.clone());
        match self.logs.get(&key) {
            Some(raw) => Ok(raw.clone()),
            None => Err(GitError::RevisionNotFound(key).into()),
        }
    }
}
