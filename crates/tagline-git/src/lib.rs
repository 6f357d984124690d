//! Tagline Git - commit and tag entities and history access
//!
//! This crate owns the entities the changelog engine works on, the raw log
//! wire format shared by log fetchers and the commit parser, the
//! [`LogSource`] seam, and a `git2`-backed tag reader and log source.

mod commits;
pub mod format;
mod repository;
pub mod source;
pub mod tags;
pub mod types;

pub use repository::{GitRepo, Result};
pub use source::{LogSource, MemoryLogSource, RevisionRange};
pub use tags::TagReadOptions;
pub use types::{Commit, Contact, Hash, Merge, Note, Ref, RelatedTag, Revert, Signature, Tag};
