//! Git repository access

use std::path::{Path, PathBuf};

use git2::{Oid, Repository};
use tracing::{info, instrument};

use tagline_core::error::GitError;

/// Result type for git operations
pub type Result<T> = std::result::Result<T, GitError>;

/// A repository changelog history is read from
pub struct GitRepo {
    pub(crate) repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open a repository at the given path
    #[instrument(fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self> {
        info!("opening repository for changelog history");
        let repo = Repository::open(path)
            .map_err(|e| open_error(e, GitError::RepositoryNotFound(path.to_path_buf())))?;
        Ok(Self {
            repo,
            path: path.to_path_buf(),
        })
    }

    /// Discover and open a repository by searching parent directories
    #[instrument(fields(start_path = %start_path.display()))]
    pub fn discover(start_path: &Path) -> Result<Self> {
        info!("searching parent directories for a repository");
        let repo = Repository::discover(start_path)
            .map_err(|e| open_error(e, GitError::NotARepository(start_path.to_path_buf())))?;
        let workdir = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();
        Ok(Self {
            repo,
            path: workdir,
        })
    }

    /// Working directory (or git dir for bare repositories)
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve a revision (`HEAD`, a tag, a hash) to the commit it names
    pub(crate) fn resolve_commit(&self, rev: &str) -> Result<Oid> {
        let object = self
            .repo
            .revparse_single(rev)
            .map_err(|_| GitError::RevisionNotFound(rev.to_string()))?;
        Ok(object.peel_to_commit()?.id())
    }
}

/// `missing` when git reports nothing found, otherwise the git message
fn open_error(err: git2::Error, missing: GitError) -> GitError {
    match err.code() {
        git2::ErrorCode::NotFound => missing,
        _ => GitError::OpenFailed(err.message().to_string()),
    }
}
