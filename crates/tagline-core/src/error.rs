//! Error types for tagline

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using TaglineError
pub type Result<T> = std::result::Result<T, TaglineError>;

/// Main error type for tagline operations
#[derive(Debug, Error)]
pub enum TaglineError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Git-related errors
    #[error(transparent)]
    Git(#[from] GitError),

    /// Changelog-related errors
    #[error(transparent)]
    Changelog(#[from] ChangelogError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// A configured regular expression does not compile
    #[error("Invalid pattern in {field}: {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    /// A field path that no accessor exists for
    #[error("Unknown field path '{path}' in {field}")]
    UnknownField { field: String, path: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Compile `pattern`, attributing a failure to the config `field`
    pub fn compile(field: &str, pattern: &str) -> std::result::Result<regex::Regex, Self> {
        regex::Regex::new(pattern).map_err(|source| Self::InvalidPattern {
            field: field.to_string(),
            source,
        })
    }
}

/// Git-related errors
#[derive(Debug, Error)]
pub enum GitError {
    /// Repository not found
    #[error("Git repository not found at {0}")]
    RepositoryNotFound(PathBuf),

    /// Not a git repository
    #[error("Not a git repository: {0}")]
    NotARepository(PathBuf),

    /// Failed to open repository
    #[error("Failed to open repository: {0}")]
    OpenFailed(String),

    /// A revision in a range could not be resolved
    #[error("Revision not found: {0}")]
    RevisionNotFound(String),

    /// Tag already exists
    #[error("\"{0}\" tag already exists")]
    TagExists(String),

    /// Git2 library error
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),
}

/// Changelog-related errors
#[derive(Debug, Error)]
pub enum ChangelogError {
    /// A tag named by a query does not exist
    #[error("\"{name}\" tag is not found")]
    TagNotFound { name: String },

    /// A well-formed query selected nothing
    #[error("could not find any relevant tags for \"{query}\"")]
    NoRelevantTags { query: String },

    /// No versions could be built for a query
    #[error("commits corresponding to \"{query}\" were not found")]
    NoCommitsFound { query: String },
}
