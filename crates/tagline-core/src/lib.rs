//! tagline core - shared foundations for the changelog engine
//!
//! This crate provides the error taxonomy and the configuration model
//! (loading, style presets, normalisation and validation) used by the
//! git and changelog crates.

pub mod config;
pub mod error;

pub use config::Config;
pub use error::{ChangelogError, ConfigError, GitError, Result, TaglineError};
