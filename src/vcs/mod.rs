//! Version control log access
//!
//! Contributor statistics come from a short-log traversal of a repository:
//! one entry per author with the number of commits they made, in the order
//! the backend reports them.

pub mod git;

pub use git::GitRepo;

use serde::{Deserialize, Serialize};

/// Commit count for one author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorCount {
    pub name: String,
    pub email: String,
    pub count: u32,
}

impl ContributorCount {
    pub fn new(name: impl Into<String>, email: impl Into<String>, count: u32) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            count,
        }
    }
}

/// Options for a short-log traversal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortLogOptions {
    /// Revision range (e.g. `v1.0..HEAD`); the whole history of HEAD when unset
    pub range: Option<String>,
}

impl ShortLogOptions {
    pub fn with_range(range: impl Into<String>) -> Self {
        Self {
            range: Some(range.into()),
        }
    }
}

/// Failures of the version control backend.
///
/// `Clone` so that one failed computation can be handed to every reader of
/// a cached result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VcsError {
    #[error("failed to run {program}: {message}")]
    Spawn { program: String, message: String },

    #[error("`{command}` failed: {stderr}")]
    Command { command: String, stderr: String },

    #[error("not a git repository: {0}")]
    NotARepository(String),

    #[error("invalid revision range: {0:?}")]
    InvalidRange(String),

    #[error("unexpected shortlog line: {0:?}")]
    Parse(String),
}

/// Source of per-author commit counts
pub trait VersionControlLog: Send + Sync {
    /// Per-author commit counts, in the backend's native order
    fn short_log(&self, opts: &ShortLogOptions) -> std::result::Result<Vec<ContributorCount>, VcsError>;
}
