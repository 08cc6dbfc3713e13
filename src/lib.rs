//! # Codescout - Saved searches and contributor statistics
//!
//! Two small pieces of a code-intelligence platform:
//! - A SQLite-backed store of saved search queries owned by a user or an organization
//! - Per-author commit statistics for a repository, computed once per request from
//!   `git shortlog` and served through a paginated connection

pub mod config;
pub mod contributors;
pub mod output;
pub mod repository;
pub mod saved_search;
pub mod storage;
pub mod ui;
pub mod vcs;

// Re-exports for convenient access
pub use contributors::{ContributorConnection, PageInfo};
pub use repository::Repository;
pub use saved_search::{NewSavedQuery, Owner, OwnerKind, SavedQuery, SavedQueryId};
pub use storage::SavedSearchStore;
pub use vcs::{ContributorCount, GitRepo, ShortLogOptions, VcsError, VersionControlLog};

/// Result type alias for Codescout operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Codescout operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Saved search not found: {0}")]
    NotFound(SavedQueryId),

    #[error("Storage error: {0}")]
    Persistence(#[from] rusqlite::Error),

    #[error("Version control error: {0}")]
    UpstreamCompute(#[from] VcsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
