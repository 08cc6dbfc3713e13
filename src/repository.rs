//! Repository handle - entry point for per-repository queries

use std::path::Path;
use std::sync::Arc;
use crate::Result;
use crate::contributors::ContributorConnection;
use crate::vcs::{GitRepo, VersionControlLog};

/// A named repository backed by a version control log
#[derive(Clone)]
pub struct Repository {
    name: String,
    log: Arc<dyn VersionControlLog>,
}

impl Repository {
    pub fn new(name: impl Into<String>, log: Arc<dyn VersionControlLog>) -> Self {
        Self {
            name: name.into(),
            log,
        }
    }

    /// Open a git checkout, naming the repository after its directory
    pub fn open(path: &Path) -> Result<Self> {
        let repo = GitRepo::open(path)?;
        let name = path
            .canonicalize()
            .ok()
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        tracing::debug!("Opened repository {} at {}", name, path.display());
        Ok(Self::new(name, Arc::new(repo)))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// A fresh contributor connection; each call computes independently
    pub fn contributors(&self, range: Option<String>, first: Option<usize>) -> ContributorConnection {
        ContributorConnection::new(self.name.clone(), Arc::clone(&self.log), range, first)
    }
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vcs::{ContributorCount, ShortLogOptions, VcsError};
    use std::sync::Mutex;

    /// Records the options of every short-log call
    #[derive(Default)]
    struct RecordingLog {
        seen: Mutex<Vec<ShortLogOptions>>,
    }

    impl VersionControlLog for RecordingLog {
        fn short_log(&self, opts: &ShortLogOptions) -> std::result::Result<Vec<ContributorCount>, VcsError> {
            self.seen.lock().unwrap().push(opts.clone());
            Ok(vec![ContributorCount::new("ada", "ada@example.com", 1)])
        }
    }

    #[test]
    fn test_contributors_passes_range_through() {
        let log = Arc::new(RecordingLog::default());
        let repo = Repository::new("acme/widgets", log.clone());

        let conn = repo.contributors(Some("v2.0..main".to_string()), Some(1));
        assert_eq!(conn.repository(), "acme/widgets");
        assert_eq!(conn.total_count().unwrap(), 1);

        repo.contributors(None, None).items().unwrap();

        let seen = log.seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![ShortLogOptions::with_range("v2.0..main"), ShortLogOptions::default()]
        );
    }

    #[test]
    fn test_open_rejects_non_repository() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Repository::open(dir.path()).is_err());
    }
}
