//! Repository contributors as a paginated connection
//!
//! A [`ContributorConnection`] is created per request. Its accessors
//! (`items`, `total_count`, `page_info`) may be evaluated independently and
//! concurrently, but they all read one short-log computation that runs at
//! most once for the lifetime of the connection.

pub mod pagination;

use std::sync::{Arc, OnceLock};
use serde::Serialize;
use crate::{Error, Result};
use crate::vcs::{ContributorCount, ShortLogOptions, VcsError, VersionControlLog};

/// Pagination state of a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub has_next_page: bool,
}

/// Contributors of one repository, optionally restricted to a revision range
/// and limited to the first `first` authors.
pub struct ContributorConnection {
    repository: String,
    log: Arc<dyn VersionControlLog>,
    opts: ShortLogOptions,
    first: Option<usize>,
    // uncomputed -> settled; get_or_init blocks concurrent first callers
    computed: OnceLock<std::result::Result<Vec<ContributorCount>, VcsError>>,
}

impl ContributorConnection {
    pub fn new(
        repository: impl Into<String>,
        log: Arc<dyn VersionControlLog>,
        range: Option<String>,
        first: Option<usize>,
    ) -> Self {
        Self {
            repository: repository.into(),
            log,
            // an empty range means the whole history, same as none
            opts: ShortLogOptions {
                range: range.filter(|r| !r.is_empty()),
            },
            first,
            computed: OnceLock::new(),
        }
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn range(&self) -> Option<&str> {
        self.opts.range.as_deref()
    }

    /// Run the short log once; every later call observes the same outcome
    fn compute(&self) -> Result<&[ContributorCount]> {
        let settled = self.computed.get_or_init(|| {
            tracing::debug!(
                "Computing contributors for {} (range: {:?})",
                self.repository,
                self.opts.range
            );
            let result = self.log.short_log(&self.opts);
            if let Err(e) = &result {
                tracing::warn!("Contributor computation for {} failed: {}", self.repository, e);
            }
            result
        });

        match settled {
            Ok(counts) => Ok(counts),
            Err(e) => Err(Error::UpstreamCompute(e.clone())),
        }
    }

    /// Contributors on this page, in the order the log reported them
    pub fn items(&self) -> Result<&[ContributorCount]> {
        let counts = self.compute()?;
        Ok(pagination::items(counts, self.first))
    }

    /// Number of contributors in scope, ignoring `first`
    pub fn total_count(&self) -> Result<usize> {
        let counts = self.compute()?;
        Ok(pagination::total_count(counts))
    }

    pub fn page_info(&self) -> Result<PageInfo> {
        let counts = self.compute()?;
        Ok(PageInfo {
            has_next_page: pagination::has_next_page(counts, self.first),
        })
    }
}

impl std::fmt::Debug for ContributorConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContributorConnection")
            .field("repository", &self.repository)
            .field("range", &self.opts.range)
            .field("first", &self.first)
            .field("computed", &self.computed.get().is_some())
            .finish()
    }
}
