//! Scan-search link construction.
//!
//! Qualifying events originate from the build host and are answered with a
//! link into the scan server's search UI, pre-filtered down to the scans of
//! one commit in one root project. The search parameters are plain query
//! strings the scan server defines; nothing here is percent-encoded because
//! commit SHAs and the project names we relay for never need it.

use crate::event::RepoRef;
use crate::status::AggregateContext;

/// URL prefix identifying statuses that originate from the build host.
pub const BUILD_SCAN_ORIGIN: &str = "https://builds.gradle.org";

/// Root of the scan server hosting the searchable scan dashboard.
pub const SCAN_SERVER: &str = "https://ge.gradle.org";

/// Whether `url` points back at the build host the relay listens for.
pub fn is_build_scan_origin(url: &str) -> bool {
    url.starts_with(BUILD_SCAN_ORIGIN)
}

/// Scan-search link builder scoped to one repository.
///
/// The scan server indexes builds by the `gitCommitId` custom value and by
/// root project name, which by convention equals the repository name.
#[derive(Debug, Clone)]
pub struct ScanSearch {
    root_project: String,
}

impl ScanSearch {
    pub fn for_repo(repo: &RepoRef) -> Self {
        Self {
            root_project: repo.name.clone(),
        }
    }

    fn base(&self) -> String {
        format!(
            "{SCAN_SERVER}/scans?search.names=gitCommitId&search.rootProjectNames={}",
            self.root_project
        )
    }

    /// Search link for every scan recorded against `sha`.
    pub fn all_builds(&self, sha: &str) -> String {
        format!("{}&search.values={sha}", self.base())
    }

    /// Search link for the failed scans recorded against `sha`.
    pub fn failed_builds(&self, sha: &str) -> String {
        format!("{}&search.buildOutcome=failure&search.values={sha}", self.base())
    }

    /// Search link appropriate for the given aggregate context.
    pub fn for_context(&self, context: AggregateContext, sha: &str) -> String {
        match context {
            AggregateContext::BuildScanAll => self.all_builds(sha),
            AggregateContext::BuildScanFailure => self.failed_builds(sha),
        }
    }
}
