//! Remote commit-status API seam.
//!
//! The relay only ever needs two operations against the hosting platform:
//! read the combined status set of a commit and publish one new status onto
//! it. Keeping that surface behind a trait lets the decision logic run
//! against [`crate::fakes::MemoryStatusApi`] in tests and against the real
//! REST client in the binary.

use async_trait::async_trait;
use thiserror::Error;

use crate::event::RepoRef;
use crate::status::{CombinedStatus, CommitStatus, NewStatus};

/// Result type for remote status operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Errors surfaced by the remote status API.
///
/// Both variants are terminal for the invocation: the relay never retries.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure: connect, TLS, timeout, or body decode.
    #[error("http transport error: {0}")]
    Http(String),

    /// The host answered with a non-success status code.
    #[error("remote call failed with status {status}: {message}")]
    Status { status: u16, message: String },
}

/// Commit-status operations against the hosting platform.
///
/// Implementations guarantee:
/// - `combined_status` never mutates remote state.
/// - `create_status` publishes exactly one new entry per call.
#[async_trait]
pub trait StatusApi: Send + Sync {
    /// Fetch the combined status set currently attached to `sha`.
    async fn combined_status(&self, repo: &RepoRef, sha: &str) -> ApiResult<CombinedStatus>;

    /// Publish a new status onto `sha`, returning the stored record.
    async fn create_status(
        &self,
        repo: &RepoRef,
        sha: &str,
        status: &NewStatus,
    ) -> ApiResult<CommitStatus>;
}
