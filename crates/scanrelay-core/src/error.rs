//! Error taxonomy for relay invocations.

use std::path::PathBuf;

use thiserror::Error;

use crate::api::ApiError;

/// Errors that abort a relay invocation.
///
/// Configuration problems are detected before any network traffic; remote
/// failures surface through [`RelayError::Api`] after the relay has already
/// committed to acting on the event.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The API credential is absent or empty.
    #[error("missing credential: GITHUB_TOKEN is required")]
    MissingToken,

    /// The repository identifier is absent.
    #[error("missing repository: GITHUB_REPOSITORY is required")]
    MissingRepository,

    /// The repository identifier is not of the form `owner/name`.
    #[error("invalid repository identifier: {value:?} (expected owner/name)")]
    InvalidRepository { value: String },

    /// No event payload path was provided.
    #[error("missing event payload: GITHUB_EVENT_PATH is required")]
    MissingEventPath,

    /// The event payload file could not be read.
    #[error("failed to read event payload {path:?}: {source}")]
    EventRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The event payload is not a decodable `status` event.
    #[error("failed to decode event payload: {0}")]
    EventDecode(#[from] serde_json::Error),

    /// A remote status call failed.
    #[error("remote status call failed: {0}")]
    Api(#[from] ApiError),
}

impl RelayError {
    /// Whether the failure was detected before any remote call.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, RelayError::Api(_))
    }
}

/// Result type for relay operations.
pub type Result<T> = std::result::Result<T, RelayError>;
