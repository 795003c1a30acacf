//! GitHub Actions runtime contract.
//!
//! A relay step runs inside an Actions job, which hands it everything it
//! needs through the environment: a token, the `owner/name` repository
//! slug, the path of the delivered event payload, and optionally the REST
//! endpoint root (Enterprise hosts override it). [`ActionsContext`]
//! validates those raw inputs once, up front, so the rest of the program
//! never sees a half-configured run.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use scanrelay_core::{CommitStatusEvent, RelayError, RepoRef, Result, StatusState};

/// Default REST endpoint root when the runtime does not provide one.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Validated view of the Actions runtime inputs.
#[derive(Debug, Clone)]
pub struct ActionsContext {
    /// API credential used for both status calls.
    pub token: String,
    /// Repository the delivered event belongs to.
    pub repo: RepoRef,
    /// Path of the event payload file written by the runner.
    pub event_path: PathBuf,
    /// REST endpoint root, without a trailing slash.
    pub api_url: String,
}

impl ActionsContext {
    /// Validate raw runtime inputs.
    ///
    /// The token check runs first: a step without a credential must fail
    /// before anything else happens, whatever else is misconfigured.
    pub fn new(
        token: Option<String>,
        repository: Option<String>,
        event_path: Option<PathBuf>,
        api_url: Option<String>,
    ) -> Result<Self> {
        let token = token
            .filter(|token| !token.is_empty())
            .ok_or(RelayError::MissingToken)?;
        let repository = repository
            .filter(|repository| !repository.is_empty())
            .ok_or(RelayError::MissingRepository)?;
        let repo = parse_repository(&repository)?;
        let event_path = event_path.ok_or(RelayError::MissingEventPath)?;
        let api_url = api_url
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(Self {
            token,
            repo,
            event_path,
            api_url,
        })
    }

    /// Load and decode the delivered `status` event payload.
    pub fn load_event(&self) -> Result<CommitStatusEvent> {
        load_status_event(&self.event_path, self.repo.clone())
    }
}

/// Split an `owner/name` repository slug.
pub fn parse_repository(value: &str) -> Result<RepoRef> {
    match value.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok(RepoRef::new(owner, name))
        }
        _ => Err(RelayError::InvalidRepository {
            value: value.to_string(),
        }),
    }
}

/// `status` event payload, reduced to the fields the relay consumes.
///
/// The full webhook body carries the commit, branches, sender, and
/// repository objects; none of them matter here, and serde drops them.
#[derive(Debug, Deserialize)]
struct StatusEventPayload {
    sha: String,
    state: StatusState,
    #[serde(default)]
    target_url: Option<String>,
    #[serde(default)]
    context: Option<String>,
}

/// Decode a raw `status` event body into the relay's event model.
pub fn decode_status_event(bytes: &[u8], repo: RepoRef) -> Result<CommitStatusEvent> {
    let payload: StatusEventPayload = serde_json::from_slice(bytes)?;
    Ok(CommitStatusEvent {
        repo,
        sha: payload.sha,
        state: payload.state,
        target_url: payload.target_url,
        context: payload.context,
    })
}

/// Read and decode the event payload file the runner wrote.
pub fn load_status_event(path: &Path, repo: RepoRef) -> Result<CommitStatusEvent> {
    let bytes = fs::read(path).map_err(|source| RelayError::EventRead {
        path: path.to_path_buf(),
        source,
    })?;
    decode_status_event(&bytes, repo)
}
