//! Inbound commit-status event model.
//!
//! A relay invocation consumes exactly one `status` event: some build system
//! finished (or progressed) and the hosting platform recorded a commit status
//! for it. Only the fields the relay actually reads are modelled here; the
//! platform adapter is responsible for reducing the raw payload to this shape.

use std::fmt;

use serde::{Deserialize, Serialize};

/// State carried by a commit status.
///
/// The four named variants are the states the hosting platform defines.
/// Anything else on the wire collapses into [`StatusState::Unknown`] so a
/// payload with a state this relay has never seen is filtered, not fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum StatusState {
    Pending,
    Success,
    Failure,
    Error,
    /// Any state string the relay does not recognize.
    Unknown,
}

impl StatusState {
    /// Canonical wire spelling of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusState::Pending => "pending",
            StatusState::Success => "success",
            StatusState::Failure => "failure",
            StatusState::Error => "error",
            StatusState::Unknown => "unknown",
        }
    }
}

impl From<&str> for StatusState {
    fn from(value: &str) -> Self {
        match value {
            "pending" => StatusState::Pending,
            "success" => StatusState::Success,
            "failure" => StatusState::Failure,
            "error" => StatusState::Error,
            _ => StatusState::Unknown,
        }
    }
}

impl From<String> for StatusState {
    fn from(value: String) -> Self {
        StatusState::from(value.as_str())
    }
}

impl fmt::Display for StatusState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Owner and name identifying one repository on the hosting platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// One inbound `status` event, reduced to the fields the relay reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitStatusEvent {
    /// Repository the status was recorded on.
    pub repo: RepoRef,
    /// Commit the status is attached to.
    pub sha: String,
    /// Outcome reported by the originating system.
    pub state: StatusState,
    /// Link back to the originating system. Some publishers omit it.
    pub target_url: Option<String>,
    /// Context tag of the originating status, kept for logging.
    pub context: Option<String>,
}

impl CommitStatusEvent {
    pub fn new(repo: RepoRef, sha: impl Into<String>, state: StatusState) -> Self {
        Self {
            repo,
            sha: sha.into(),
            state,
            target_url: None,
            context: None,
        }
    }

    pub fn with_target_url(mut self, target_url: impl Into<String>) -> Self {
        self.target_url = Some(target_url.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}
