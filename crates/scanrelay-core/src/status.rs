//! Commit-status records and the aggregate contexts the relay owns.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::StatusState;

/// A status entry as stored by the hosting platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitStatus {
    /// Channel the status was published under.
    pub context: String,
    pub state: StatusState,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub target_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// The aggregate set of statuses currently attached to one commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedStatus {
    /// Rolled-up state computed by the hosting platform.
    pub state: StatusState,
    /// Commit the set belongs to.
    pub sha: String,
    pub total_count: u64,
    /// Latest status per context, most recent first.
    pub statuses: Vec<CommitStatus>,
}

impl CombinedStatus {
    /// Whether any entry in the set was published under `context`.
    pub fn has_context(&self, context: &str) -> bool {
        self.statuses.iter().any(|status| status.context == context)
    }
}

/// Payload for publishing a new status onto a commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStatus {
    pub state: StatusState,
    pub context: String,
    pub description: String,
    pub target_url: String,
}

/// The two aggregate status channels this relay publishes.
///
/// `BuildScanAll` marks commits whose build succeeded and links to every
/// scan recorded for the commit. `BuildScanFailure` marks failed builds and
/// links to the failed scans only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateContext {
    BuildScanAll,
    BuildScanFailure,
}

impl AggregateContext {
    /// Map an inbound event state to the aggregate context it feeds, if any.
    ///
    /// Pending, error, and unrecognized states feed no aggregate.
    pub fn for_state(state: StatusState) -> Option<Self> {
        match state {
            StatusState::Success => Some(AggregateContext::BuildScanAll),
            StatusState::Failure => Some(AggregateContext::BuildScanFailure),
            StatusState::Pending | StatusState::Error | StatusState::Unknown => None,
        }
    }

    /// Context string the aggregate is published under.
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateContext::BuildScanAll => "BuildScanAll",
            AggregateContext::BuildScanFailure => "BuildScanFailure",
        }
    }

    /// Human-readable description shown next to the status.
    pub fn description(&self) -> &'static str {
        match self {
            AggregateContext::BuildScanAll => "Build Scan (All)",
            AggregateContext::BuildScanFailure => "Build Scan (Failure)",
        }
    }

    /// State the aggregate status is published with.
    pub fn state(&self) -> StatusState {
        match self {
            AggregateContext::BuildScanAll => StatusState::Success,
            AggregateContext::BuildScanFailure => StatusState::Failure,
        }
    }

    /// Build the publishable status record, linking to `target_url`.
    pub fn new_status(&self, target_url: impl Into<String>) -> NewStatus {
        NewStatus {
            state: self.state(),
            context: self.as_str().to_string(),
            description: self.description().to_string(),
            target_url: target_url.into(),
        }
    }
}

impl fmt::Display for AggregateContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
