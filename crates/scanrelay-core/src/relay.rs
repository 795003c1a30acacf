//! Relay decision flow over one commit-status event.
//!
//! The flow is a straight filter chain followed by one read and at most one
//! write:
//!
//! 1. Drop events without a target URL.
//! 2. Drop events whose target URL does not point at the build host.
//! 3. Drop events whose state maps to no aggregate context.
//! 4. Read the commit's combined status set and drop the event if the
//!    aggregate context is already present.
//! 5. Publish the aggregate status linking to the scan search.
//!
//! Dropped events are successful no-ops, not errors. Remote failures abort
//! the invocation and are never retried; a later delivery of the same event
//! starts from scratch and lands on an unchanged commit.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::api::StatusApi;
use crate::error::Result;
use crate::event::{CommitStatusEvent, StatusState};
use crate::scan_url::{is_build_scan_origin, ScanSearch};
use crate::status::AggregateContext;

/// Why an event produced no publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The event carried no link back to its originating system.
    MissingTargetUrl,
    /// The link did not point at the build host.
    ForeignOrigin { target_url: String },
    /// The event state feeds no aggregate context.
    UnsupportedState { state: StatusState },
    /// The aggregate status is already attached to the commit.
    AlreadyPublished { context: AggregateContext },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingTargetUrl => write!(f, "event has no target URL"),
            SkipReason::ForeignOrigin { target_url } => {
                write!(f, "target URL {target_url} is not a build-scan link")
            }
            SkipReason::UnsupportedState { state } => {
                write!(f, "state {state} feeds no aggregate status")
            }
            SkipReason::AlreadyPublished { context } => {
                write!(f, "{context} is already attached to the commit")
            }
        }
    }
}

/// What one relay invocation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    /// A new aggregate status was published.
    Published {
        context: AggregateContext,
        target_url: String,
    },
    /// The event was filtered; remote state is unchanged.
    Skipped(SkipReason),
}

impl RelayOutcome {
    pub fn is_published(&self) -> bool {
        matches!(self, RelayOutcome::Published { .. })
    }
}

/// Publishes aggregate build-scan statuses for qualifying events.
///
/// The read-then-write sequence is not atomic across invocations: two
/// racing runs for the same commit can both observe an absent context and
/// both publish. The host keeps the latest entry per context, so the
/// guarantee is best-effort once, not exactly once.
pub struct StatusRelay {
    api: Arc<dyn StatusApi>,
}

impl StatusRelay {
    pub fn new(api: Arc<dyn StatusApi>) -> Self {
        Self { api }
    }

    /// Process one commit-status event end to end.
    ///
    /// Returns what happened; `Err` means the invocation must fail even
    /// though the event itself qualified.
    pub async fn process(&self, event: &CommitStatusEvent) -> Result<RelayOutcome> {
        let Some(target_url) = event.target_url.as_deref() else {
            info!(sha = %event.sha, "event carries no target URL, skipping");
            return Ok(RelayOutcome::Skipped(SkipReason::MissingTargetUrl));
        };

        if !is_build_scan_origin(target_url) {
            info!(
                sha = %event.sha,
                target_url = %target_url,
                "event does not originate from the build host, skipping"
            );
            return Ok(RelayOutcome::Skipped(SkipReason::ForeignOrigin {
                target_url: target_url.to_string(),
            }));
        }

        let Some(context) = AggregateContext::for_state(event.state) else {
            info!(sha = %event.sha, state = %event.state, "state feeds no aggregate status, skipping");
            return Ok(RelayOutcome::Skipped(SkipReason::UnsupportedState {
                state: event.state,
            }));
        };

        // The combined set is the idempotency guard: read before write.
        let combined = self.api.combined_status(&event.repo, &event.sha).await?;
        debug!(
            sha = %event.sha,
            total = combined.statuses.len(),
            "fetched combined status set"
        );

        if combined.has_context(context.as_str()) {
            info!(sha = %event.sha, context = %context, "aggregate status already present, skipping");
            return Ok(RelayOutcome::Skipped(SkipReason::AlreadyPublished { context }));
        }

        let scan_url = ScanSearch::for_repo(&event.repo).for_context(context, &event.sha);
        let status = context.new_status(scan_url.clone());
        self.api.create_status(&event.repo, &event.sha, &status).await?;

        info!(
            sha = %event.sha,
            context = %context,
            target_url = %scan_url,
            "published aggregate status"
        );
        Ok(RelayOutcome::Published {
            context,
            target_url: scan_url,
        })
    }
}
