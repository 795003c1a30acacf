//! Integration tests for the relay decision flow with MemoryStatusApi.

use std::sync::Arc;

use scanrelay_core::fakes::MemoryStatusApi;
use scanrelay_core::{
    AggregateContext, CommitStatus, CommitStatusEvent, RelayError, RelayOutcome, RepoRef,
    SkipReason, StatusRelay, StatusState,
};

const SHA: &str = "abc123";
const BUILD_URL: &str = "https://builds.gradle.org/viewLog.html?buildId=42";

fn repo() -> RepoRef {
    RepoRef::new("octo", "widgets")
}

fn event(state: StatusState) -> CommitStatusEvent {
    CommitStatusEvent::new(repo(), SHA, state)
        .with_target_url(BUILD_URL)
        .with_context("continuous-integration/teamcity")
}

fn existing(context: &str, state: StatusState) -> CommitStatus {
    CommitStatus {
        context: context.to_string(),
        state,
        description: None,
        target_url: None,
        created_at: None,
        updated_at: None,
    }
}

/// Test: successful build publishes BuildScanAll with the all-scans link
#[tokio::test]
async fn test_success_publishes_build_scan_all() {
    let api = Arc::new(MemoryStatusApi::new());
    let relay = StatusRelay::new(api.clone());

    let outcome = relay
        .process(&event(StatusState::Success))
        .await
        .expect("relay failed");

    assert!(outcome.is_published(), "Qualifying success should publish");
    let created = api.created();
    assert_eq!(created.len(), 1, "Exactly one status should be created");

    let (sha, status) = &created[0];
    assert_eq!(sha, SHA, "Status should land on the event commit");
    assert_eq!(status.state, StatusState::Success);
    assert_eq!(status.context, "BuildScanAll");
    assert_eq!(status.description, "Build Scan (All)");
    assert_eq!(
        status.target_url,
        "https://ge.gradle.org/scans?search.names=gitCommitId&search.rootProjectNames=widgets&search.values=abc123"
    );
}

/// Test: failed build publishes BuildScanFailure with the failed-scans link
#[tokio::test]
async fn test_failure_publishes_build_scan_failure() {
    let api = Arc::new(MemoryStatusApi::new());
    let relay = StatusRelay::new(api.clone());

    let outcome = relay
        .process(&event(StatusState::Failure))
        .await
        .expect("relay failed");

    assert_eq!(
        outcome,
        RelayOutcome::Published {
            context: AggregateContext::BuildScanFailure,
            target_url: "https://ge.gradle.org/scans?search.names=gitCommitId&search.rootProjectNames=widgets&search.buildOutcome=failure&search.values=abc123".to_string(),
        }
    );

    let created = api.created();
    assert_eq!(created.len(), 1, "Exactly one status should be created");
    assert_eq!(created[0].1.state, StatusState::Failure);
    assert_eq!(created[0].1.description, "Build Scan (Failure)");
}

/// Test: combined status is read exactly once before publishing
#[tokio::test]
async fn test_reads_combined_status_before_write() {
    let api = Arc::new(MemoryStatusApi::new());
    let relay = StatusRelay::new(api.clone());

    relay
        .process(&event(StatusState::Success))
        .await
        .expect("relay failed");

    assert_eq!(api.read_shas(), vec![SHA.to_string()], "One read, on the event commit");
}

/// Test: event without a target URL is a successful no-op with zero remote calls
#[tokio::test]
async fn test_missing_target_url_skips_without_remote_calls() {
    let api = Arc::new(MemoryStatusApi::new());
    let relay = StatusRelay::new(api.clone());

    let outcome = relay
        .process(&CommitStatusEvent::new(repo(), SHA, StatusState::Success))
        .await
        .expect("relay failed");

    assert_eq!(outcome, RelayOutcome::Skipped(SkipReason::MissingTargetUrl));
    assert!(api.read_shas().is_empty(), "No read should happen");
    assert!(api.created().is_empty(), "No write should happen");
}

/// Test: event from a foreign origin is a successful no-op with zero remote calls
#[tokio::test]
async fn test_foreign_origin_skips_without_remote_calls() {
    let api = Arc::new(MemoryStatusApi::new());
    let relay = StatusRelay::new(api.clone());

    let event = CommitStatusEvent::new(repo(), SHA, StatusState::Success)
        .with_target_url("https://ci.example.com/job/42");
    let outcome = relay.process(&event).await.expect("relay failed");

    assert_eq!(
        outcome,
        RelayOutcome::Skipped(SkipReason::ForeignOrigin {
            target_url: "https://ci.example.com/job/42".to_string(),
        })
    );
    assert!(api.read_shas().is_empty(), "No read should happen");
    assert!(api.created().is_empty(), "No write should happen");
}

/// Test: pending, error, and unrecognized states are filtered before any remote call
#[tokio::test]
async fn test_non_terminal_states_skip_without_remote_calls() {
    for state in [StatusState::Pending, StatusState::Error, StatusState::Unknown] {
        let api = Arc::new(MemoryStatusApi::new());
        let relay = StatusRelay::new(api.clone());

        let outcome = relay.process(&event(state)).await.expect("relay failed");

        assert_eq!(
            outcome,
            RelayOutcome::Skipped(SkipReason::UnsupportedState { state }),
            "State {state} should be filtered"
        );
        assert!(api.read_shas().is_empty(), "No read should happen for {state}");
        assert!(api.created().is_empty(), "No write should happen for {state}");
    }
}

/// Test: an already-published aggregate context suppresses the write
#[tokio::test]
async fn test_existing_aggregate_context_skips_write() {
    let api = Arc::new(MemoryStatusApi::with_statuses(vec![existing(
        "BuildScanAll",
        StatusState::Success,
    )]));
    let relay = StatusRelay::new(api.clone());

    let outcome = relay
        .process(&event(StatusState::Success))
        .await
        .expect("relay failed");

    assert_eq!(
        outcome,
        RelayOutcome::Skipped(SkipReason::AlreadyPublished {
            context: AggregateContext::BuildScanAll,
        })
    );
    assert_eq!(api.read_shas().len(), 1, "The combined set is still read");
    assert!(api.created().is_empty(), "No duplicate status should be created");
}

/// Test: the idempotency check is per aggregate context, not per relay
#[tokio::test]
async fn test_other_aggregate_context_does_not_block_publish() {
    let api = Arc::new(MemoryStatusApi::with_statuses(vec![existing(
        "BuildScanFailure",
        StatusState::Failure,
    )]));
    let relay = StatusRelay::new(api.clone());

    let outcome = relay
        .process(&event(StatusState::Success))
        .await
        .expect("relay failed");

    assert!(outcome.is_published(), "BuildScanFailure must not block BuildScanAll");
    assert_eq!(api.created()[0].1.context, "BuildScanAll");
}

/// Test: unrelated contexts in the combined set do not block publishing
#[tokio::test]
async fn test_unrelated_contexts_do_not_block_publish() {
    let api = Arc::new(MemoryStatusApi::with_statuses(vec![
        existing("ci/build", StatusState::Success),
        existing("ci/test", StatusState::Success),
    ]));
    let relay = StatusRelay::new(api.clone());

    let outcome = relay
        .process(&event(StatusState::Success))
        .await
        .expect("relay failed");

    assert!(outcome.is_published(), "Unrelated contexts must not block");
}

/// Test: a failing combined-status read aborts the invocation before any write
#[tokio::test]
async fn test_read_failure_aborts_without_write() {
    let api = Arc::new(MemoryStatusApi::new().failing_reads());
    let relay = StatusRelay::new(api.clone());

    let err = relay
        .process(&event(StatusState::Success))
        .await
        .expect_err("read failure should abort");

    assert!(matches!(err, RelayError::Api(_)), "Remote failure should surface as Api error");
    assert!(api.created().is_empty(), "No write should follow a failed read");
}

/// Test: a failing status creation aborts the invocation after the read
#[tokio::test]
async fn test_write_failure_aborts() {
    let api = Arc::new(MemoryStatusApi::new().failing_writes());
    let relay = StatusRelay::new(api.clone());

    let err = relay
        .process(&event(StatusState::Failure))
        .await
        .expect_err("write failure should abort");

    assert!(matches!(err, RelayError::Api(_)), "Remote failure should surface as Api error");
    assert_eq!(api.read_shas().len(), 1, "The read should have happened first");
}
