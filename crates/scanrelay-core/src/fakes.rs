//! In-memory test doubles for the remote status API.
//!
//! `MemoryStatusApi` implements [`StatusApi`] over a mutex-guarded status
//! set and records every call, so tests can assert not only what the relay
//! decided but also which remote calls it made (including "none at all").

use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{ApiError, ApiResult, StatusApi};
use crate::event::{RepoRef, StatusState};
use crate::status::{CombinedStatus, CommitStatus, NewStatus};

/// In-memory [`StatusApi`] backed by a fixed status set.
#[derive(Debug, Default)]
pub struct MemoryStatusApi {
    statuses: Mutex<Vec<CommitStatus>>,
    reads: Mutex<Vec<String>>,
    writes: Mutex<Vec<(String, NewStatus)>>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryStatusApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `statuses` already attached to every commit.
    pub fn with_statuses(statuses: Vec<CommitStatus>) -> Self {
        Self {
            statuses: Mutex::new(statuses),
            ..Self::default()
        }
    }

    /// Make every combined-status read fail with a server error.
    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    /// Make every status creation fail with a server error.
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// SHAs whose combined status was read, in call order.
    pub fn read_shas(&self) -> Vec<String> {
        self.reads.lock().unwrap().clone()
    }

    /// Statuses created, in call order, with the SHA they were attached to.
    pub fn created(&self) -> Vec<(String, NewStatus)> {
        self.writes.lock().unwrap().clone()
    }

    fn rollup(statuses: &[CommitStatus]) -> StatusState {
        if statuses.is_empty() {
            StatusState::Pending
        } else if statuses.iter().any(|s| s.state == StatusState::Failure) {
            StatusState::Failure
        } else {
            StatusState::Success
        }
    }
}

#[async_trait]
impl StatusApi for MemoryStatusApi {
    async fn combined_status(&self, _repo: &RepoRef, sha: &str) -> ApiResult<CombinedStatus> {
        self.reads.lock().unwrap().push(sha.to_string());
        if self.fail_reads {
            return Err(ApiError::Status {
                status: 500,
                message: "injected read failure".to_string(),
            });
        }
        let statuses = self.statuses.lock().unwrap().clone();
        Ok(CombinedStatus {
            state: Self::rollup(&statuses),
            sha: sha.to_string(),
            total_count: statuses.len() as u64,
            statuses,
        })
    }

    async fn create_status(
        &self,
        _repo: &RepoRef,
        sha: &str,
        status: &NewStatus,
    ) -> ApiResult<CommitStatus> {
        if self.fail_writes {
            return Err(ApiError::Status {
                status: 500,
                message: "injected write failure".to_string(),
            });
        }
        let record = CommitStatus {
            context: status.context.clone(),
            state: status.state,
            description: Some(status.description.clone()),
            target_url: Some(status.target_url.clone()),
            created_at: None,
            updated_at: None,
        };
        self.statuses.lock().unwrap().push(record.clone());
        self.writes
            .lock()
            .unwrap()
            .push((sha.to_string(), status.clone()));
        Ok(record)
    }
}
