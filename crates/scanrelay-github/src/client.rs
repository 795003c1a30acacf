//! GitHub commit-status REST client
//!
//! Implements the core [`StatusApi`] seam over the two REST endpoints the
//! relay touches: the combined-status read and the status creation. One
//! client instance is bound to a single endpoint root and credential for
//! its whole life, which for this program is a single invocation.

use async_trait::async_trait;
use tracing::debug;

use scanrelay_core::{
    ApiError, ApiResult, CombinedStatus, CommitStatus, NewStatus, RepoRef, StatusApi,
};

use crate::context::ActionsContext;

const USER_AGENT: &str = concat!("scanrelay/", env!("CARGO_PKG_VERSION"));
const ACCEPT: &str = "application/vnd.github+json";

/// Commit-status client bound to one REST endpoint root and credential.
pub struct GitHubStatusClient {
    http_client: reqwest::Client,
    api_url: String,
    token: String,
}

impl GitHubStatusClient {
    /// Create a new client. `api_url` is the endpoint root, with or without
    /// a trailing slash.
    pub fn new(api_url: &str, token: &str) -> Self {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to create HTTP client");

        GitHubStatusClient {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    /// Create a client from a validated Actions runtime context.
    pub fn from_context(context: &ActionsContext) -> Self {
        Self::new(&context.api_url, &context.token)
    }

    fn combined_status_url(&self, repo: &RepoRef, sha: &str) -> String {
        format!(
            "{}/repos/{}/{}/commits/{}/status",
            self.api_url, repo.owner, repo.name, sha
        )
    }

    fn create_status_url(&self, repo: &RepoRef, sha: &str) -> String {
        format!(
            "{}/repos/{}/{}/statuses/{}",
            self.api_url, repo.owner, repo.name, sha
        )
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", ACCEPT)
    }

    /// Turn a non-success response into an [`ApiError::Status`] carrying
    /// whatever body the host sent back.
    async fn check(response: reqwest::Response) -> ApiResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

fn transport(err: reqwest::Error) -> ApiError {
    ApiError::Http(err.to_string())
}

#[async_trait]
impl StatusApi for GitHubStatusClient {
    async fn combined_status(&self, repo: &RepoRef, sha: &str) -> ApiResult<CombinedStatus> {
        let url = self.combined_status_url(repo, sha);
        debug!(url = %url, "fetching combined status");

        let response = self
            .request(self.http_client.get(&url))
            .send()
            .await
            .map_err(transport)?;
        debug!(status = %response.status(), "combined status response");
        let response = Self::check(response).await?;
        response.json::<CombinedStatus>().await.map_err(transport)
    }

    async fn create_status(
        &self,
        repo: &RepoRef,
        sha: &str,
        status: &NewStatus,
    ) -> ApiResult<CommitStatus> {
        let url = self.create_status_url(repo, sha);
        debug!(url = %url, context = %status.context, "creating commit status");

        let response = self
            .request(self.http_client.post(&url))
            .json(status)
            .send()
            .await
            .map_err(transport)?;
        debug!(status = %response.status(), "create status response");
        let response = Self::check(response).await?;
        response.json::<CommitStatus>().await.map_err(transport)
    }
}
