//! scanrelay - Build-scan commit-status relay
//!
//! Runs once per delivered `status` event inside a CI job: reads the
//! Actions runtime contract, decides whether the event deserves an
//! aggregate `BuildScanAll` / `BuildScanFailure` status, and publishes it
//! back onto the same commit with a link into the scan-search dashboard.
//!
//! Filtered events (foreign origin, missing target URL, non-terminal
//! state, already published) exit 0 without touching remote state.
//! Configuration and remote-call failures exit non-zero; the run is never
//! retried from inside the process.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use scanrelay_core::{init_tracing, RelayOutcome, StatusRelay};
use scanrelay_github::{ActionsContext, GitHubStatusClient};

#[derive(Parser)]
#[command(name = "scanrelay")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Publish aggregate build-scan commit statuses", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,

    /// API credential used for both status calls
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Repository the event belongs to, as owner/name
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: Option<String>,

    /// Path of the event payload file written by the runner
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: Option<PathBuf>,

    /// REST endpoint root (Enterprise hosts override the default)
    #[arg(long, env = "GITHUB_API_URL")]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.json);

    let runtime = ActionsContext::new(cli.token, cli.repository, cli.event_path, cli.api_url)?;
    let event = runtime
        .load_event()
        .context("failed to load the delivered status event")?;

    info!(
        repo = %event.repo,
        sha = %event.sha,
        state = %event.state,
        context = event.context.as_deref().unwrap_or("-"),
        "received commit-status event"
    );

    let client = Arc::new(GitHubStatusClient::from_context(&runtime));
    let relay = StatusRelay::new(client);

    match relay.process(&event).await? {
        RelayOutcome::Published { context, target_url } => {
            info!(context = %context, target_url = %target_url, "aggregate status published");
        }
        RelayOutcome::Skipped(reason) => {
            info!(reason = %reason, "nothing to publish");
        }
    }

    Ok(())
}
