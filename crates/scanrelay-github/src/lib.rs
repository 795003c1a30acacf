//! GitHub adapter for scanrelay.
//!
//! Binds the core relay to a concrete hosting platform: the Actions
//! runtime contract (environment inputs and the event payload file) and
//! the commit-status REST endpoints.

pub mod client;
pub mod context;

pub use client::GitHubStatusClient;
pub use context::{
    decode_status_event, load_status_event, parse_repository, ActionsContext, DEFAULT_API_URL,
};
