//! Scanrelay Core Library
//!
//! Domain model and decision logic for relaying build-scan links as
//! aggregate commit statuses. Platform-specific concerns (event payload
//! decoding, REST transport) live in `scanrelay-github`; this crate owns
//! what to publish and when.

pub mod api;
pub mod error;
pub mod event;
pub mod fakes;
pub mod relay;
pub mod scan_url;
pub mod status;
pub mod telemetry;

pub use api::{ApiError, ApiResult, StatusApi};
pub use error::{RelayError, Result};
pub use event::{CommitStatusEvent, RepoRef, StatusState};
pub use relay::{RelayOutcome, SkipReason, StatusRelay};
pub use scan_url::{is_build_scan_origin, ScanSearch, BUILD_SCAN_ORIGIN, SCAN_SERVER};
pub use status::{AggregateContext, CombinedStatus, CommitStatus, NewStatus};
pub use telemetry::init_tracing;
