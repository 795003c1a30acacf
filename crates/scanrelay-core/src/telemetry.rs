//! Tracing initialisation for scanrelay binaries.
//!
//! Call [`init_tracing`] once at program start. Log lines go to stderr so a
//! CI step can keep stdout for its own output. Safe to call more than once;
//! the global subscriber can only be set once per process and subsequent
//! calls are silently ignored.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialise the global tracing subscriber.
///
/// * `verbose` lowers the default level from INFO to DEBUG.
/// * `json` emits newline-delimited JSON log lines for log aggregation.
///
/// `RUST_LOG` overrides the default level when set.
pub fn init_tracing(verbose: bool, json: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr).json())
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
            .ok();
    }
}
