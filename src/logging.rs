//! Tracing subscriber setup.
//!
//! Logs always go to stderr; stdout carries only command output.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "PEER_IDENTITY_LOG";

/// Installs the global subscriber.
///
/// `PEER_IDENTITY_LOG` wins when set; otherwise `verbose` selects `debug`
/// and the default is `warn`. A subscriber installed earlier is left alone.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
