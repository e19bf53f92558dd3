//! Persistent unique peer identity allocation.
//!
//! Every peer in an overlay network gets one stable name per identity
//! domain `(db-prefix, host-root)`, persisted on disk and created exactly
//! once even when several processes initialize the domain concurrently.

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod identity;
pub mod logging;
pub mod ports;
pub mod store;

use std::io;

use clap::Parser;

pub use error::{CliError, ErrorKind, IdentityError};
pub use identity::PeerName;
pub use store::{get_or_create, IdentityStore, Lookup, Origin, Resolved, StorageLocation};

use crate::config::IdentityConfig;
use crate::context::ServiceContext;

/// Run the CLI with the provided arguments, writing results to stdout.
///
/// # Errors
///
/// Returns an error when argument parsing, configuration, or command
/// execution fails.
pub fn run<I, T>(args: I) -> Result<(), CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args)?;
    logging::init(cli.verbose);

    let config = IdentityConfig::from_env()?.with_overrides(cli.on_corrupt, cli.max_attempts)?;
    let ctx = ServiceContext::live();
    let stdout = io::stdout();
    commands::dispatch(&cli.command, &ctx, config, &mut stdout.lock())
}

#[cfg(test)]
mod tests {
    use super::{run, CliError};

    #[test]
    fn run_errors_on_unknown_subcommand() {
        let result = run(["peer-identity", "unknown"]);
        assert!(matches!(result, Err(CliError::Usage(_))));
    }

    #[test]
    fn run_rejects_zero_attempts() {
        let result = run(["peer-identity", "--max-attempts", "0", "location", "weave", "/"]);
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn run_executes_location() {
        let result = run(["peer-identity", "location", "weave", "/"]);
        assert!(result.is_ok());
    }
}
