//! Command dispatch and handlers.

pub mod location;
pub mod show;
pub mod unique_id;

use std::io::Write;

use crate::cli::Command;
use crate::config::IdentityConfig;
use crate::context::ServiceContext;
use crate::error::CliError;

/// Dispatch a parsed command to its handler, writing results to `out`.
///
/// # Errors
///
/// Returns an error if the selected command handler fails.
pub fn dispatch(
    command: &Command,
    ctx: &ServiceContext,
    config: IdentityConfig,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    match command {
        Command::UniqueId { domain, json } => unique_id::run(ctx, config, domain, *json, out),
        Command::Show { domain, json } => show::run(ctx, config, domain, *json, out),
        Command::Location { domain } => location::run(domain, out),
    }
}
