//! `peer-identity unique-id` command.

use std::io::Write;

use crate::cli::Domain;
use crate::config::IdentityConfig;
use crate::context::ServiceContext;
use crate::error::CliError;
use crate::store::IdentityStore;

/// Execute the `unique-id` command.
///
/// Prints the peer name with no trailing newline, or a JSON object followed
/// by a newline when `json` is set.
///
/// # Errors
///
/// Returns an error if the store fails or output cannot be written.
pub fn run(
    ctx: &ServiceContext,
    config: IdentityConfig,
    domain: &Domain,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let store = IdentityStore::new(ctx, config);
    let resolved = store.get_or_create(&domain.db_prefix, &domain.host_root)?;

    if json {
        serde_json::to_writer(&mut *out, &resolved)?;
        writeln!(out)?;
    } else {
        write!(out, "{}", resolved.peer_name)?;
    }
    out.flush()?;
    Ok(())
}
