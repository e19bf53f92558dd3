//! `peer-identity location` command.

use std::io::Write;

use crate::cli::Domain;
use crate::error::CliError;
use crate::store::StorageLocation;

/// Execute the `location` command: print the domain's storage path.
///
/// # Errors
///
/// Returns an error for empty arguments or if output cannot be written.
pub fn run(domain: &Domain, out: &mut dyn Write) -> Result<(), CliError> {
    let location = StorageLocation::resolve(&domain.db_prefix, &domain.host_root)?;
    writeln!(out, "{}", location.path().display())?;
    Ok(())
}
