//! `peer-identity show` command.

use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;

use crate::cli::Domain;
use crate::config::IdentityConfig;
use crate::context::ServiceContext;
use crate::error::{CliError, IdentityError};
use crate::identity::PeerName;
use crate::store::{IdentityStore, Lookup};

#[derive(Serialize)]
struct Shown {
    peer_name: PeerName,
    location: PathBuf,
}

/// Execute the `show` command.
///
/// Never creates or repairs anything.
///
/// # Errors
///
/// Returns an error if nothing valid is stored or output cannot be written.
pub fn run(
    ctx: &ServiceContext,
    config: IdentityConfig,
    domain: &Domain,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let store = IdentityStore::new(ctx, config);
    let (path, lookup) = store.peek(&domain.db_prefix, &domain.host_root)?;

    let peer_name = match lookup {
        Lookup::Found(peer_name) => peer_name,
        Lookup::Absent => return Err(CliError::Uninitialized { path }),
        Lookup::Invalid => {
            return Err(IdentityError::StorageCorrupt { path, attempts: 1 }.into());
        }
    };

    if json {
        serde_json::to_writer(&mut *out, &Shown { peer_name, location: path })?;
        writeln!(out)?;
    } else {
        write!(out, "{peer_name}")?;
    }
    out.flush()?;
    Ok(())
}
