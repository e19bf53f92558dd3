//! Binary entrypoint for the `peer-identity` CLI.

use std::process::ExitCode;

use peer_identity::CliError;

fn main() -> ExitCode {
    // Settings may come from a local `.env`; a missing file is fine.
    let _ = dotenvy::dotenv();

    match peer_identity::run(std::env::args_os()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Usage(err)) => err.exit(),
        Err(err) => {
            eprintln!("peer-identity: {err}");
            ExitCode::FAILURE
        }
    }
}
