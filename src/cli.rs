//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};

use crate::config::CorruptPolicy;

/// Top-level CLI parser for `peer-identity`.
#[derive(Debug, Parser)]
#[command(name = "peer-identity", version, about = "Allocate and persist a unique peer name")]
pub struct Cli {
    /// Log protocol steps to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// How to treat a malformed stored peer name (overrides `PEER_IDENTITY_ON_CORRUPT`).
    #[arg(long, global = true, value_enum)]
    pub on_corrupt: Option<CorruptPolicy>,

    /// Bound on create attempts (overrides `PEER_IDENTITY_MAX_ATTEMPTS`).
    #[arg(long, global = true)]
    pub max_attempts: Option<u32>,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// The identity domain an invocation operates on.
#[derive(Debug, Clone, Args)]
pub struct Domain {
    /// Namespace prefix separating independent identity domains.
    pub db_prefix: String,
    /// Filesystem root of the host or container scope.
    pub host_root: String,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print this peer's unique name, creating it on first use.
    UniqueId {
        /// Identity domain.
        #[command(flatten)]
        domain: Domain,
        /// Print a JSON object with the location and origin.
        #[arg(long)]
        json: bool,
    },
    /// Print the stored peer name without creating one.
    Show {
        /// Identity domain.
        #[command(flatten)]
        domain: Domain,
        /// Print a JSON object with the location.
        #[arg(long)]
        json: bool,
    },
    /// Print the path backing an identity domain.
    Location {
        /// Identity domain.
        #[command(flatten)]
        domain: Domain,
    },
}
