//! Error types for identity allocation and the CLI around it.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for identity store operations.
pub type Result<T> = std::result::Result<T, IdentityError>;

/// Classified failures of the identity store.
///
/// A missing file or malformed contents are not errors; the store handles
/// both internally by creating a fresh identifier.
#[derive(Error, Debug)]
pub enum IdentityError {
    /// Bad caller input, detected before touching the filesystem.
    #[error("invalid {argument}: {reason}")]
    InvalidArgument {
        /// Name of the offending argument.
        argument: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// Permission or I/O failure unrelated to a creation race.
    #[error("storage unavailable at {}: {source}", .path.display())]
    StorageUnavailable {
        /// Path the failing operation targeted.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Every attempt observed unusable contents at the storage location.
    #[error(
        "storage corrupt at {}: no valid peer name after {attempts} attempt(s)",
        .path.display()
    )]
    StorageCorrupt {
        /// The storage location.
        path: PathBuf,
        /// Number of attempts made before giving up.
        attempts: u32,
    },

    /// The entropy source could not produce bytes.
    #[error("randomness unavailable: {0}")]
    RandomnessUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Coarse classification of an [`IdentityError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// See [`IdentityError::InvalidArgument`].
    InvalidArgument,
    /// See [`IdentityError::StorageUnavailable`].
    StorageUnavailable,
    /// See [`IdentityError::StorageCorrupt`].
    StorageCorrupt,
    /// See [`IdentityError::RandomnessUnavailable`].
    RandomnessUnavailable,
}

impl IdentityError {
    /// Returns the classification of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::StorageUnavailable { .. } => ErrorKind::StorageUnavailable,
            Self::StorageCorrupt { .. } => ErrorKind::StorageCorrupt,
            Self::RandomnessUnavailable(_) => ErrorKind::RandomnessUnavailable,
        }
    }

    pub(crate) fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::StorageUnavailable { path: path.into(), source }
    }
}

/// Errors surfaced by the command-line layer.
#[derive(Error, Debug)]
pub enum CliError {
    /// Argument parsing failed, or help/version was requested.
    #[error(transparent)]
    Usage(#[from] clap::Error),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The identity store failed.
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// `show` found no identifier for the domain.
    #[error("no peer name stored at {}", .path.display())]
    Uninitialized {
        /// The storage location that was checked.
        path: PathBuf,
    },

    /// Writing the result to stdout failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),

    /// Rendering JSON output failed.
    #[error("failed to render JSON output: {0}")]
    Json(#[from] serde_json::Error),
}
