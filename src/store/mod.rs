//! Identity store: get-or-create of one peer name per identity domain.
//!
//! The filesystem is the only coordination medium. A candidate is written in
//! full to a hidden staging file and then published with a hard link, which
//! either atomically creates the final name or fails because another caller
//! published first. Losers re-read and return the winner's value, so every
//! caller in a domain converges on one peer name.

pub mod location;

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

pub use location::StorageLocation;

use crate::config::{CorruptPolicy, IdentityConfig};
use crate::context::ServiceContext;
use crate::error::{IdentityError, Result};
use crate::identity::{PeerName, PEER_NAME_BYTES};

const NONCE_BYTES: usize = 8;

/// What a read of the storage location found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// A well-formed peer name.
    Found(PeerName),
    /// No file (or no containing directory).
    Absent,
    /// A file whose contents are not a peer name.
    Invalid,
}

/// How [`IdentityStore::get_or_create`] arrived at its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// The peer name was already stored.
    Existing,
    /// This call published a new peer name.
    Created,
    /// Another caller published concurrently; this call returned its value.
    Adopted,
    /// Malformed contents were replaced with a new peer name by this call.
    Healed,
}

/// A peer name together with where it lives and how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolved {
    /// The domain's authoritative peer name.
    pub peer_name: PeerName,
    /// Path of the identity file.
    pub location: PathBuf,
    /// How this call obtained the peer name.
    pub origin: Origin,
}

enum Publish {
    Won(PeerName),
    Lost,
}

/// Persistence layer for peer names.
///
/// All I/O goes through `ctx.fs` and all randomness through `ctx.entropy`.
pub struct IdentityStore<'a> {
    ctx: &'a ServiceContext,
    config: IdentityConfig,
}

impl<'a> IdentityStore<'a> {
    /// Creates a store over the given context.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, config: IdentityConfig) -> Self {
        Self { ctx, config }
    }

    /// Reads the domain's storage location without writing anything.
    ///
    /// Returns the resolved path together with what was found there.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for empty inputs and `StorageUnavailable`
    /// if the file exists but cannot be read.
    pub fn peek(&self, prefix: &str, root: &str) -> Result<(PathBuf, Lookup)> {
        let path = StorageLocation::resolve(prefix, root)?.path();
        let lookup = self.lookup(&path)?;
        Ok((path, lookup))
    }

    /// Returns the domain's peer name, creating and persisting it first if
    /// needed.
    ///
    /// Concurrent callers for the same domain, in this process or others,
    /// all receive the same value. An existing valid peer name is never
    /// modified.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` for empty inputs, before any filesystem access.
    /// - `StorageUnavailable` for I/O or permission failures.
    /// - `StorageCorrupt` if malformed contents are found under
    ///   [`CorruptPolicy::Fail`], or no valid peer name could be settled
    ///   within `max_attempts`.
    /// - `RandomnessUnavailable` if the entropy source fails.
    pub fn get_or_create(&self, prefix: &str, root: &str) -> Result<Resolved> {
        let location = StorageLocation::resolve(prefix, root)?;
        let path = location.path();

        for attempt in 1..=self.config.max_attempts {
            let mut healing = false;
            match self.lookup(&path)? {
                Lookup::Found(peer_name) => {
                    let origin = if attempt == 1 { Origin::Existing } else { Origin::Adopted };
                    debug!(path = %path.display(), %peer_name, "found stored peer name");
                    return Ok(Resolved { peer_name, location: path, origin });
                }
                Lookup::Invalid => {
                    if self.config.on_corrupt == CorruptPolicy::Fail {
                        warn!(path = %path.display(), "malformed peer name on disk; not healing");
                        return Err(IdentityError::StorageCorrupt { path, attempts: attempt });
                    }
                    warn!(path = %path.display(), attempt, "malformed peer name on disk; healing");
                    if let Some(peer_name) = self.quarantine(&location)? {
                        let origin = Origin::Adopted;
                        return Ok(Resolved { peer_name, location: path, origin });
                    }
                    healing = true;
                }
                Lookup::Absent => {}
            }

            match self.publish(&location)? {
                Publish::Won(peer_name) => {
                    let origin = if healing { Origin::Healed } else { Origin::Created };
                    info!(path = %path.display(), %peer_name, ?origin, "published new peer name");
                    return Ok(Resolved { peer_name, location: path, origin });
                }
                Publish::Lost => {
                    debug!(path = %path.display(), attempt, "lost creation race; reading winner");
                    if let Lookup::Found(peer_name) = self.lookup(&path)? {
                        let origin = Origin::Adopted;
                        return Ok(Resolved { peer_name, location: path, origin });
                    }
                }
            }
        }

        let attempts = self.config.max_attempts;
        warn!(path = %path.display(), attempts, "no valid peer name settled; giving up");
        Err(IdentityError::StorageCorrupt { path, attempts })
    }

    fn lookup(&self, path: &Path) -> Result<Lookup> {
        match self.ctx.fs.read(path) {
            Ok(contents) => {
                Ok(PeerName::parse_persisted(&contents).map_or(Lookup::Invalid, Lookup::Found))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Lookup::Absent),
            Err(err) => Err(IdentityError::storage(path, err)),
        }
    }

    /// Writes a fresh candidate and tries to publish it as the final file.
    fn publish(&self, location: &StorageLocation) -> Result<Publish> {
        let candidate = self.generate()?;

        let dir = location.dir();
        self.ctx.fs.create_dir_all(dir).map_err(|err| IdentityError::storage(dir, err))?;

        let staging = location.staging_path(&self.nonce()?);
        if let Err(err) = self.ctx.fs.write_new(&staging, candidate.to_string().as_bytes()) {
            if err.kind() != io::ErrorKind::AlreadyExists {
                self.remove_quietly(&staging);
            }
            return Err(IdentityError::storage(staging, err));
        }

        let path = location.path();
        let linked = self.ctx.fs.hard_link(&staging, &path);
        self.remove_quietly(&staging);

        match linked {
            Ok(()) => {
                if let Err(err) = self.ctx.fs.sync_dir(dir) {
                    debug!(dir = %dir.display(), error = %err, "directory sync failed");
                }
                Ok(Publish::Won(candidate))
            }
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => Ok(Publish::Lost),
            Err(err) => Err(IdentityError::storage(path, err)),
        }
    }

    /// Moves malformed contents out of the way of the next publish.
    ///
    /// If the moved file turns out to hold a valid peer name, a concurrent
    /// healer published it after our read. It is linked back and returned.
    /// Should the final name have been taken again in the meantime, the
    /// value now stored there is returned instead, so this call never
    /// publishes over it.
    fn quarantine(&self, location: &StorageLocation) -> Result<Option<PeerName>> {
        let path = location.path();
        let quarantined = location.quarantine_path(&self.nonce()?);

        match self.ctx.fs.rename(&path, &quarantined) {
            Ok(()) => {}
            // Another caller moved it first.
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(IdentityError::storage(path, err)),
        }

        let contents = self
            .ctx
            .fs
            .read(&quarantined)
            .map_err(|err| IdentityError::storage(&quarantined, err))?;
        let Some(peer_name) = PeerName::parse_persisted(&contents) else {
            self.remove_quietly(&quarantined);
            return Ok(None);
        };

        let linked = self.ctx.fs.hard_link(&quarantined, &path);
        self.remove_quietly(&quarantined);
        match linked {
            Ok(()) => {
                debug!(path = %path.display(), %peer_name, "restored concurrent publish");
                Ok(Some(peer_name))
            }
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                warn!(
                    path = %path.display(),
                    %peer_name,
                    "concurrent publish lost while healing; adopting current value"
                );
                match self.lookup(&path)? {
                    Lookup::Found(current) => Ok(Some(current)),
                    Lookup::Absent | Lookup::Invalid => Ok(None),
                }
            }
            Err(err) => Err(IdentityError::storage(path, err)),
        }
    }

    fn generate(&self) -> Result<PeerName> {
        let mut bytes = [0u8; PEER_NAME_BYTES];
        self.ctx.entropy.fill(&mut bytes).map_err(IdentityError::RandomnessUnavailable)?;
        Ok(PeerName::from_bytes(bytes))
    }

    /// Unique tag for transient file names.
    fn nonce(&self) -> Result<String> {
        let mut bytes = [0u8; NONCE_BYTES];
        self.ctx.entropy.fill(&mut bytes).map_err(IdentityError::RandomnessUnavailable)?;
        let mut nonce = std::process::id().to_string();
        nonce.push('-');
        for byte in bytes {
            nonce.push_str(&format!("{byte:02x}"));
        }
        Ok(nonce)
    }

    fn remove_quietly(&self, path: &Path) {
        if let Err(err) = self.ctx.fs.remove_file(path) {
            warn!(path = %path.display(), error = %err, "failed to remove transient file");
        }
    }
}

/// Returns the peer name for `(prefix, root)` using the live filesystem and
/// default configuration.
///
/// # Errors
///
/// See [`IdentityStore::get_or_create`].
pub fn get_or_create(prefix: &str, root: &str) -> Result<PeerName> {
    let ctx = ServiceContext::live();
    IdentityStore::new(&ctx, IdentityConfig::default())
        .get_or_create(prefix, root)
        .map(|resolved| resolved.peer_name)
}
