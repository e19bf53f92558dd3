//! Service context bundling all port trait objects.

use crate::adapters::live::entropy::OsEntropy;
use crate::adapters::live::filesystem::LiveFileSystem;
use crate::ports::entropy::EntropySource;
use crate::ports::filesystem::FileSystem;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. `live()` wires the
/// real adapters; tests build contexts around in-memory fakes with `new()`.
pub struct ServiceContext {
    /// Filesystem used as the coordination medium.
    pub fs: Box<dyn FileSystem>,
    /// Entropy source for new peer names and staging file names.
    pub entropy: Box<dyn EntropySource>,
}

impl ServiceContext {
    /// Creates a context from explicit adapters.
    #[must_use]
    pub fn new(fs: Box<dyn FileSystem>, entropy: Box<dyn EntropySource>) -> Self {
        Self { fs, entropy }
    }

    /// Creates a live context backed by `std::fs` and the OS entropy pool.
    #[must_use]
    pub fn live() -> Self {
        Self::new(Box::new(LiveFileSystem), Box::new(OsEntropy))
    }
}
