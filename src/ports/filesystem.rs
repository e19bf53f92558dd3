//! Filesystem port for the operations the identity store coordinates through.

use std::io;
use std::path::Path;

/// Provides the filesystem primitives the identity store relies on.
///
/// Results keep `std::io::Error` so callers can tell "not found" and
/// "already exists" apart from genuine failures.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read; a missing file or parent
    /// directory is reported as [`io::ErrorKind::NotFound`].
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Recursively creates a directory and its parents.
    ///
    /// # Errors
    ///
    /// Returns an error if a component cannot be created. A directory that
    /// already exists, including one created concurrently, is not an error.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Creates a new file, writes `contents` and flushes it to stable storage.
    ///
    /// # Errors
    ///
    /// Fails with [`io::ErrorKind::AlreadyExists`] if the path exists, or with
    /// any error raised while writing or syncing.
    fn write_new(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Creates `link` as a new name for the existing file `original`.
    ///
    /// This is the exclusive-create primitive: it either atomically makes a
    /// fully written file visible at `link`, or fails with
    /// [`io::ErrorKind::AlreadyExists`] and changes nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the link cannot be created.
    fn hard_link(&self, original: &Path, link: &Path) -> io::Result<()>;

    /// Atomically renames `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns an error if `from` does not exist or the rename fails.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Removes a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be removed.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Flushes directory metadata (new or renamed entries) to stable storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be opened or synced.
    fn sync_dir(&self, path: &Path) -> io::Result<()>;
}
