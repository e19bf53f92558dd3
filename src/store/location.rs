//! Storage location derivation.
//!
//! Layout under a host root:
//!
//! ```text
//! <root>/
//!   └── .peer-identity/
//!         ├── <escaped-prefix>.id            published peer name
//!         ├── .<escaped-prefix>.id.<n>.tmp   staging file (transient)
//!         └── .<escaped-prefix>.id.<n>.corrupt  quarantined contents (transient)
//! ```

use std::path::{Path, PathBuf};

use crate::error::{IdentityError, Result};

/// Directory created under the host root to hold identity files.
pub const STATE_DIR: &str = ".peer-identity";

const FILE_SUFFIX: &str = ".id";

// Keeps the final name well below common NAME_MAX limits once the staging
// and quarantine decorations are added.
const MAX_FILE_NAME_LEN: usize = 200;

/// Deterministic path backing one identity domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageLocation {
    dir: PathBuf,
    file_name: String,
}

impl StorageLocation {
    /// Resolves the location for the domain `(prefix, root)`.
    ///
    /// Pure: touches no filesystem state.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::InvalidArgument`] if either input is empty or
    /// the prefix is too long to form a file name.
    pub fn resolve(prefix: &str, root: &str) -> Result<Self> {
        if prefix.is_empty() {
            return Err(invalid("db-prefix", "must not be empty"));
        }
        if root.is_empty() {
            return Err(invalid("host-root", "must not be empty"));
        }

        let mut file_name = escape(prefix);
        file_name.push_str(FILE_SUFFIX);
        if file_name.len() > MAX_FILE_NAME_LEN {
            return Err(invalid("db-prefix", "too long to form a file name"));
        }

        Ok(Self { dir: Path::new(root).join(STATE_DIR), file_name })
    }

    /// Directory containing the identity file.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the published identity file.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    /// Path for a staging file tagged with `nonce`.
    pub(crate) fn staging_path(&self, nonce: &str) -> PathBuf {
        self.dir.join(format!(".{}.{nonce}.tmp", self.file_name))
    }

    /// Path for quarantined contents tagged with `nonce`.
    pub(crate) fn quarantine_path(&self, nonce: &str) -> PathBuf {
        self.dir.join(format!(".{}.{nonce}.corrupt", self.file_name))
    }
}

fn invalid(argument: &'static str, reason: &str) -> IdentityError {
    IdentityError::InvalidArgument { argument, reason: reason.to_string() }
}

/// Escapes a prefix into a single safe path component.
///
/// `[A-Za-z0-9_-]` pass through and every other byte becomes `%XX`. The
/// mapping is injective and the result never contains `.` or a separator.
fn escape(prefix: &str) -> String {
    let mut out = String::with_capacity(prefix.len());
    for byte in prefix.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn same_inputs_resolve_to_same_path() {
        let a = StorageLocation::resolve("weave", "/").unwrap();
        let b = StorageLocation::resolve("weave", "/").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.path(), PathBuf::from("/.peer-identity/weave.id"));
    }

    #[test]
    fn distinct_domains_never_collide() {
        let prefixes = [
            "weave",
            "weave-net",
            "weave.net",
            "weave/net",
            "weave%2Fnet",
            "weave%2fnet",
            ".",
            "..",
        ];
        let roots = ["/", "/host", "/host/a", "/other"];

        let mut seen = HashSet::new();
        for prefix in prefixes {
            for root in roots {
                let path = StorageLocation::resolve(prefix, root).unwrap().path();
                assert!(seen.insert(path.clone()), "collision at {}", path.display());
            }
        }
    }

    #[test]
    fn prefix_becomes_a_single_component() {
        let location = StorageLocation::resolve("/weavedb/weave-net", "/host").unwrap();
        assert_eq!(location.dir(), Path::new("/host/.peer-identity"));
        let expected = PathBuf::from("/host/.peer-identity/%2Fweavedb%2Fweave-net.id");
        assert_eq!(location.path(), expected);
    }

    #[test]
    fn escaping_never_yields_dot_names() {
        assert_eq!(escape("."), "%2E");
        assert_eq!(escape(".."), "%2E%2E");
        assert_eq!(escape("naïve"), "na%C3%AFve");
    }

    #[test]
    fn empty_inputs_are_invalid() {
        let err = StorageLocation::resolve("", "/").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(err.to_string().contains("db-prefix"));

        let err = StorageLocation::resolve("weave", "").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(err.to_string().contains("host-root"));
    }

    #[test]
    fn overlong_prefix_is_invalid() {
        let prefix = "/".repeat(MAX_FILE_NAME_LEN);
        let err = StorageLocation::resolve(&prefix, "/").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn transient_files_are_hidden_siblings() {
        let location = StorageLocation::resolve("weave", "/r").unwrap();
        assert_eq!(location.staging_path("7"), PathBuf::from("/r/.peer-identity/.weave.id.7.tmp"));
        assert_eq!(
            location.quarantine_path("7"),
            PathBuf::from("/r/.peer-identity/.weave.id.7.corrupt")
        );
    }
}
