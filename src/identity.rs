//! Peer name value type.
//!
//! A peer name is six bytes rendered as colon-separated hex pairs, the same
//! shape as a hardware address (`02:aa:bb:cc:dd:ee`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of raw bytes in a peer name.
pub const PEER_NAME_BYTES: usize = 6;

/// Length of the canonical text form: two hex digits per byte plus separators.
pub const PEER_NAME_TEXT_LEN: usize = PEER_NAME_BYTES * 3 - 1;

/// A unique, persisted identifier naming one peer within its identity domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PeerName([u8; PEER_NAME_BYTES]);

impl PeerName {
    /// Builds a peer name from raw bytes.
    ///
    /// All 48 bits are kept as given; callers pass bytes straight from an
    /// entropy source.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; PEER_NAME_BYTES]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; PEER_NAME_BYTES] {
        &self.0
    }

    /// Parses persisted file contents.
    ///
    /// Returns `None` for anything that is not exactly one well-formed peer
    /// name, optionally surrounded by ASCII whitespace. Non-UTF-8 input is
    /// malformed, not an error.
    #[must_use]
    pub fn parse_persisted(contents: &[u8]) -> Option<Self> {
        let text = std::str::from_utf8(contents).ok()?;
        text.trim_ascii().parse().ok()
    }
}

impl fmt::Display for PeerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

/// Reason a string failed to parse as a [`PeerName`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed peer name {input:?}: expected six colon-separated hex pairs")]
pub struct ParsePeerNameError {
    input: String,
}

impl FromStr for PeerName {
    type Err = ParsePeerNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ParsePeerNameError { input: s.to_string() };
        if s.len() != PEER_NAME_TEXT_LEN {
            return Err(malformed());
        }

        let mut bytes = [0u8; PEER_NAME_BYTES];
        let mut groups = s.split(':');
        for byte in &mut bytes {
            let group = groups.next().ok_or_else(malformed)?;
            if group.len() != 2 || !group.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(malformed());
            }
            *byte = u8::from_str_radix(group, 16).map_err(|_| malformed())?;
        }
        if groups.next().is_some() {
            return Err(malformed());
        }
        Ok(Self(bytes))
    }
}

impl From<PeerName> for String {
    fn from(name: PeerName) -> Self {
        name.to_string()
    }
}

impl TryFrom<String> for PeerName {
    type Error = ParsePeerNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
