//! Store configuration: corrupt-state policy and the attempt bound.
//!
//! Values are layered: built-in defaults, then environment variables, then
//! command-line flags. The identity domain itself is never configured here;
//! `(prefix, root)` always travel as explicit arguments.

use std::env;
use std::str::FromStr;

use thiserror::Error;

/// Environment variable selecting the [`CorruptPolicy`].
pub const ON_CORRUPT_ENV: &str = "PEER_IDENTITY_ON_CORRUPT";

/// Environment variable overriding [`IdentityConfig::max_attempts`].
pub const MAX_ATTEMPTS_ENV: &str = "PEER_IDENTITY_MAX_ATTEMPTS";

/// Default bound on create-path attempts.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// What to do when the storage location holds malformed contents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum CorruptPolicy {
    /// Replace the malformed contents with a freshly generated peer name.
    #[default]
    Heal,
    /// Leave the file untouched and report `StorageCorrupt`.
    Fail,
}

impl FromStr for CorruptPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "heal" => Ok(Self::Heal),
            "fail" => Ok(Self::Fail),
            _ => Err(ConfigError::Invalid {
                key: ON_CORRUPT_ENV,
                value: s.to_string(),
                expected: "`heal` or `fail`",
            }),
        }
    }
}

/// Configuration errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A setting has a value that cannot be used.
    #[error("invalid value {value:?} for {key}: expected {expected}")]
    Invalid {
        /// Setting name.
        key: &'static str,
        /// Offending value.
        value: String,
        /// Description of accepted values.
        expected: &'static str,
    },
}

/// Tunables for [`crate::store::IdentityStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityConfig {
    /// Policy for malformed stored contents.
    pub on_corrupt: CorruptPolicy,
    /// Upper bound on create-path attempts before giving up with
    /// `StorageCorrupt`. Always at least 1.
    pub max_attempts: u32,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self { on_corrupt: CorruptPolicy::default(), max_attempts: DEFAULT_MAX_ATTEMPTS }
    }
}

impl IdentityConfig {
    /// Loads configuration from the process environment over the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through `lookup` over the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a looked-up value is unusable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = lookup(ON_CORRUPT_ENV) {
            config.on_corrupt = value.parse()?;
        }
        if let Some(value) = lookup(MAX_ATTEMPTS_ENV) {
            config = config.with_max_attempts(parse_attempts(&value)?)?;
        }
        Ok(config)
    }

    /// Returns a copy with `max_attempts` replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_attempts` is zero.
    pub fn with_max_attempts(self, max_attempts: u32) -> Result<Self, ConfigError> {
        if max_attempts == 0 {
            return Err(ConfigError::Invalid {
                key: MAX_ATTEMPTS_ENV,
                value: max_attempts.to_string(),
                expected: "a positive integer",
            });
        }
        Ok(Self { max_attempts, ..self })
    }

    /// Applies command-line overrides on top of this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_attempts` is zero.
    pub fn with_overrides(
        self,
        on_corrupt: Option<CorruptPolicy>,
        max_attempts: Option<u32>,
    ) -> Result<Self, ConfigError> {
        let config = Self { on_corrupt: on_corrupt.unwrap_or(self.on_corrupt), ..self };
        match max_attempts {
            Some(n) => config.with_max_attempts(n),
            None => Ok(config),
        }
    }
}

fn parse_attempts(value: &str) -> Result<u32, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key: MAX_ATTEMPTS_ENV,
        value: value.to_string(),
        expected: "a positive integer",
    })
}
