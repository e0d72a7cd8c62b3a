//! Codec configuration.
//!
//! Values come from defaults, from `HUFFCODE_*` environment variables, or from
//! a JSON file. Every path through a constructor validates the result.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Environment variable enabling round-trip verification.
pub const ENV_VERIFY: &str = "HUFFCODE_VERIFY";
/// Environment variable holding the maximum input length in bytes.
pub const ENV_MAX_INPUT: &str = "HUFFCODE_MAX_INPUT";

/// Settings for [`HuffmanCodec`](crate::HuffmanCodec).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Decode every freshly encoded stream and compare with the input.
    pub verify_roundtrip: bool,
    /// Reject inputs longer than this many bytes.
    pub max_input_len: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            verify_roundtrip: false,
            max_input_len: usize::MAX,
        }
    }
}

impl CodecConfig {
    /// Check that every value is in range.
    ///
    /// # Errors
    /// Returns `Error::InvalidConfig` if `max_input_len` is 0.
    pub fn validate(&self) -> Result<()> {
        if self.max_input_len == 0 {
            return Err(Error::InvalidConfig("max_input_len must be at least 1".into()));
        }
        Ok(())
    }

    /// Defaults overridden by `HUFFCODE_VERIFY` and `HUFFCODE_MAX_INPUT`.
    ///
    /// # Errors
    /// Returns `Error::InvalidConfig` if a variable is set but unparsable, or
    /// the result fails validation.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(raw) = lookup(ENV_VERIFY) {
            config.verify_roundtrip = parse_bool(&raw).ok_or_else(|| {
                Error::InvalidConfig(format!("{ENV_VERIFY}={raw:?} is not a boolean"))
            })?;
        }
        if let Some(raw) = lookup(ENV_MAX_INPUT) {
            config.max_input_len = raw
                .trim()
                .parse()
                .map_err(|e| Error::InvalidConfig(format!("{ENV_MAX_INPUT}={raw:?}: {e}")))?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file. Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns `Error::Io` if the file cannot be read, `Error::InvalidConfig`
    /// if it does not parse or fails validation.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| Error::InvalidConfig(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Write the config as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns `Error::Io` if the file cannot be written.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self)
            .map_err(|e| Error::InvalidConfig(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, serialized)?;
        Ok(())
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
