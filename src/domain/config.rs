use std::path::Path;

use serde::Deserialize;

use crate::domain::error::ConfigError;
use crate::engine::fingerprint::FP_BYTE_SIZE;

/// Largest accepted `fingerprint.byte_size`.
pub const MAX_BYTE_SIZE: usize = 4 * 1024 * 1024;

/// Settings loaded from a `--config` TOML file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub fingerprint: FingerprintConfig,
}

/// `[fingerprint]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FingerprintConfig {
    /// Bytes read from the file for a fingerprint.
    pub byte_size: usize,
    /// Byte offset the window starts at.
    pub offset: u64,
}

impl Default for FingerprintConfig {
    fn default() -> Self {
        Self {
            byte_size: FP_BYTE_SIZE,
            offset: 0,
        }
    }
}

impl Config {
    /// Load `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&text, &path.display().to_string())
    }

    /// Parse TOML text; `origin` names the source in errors.
    pub fn parse(text: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.fingerprint.byte_size == 0 {
            return Err(ConfigError::Invalid {
                key: "fingerprint.byte_size",
                message: "must be greater than zero".to_string(),
            });
        }
        if self.fingerprint.byte_size > MAX_BYTE_SIZE {
            return Err(ConfigError::Invalid {
                key: "fingerprint.byte_size",
                message: format!("must not exceed {MAX_BYTE_SIZE} bytes"),
            });
        }
        Ok(())
    }
}
