use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing_subscriber::filter::LevelFilter;

use crate::core::errors::{KeystoreError, Result};
use crate::core::models::options::{ManagerOptions, Pkcs12Encryption, Pkcs12Mac};

/// Top-level keywiz configuration read from `config.toml`.
///
/// Every section is optional; an absent file behaves like an empty one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingSection,
    #[serde(default)]
    pub pkcs12: Pkcs12Section,
}

impl AppConfig {
    /// Load configuration from `explicit` if given, otherwise from the
    /// per-user default location.
    ///
    /// An explicit path must exist. The default file is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let (path, required) = match explicit {
            Some(path) => (path.to_path_buf(), true),
            None => match default_path() {
                Some(path) => (path, false),
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            if required {
                return Err(KeystoreError::InvalidConfig {
                    detail: format!("{} not found", path.display()),
                });
            }
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        Self::parse(&content).map_err(|e| match e {
            KeystoreError::InvalidConfig { detail } => KeystoreError::InvalidConfig {
                detail: format!("{}: {detail}", path.display()),
            },
            other => other,
        })
    }

    /// Parse and validate a configuration document.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| KeystoreError::InvalidConfig {
            detail: format!("failed to parse config.toml: {e}"),
        })?;

        if let Some(level) = &config.logging.level {
            LevelFilter::from_str(level).map_err(|_| KeystoreError::InvalidConfig {
                detail: format!(
                    "unknown log level '{level}' (expected off, error, warn, info, debug or trace)"
                ),
            })?;
        }

        Ok(config)
    }

    pub fn to_manager_options(&self) -> ManagerOptions {
        ManagerOptions {
            pkcs12_encryption: self.pkcs12.encryption,
            pkcs12_mac: self.pkcs12.mac,
        }
    }
}

/// `<config dir>/keywiz/config.toml`, if the platform has a config dir.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("keywiz").join("config.toml"))
}

/// The `[logging]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    /// Default filter when `RUST_LOG` is unset.
    pub level: Option<String>,
}

/// The `[pkcs12]` section: algorithms used when writing PKCS#12 files.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Pkcs12Section {
    #[serde(default)]
    pub encryption: Pkcs12Encryption,
    #[serde(default)]
    pub mac: Pkcs12Mac,
}
