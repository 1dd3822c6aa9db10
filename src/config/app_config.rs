use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::adapters::secrets::env_source::DEFAULT_KEY_ENV;
use crate::adapters::secrets::toml_secrets::DEFAULT_SECRET_NAME;
use crate::core::errors::{Result, VaultError};

/// Default config file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "lfcgeo.toml";

/// Current format version supported by this build.
pub const CURRENT_FORMAT_VERSION: u32 = 1;

/// Top-level configuration read from `lfcgeo.toml`.
///
/// Every section is optional; a missing file yields the defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default = "default_format_version")]
    pub format_version: u32,
    #[serde(default)]
    pub data: DataSection,
    #[serde(default)]
    pub secrets: SecretsSection,
    #[serde(default)]
    pub cipher: CipherSection,
}

impl AppConfig {
    /// Load the configuration from `path`.
    ///
    /// An absent file is not an error unless it was asked for explicitly.
    pub fn load(path: &Path, explicit: bool) -> Result<Self> {
        if !path.exists() {
            if explicit {
                return Err(VaultError::InvalidConfig {
                    detail: format!("config file {} not found", path.display()),
                });
            }
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| VaultError::from_read(path, e))?;
        let config: Self = toml::from_str(&content).map_err(|e| VaultError::InvalidConfig {
            detail: format!("Failed to parse {}: {e}", path.display()),
        })?;

        if config.format_version > CURRENT_FORMAT_VERSION {
            return Err(VaultError::InvalidConfig {
                detail: format!(
                    "{} uses format version {}, this build supports up to {CURRENT_FORMAT_VERSION}",
                    path.display(),
                    config.format_version
                ),
            });
        }

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Token lifetime; `None` means tokens never expire.
    pub fn max_age(&self) -> Option<Duration> {
        self.cipher.max_age_secs.map(Duration::from_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            format_version: CURRENT_FORMAT_VERSION,
            data: DataSection::default(),
            secrets: SecretsSection::default(),
            cipher: CipherSection::default(),
        }
    }
}

fn default_format_version() -> u32 {
    CURRENT_FORMAT_VERSION
}

/// The `[data]` section: what the preparation pass reads and writes.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataSection {
    #[serde(default = "default_source")]
    pub source: PathBuf,
    #[serde(default = "default_key_file")]
    pub key_file: PathBuf,
}

impl Default for DataSection {
    fn default() -> Self {
        Self {
            source: default_source(),
            key_file: default_key_file(),
        }
    }
}

fn default_source() -> PathBuf {
    PathBuf::from("data/dflfc_squad_players_geo_Sep2020.csv")
}

fn default_key_file() -> PathBuf {
    PathBuf::from("key.key")
}

/// The `[secrets]` section: where the runtime key comes from.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SecretsSection {
    #[serde(default = "default_env_var")]
    pub env_var: String,
    pub secrets_file: Option<PathBuf>,
    #[serde(default = "default_secret_name")]
    pub name: String,
}

impl Default for SecretsSection {
    fn default() -> Self {
        Self {
            env_var: default_env_var(),
            secrets_file: None,
            name: default_secret_name(),
        }
    }
}

fn default_env_var() -> String {
    DEFAULT_KEY_ENV.to_string()
}

fn default_secret_name() -> String {
    DEFAULT_SECRET_NAME.to_string()
}

/// The `[cipher]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CipherSection {
    pub max_age_secs: Option<u64>,
}
