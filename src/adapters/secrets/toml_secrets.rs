use std::path::PathBuf;

use crate::core::errors::{Result, VaultError};
use crate::core::models::symmetric_key::SymmetricKey;
use crate::core::traits::secret_source::SecretSource;

/// Default name of the key entry inside a secrets file.
pub const DEFAULT_SECRET_NAME: &str = "key";

/// Reads the key from a TOML secrets file, e.g. `.streamlit/secrets.toml`:
///
/// ```toml
/// key = "cw_0x689RpI-jtRR7oE8h_eQsKImvJapLeSbXpwF4e4="
/// ```
pub struct TomlSecretsSource {
    path: PathBuf,
    name: String,
}

impl TomlSecretsSource {
    pub fn new(path: PathBuf, name: impl Into<String>) -> Self {
        Self {
            path,
            name: name.into(),
        }
    }
}

impl SecretSource for TomlSecretsSource {
    fn fetch_key(&self) -> Result<SymmetricKey> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => zeroize::Zeroizing::new(c),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(VaultError::MissingSecret {
                    source_name: self.describe(),
                });
            }
            Err(e) => return Err(VaultError::from_read(&self.path, e)),
        };

        // Parse errors are reported without the offending line: it may hold a secret.
        let table: toml::Table = toml::from_str(&content).map_err(|_| VaultError::InvalidConfig {
            detail: format!("{} is not valid TOML", self.path.display()),
        })?;

        match table.get(&self.name) {
            Some(toml::Value::String(value)) => SymmetricKey::from_encoded(value.as_bytes()),
            Some(_) => Err(VaultError::InvalidKey {
                reason: format!("'{}' in {} is not a string", self.name, self.path.display()),
            }),
            None => Err(VaultError::MissingSecret {
                source_name: self.describe(),
            }),
        }
    }

    fn describe(&self) -> String {
        format!("'{}' in secrets file {}", self.name, self.path.display())
    }
}
