use secrecy::{ExposeSecret, SecretString};

use crate::core::errors::{Result, VaultError};
use crate::core::models::symmetric_key::SymmetricKey;
use crate::core::traits::secret_source::SecretSource;

/// Default environment variable holding the key.
pub const DEFAULT_KEY_ENV: &str = "LFCGEO_KEY";

/// Reads the key from an environment variable.
pub struct EnvSecretSource {
    var: String,
}

impl EnvSecretSource {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl SecretSource for EnvSecretSource {
    fn fetch_key(&self) -> Result<SymmetricKey> {
        let value = match std::env::var(&self.var) {
            Ok(v) if !v.trim().is_empty() => SecretString::from(v),
            Ok(_) | Err(std::env::VarError::NotPresent) => {
                return Err(VaultError::MissingSecret {
                    source_name: self.describe(),
                });
            }
            Err(std::env::VarError::NotUnicode(_)) => {
                return Err(VaultError::InvalidKey {
                    reason: format!("${} is not valid unicode", self.var),
                });
            }
        };

        SymmetricKey::from_encoded(value.expose_secret().as_bytes())
    }

    fn describe(&self) -> String {
        format!("environment variable {}", self.var)
    }
}
