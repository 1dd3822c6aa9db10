use crate::core::errors::{Result, VaultError};
use crate::core::models::symmetric_key::SymmetricKey;
use crate::core::traits::secret_source::SecretSource;

/// Tries each source in order and returns the first key found.
///
/// Only `MissingSecret` moves on to the next source. A source that holds a
/// malformed key stops the search: a wrong key is never papered over by
/// falling back to another one.
pub struct ChainedSecretSource {
    sources: Vec<Box<dyn SecretSource>>,
}

impl ChainedSecretSource {
    pub fn new(sources: Vec<Box<dyn SecretSource>>) -> Self {
        Self { sources }
    }
}

impl SecretSource for ChainedSecretSource {
    fn fetch_key(&self) -> Result<SymmetricKey> {
        for source in &self.sources {
            match source.fetch_key() {
                Ok(key) => {
                    tracing::debug!(source = %source.describe(), "using key");
                    return Ok(key);
                }
                Err(VaultError::MissingSecret { .. }) => {
                    tracing::debug!(source = %source.describe(), "no key, trying next source");
                }
                Err(e) => return Err(e),
            }
        }

        Err(VaultError::MissingSecret {
            source_name: self.describe(),
        })
    }

    fn describe(&self) -> String {
        self.sources
            .iter()
            .map(|s| s.describe())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
