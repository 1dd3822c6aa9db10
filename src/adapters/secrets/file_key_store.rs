use std::path::{Path, PathBuf};

use secrecy::ExposeSecret;

use crate::core::errors::{Result, VaultError};
use crate::core::models::symmetric_key::SymmetricKey;
use crate::core::services::encryption_service::{write_atomic, write_atomic_new};
use crate::core::traits::secret_source::SecretSource;

/// Key file holding the url-safe base64 key verbatim, with no framing.
///
/// Example `key.key`:
/// ```text
/// cw_0x689RpI-jtRR7oE8h_eQsKImvJapLeSbXpwF4e4=
/// ```
///
/// On Unix the file is created with mode `0600`.
#[derive(Clone)]
pub struct FileKeyStore {
    path: PathBuf,
}

impl FileKeyStore {
    /// Create a key store backed by the given file path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Return the file path this store reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist `key`. An existing key file is only replaced when `overwrite` is set,
    /// since losing it makes every ciphertext it protects unreadable.
    pub fn save(&self, key: &SymmetricKey, overwrite: bool) -> Result<()> {
        let encoded = key.to_encoded();
        let contents = encoded.expose_secret().as_bytes();
        if overwrite {
            write_atomic(&self.path, contents)?;
        } else {
            write_atomic_new(&self.path, contents)?;
        }
        tracing::info!(path = %self.path.display(), "saved key file");
        Ok(())
    }
}

impl SecretSource for FileKeyStore {
    fn fetch_key(&self) -> Result<SymmetricKey> {
        let content = match std::fs::read(&self.path) {
            Ok(bytes) => zeroize::Zeroizing::new(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(VaultError::MissingSecret {
                    source_name: self.describe(),
                });
            }
            Err(e) => return Err(VaultError::from_read(&self.path, e)),
        };

        SymmetricKey::from_encoded(&content)
    }

    fn describe(&self) -> String {
        format!("key file {}", self.path.display())
    }
}
