use rand::TryRngCore;
use rand::rngs::OsRng;
use zeroize::Zeroize;

use crate::core::errors::{Result, VaultError};
use crate::core::models::symmetric_key::{KEY_LEN, SymmetricKey};

/// Mints fresh key material from the operating system CSPRNG.
///
/// There is no passphrase path: every key comes from here.
pub struct KeyService;

impl KeyService {
    /// Generate a new uniformly random key.
    ///
    /// A failing entropy source is reported as `KeyGenerationFailed`;
    /// there is no fallback to a weaker generator.
    pub fn generate_key() -> Result<SymmetricKey> {
        let mut bytes = [0u8; KEY_LEN];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| VaultError::KeyGenerationFailed {
                reason: format!("OS random source unavailable: {e}"),
            })?;

        let key = SymmetricKey::from_bytes(bytes);
        bytes.zeroize();
        tracing::debug!("generated new symmetric key");
        Ok(key)
    }
}
