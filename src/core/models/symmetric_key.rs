use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use secrecy::SecretString;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::core::errors::{Result, VaultError};

/// Raw key length: 16 bytes signing key followed by 16 bytes encryption key.
pub const KEY_LEN: usize = 32;

/// Length of the url-safe base64 encoding of a key, padding included.
pub const ENCODED_KEY_LEN: usize = 44;

/// Secret key material for the token scheme.
///
/// Zeroized on drop. `Debug` is redacted so the key cannot leak
/// through logs or error chains.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey {
    bytes: [u8; KEY_LEN],
}

impl SymmetricKey {
    pub(crate) fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Parse the url-safe base64 form. Surrounding ASCII whitespace is
    /// ignored, everything else must decode to exactly 32 bytes.
    pub fn from_encoded(encoded: &[u8]) -> Result<Self> {
        let trimmed = encoded.trim_ascii();
        if trimmed.is_empty() {
            return Err(VaultError::InvalidKey {
                reason: "key is empty".into(),
            });
        }

        if trimmed.len() != ENCODED_KEY_LEN {
            return Err(VaultError::InvalidKey {
                reason: format!("expected {ENCODED_KEY_LEN} characters, got {}", trimmed.len()),
            });
        }

        let mut decoded = URL_SAFE
            .decode(trimmed)
            .map_err(|e| VaultError::InvalidKey {
                reason: format!("not url-safe base64 ({e})"),
            })?;

        if decoded.len() != KEY_LEN {
            let got = decoded.len();
            decoded.zeroize();
            return Err(VaultError::InvalidKey {
                reason: format!("decoded to {got} bytes"),
            });
        }

        let mut bytes = [0u8; KEY_LEN];
        bytes.copy_from_slice(&decoded);
        decoded.zeroize();
        Ok(Self { bytes })
    }

    /// The url-safe base64 form, as stored in key files and secret stores.
    pub fn to_encoded(&self) -> SecretString {
        SecretString::from(URL_SAFE.encode(self.bytes))
    }

    pub(crate) fn signing_key(&self) -> &[u8] {
        &self.bytes[..KEY_LEN / 2]
    }

    pub(crate) fn encryption_key(&self) -> &[u8] {
        &self.bytes[KEY_LEN / 2..]
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SymmetricKey([REDACTED])")
    }
}
