use std::time::Duration;

use aes::Aes128;
use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use hmac::{Hmac, Mac};
use rand::TryRngCore;
use rand::rngs::OsRng;
use sha2::Sha256;

use crate::core::errors::{Result, VaultError};
use crate::core::models::symmetric_key::SymmetricKey;
use crate::core::traits::cipher::CipherBackend;

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;
type HmacSha256 = Hmac<Sha256>;

const VERSION: u8 = 0x80;
const TIMESTAMP_LEN: usize = 8;
const IV_LEN: usize = 16;
const BLOCK_LEN: usize = 16;
const HMAC_LEN: usize = 32;
const HEADER_LEN: usize = 1 + TIMESTAMP_LEN + IV_LEN;
const MAX_CLOCK_SKEW_SECS: i64 = 60;

/// Fernet tokens: AES-128-CBC + HMAC-SHA256, encrypt-then-MAC.
///
/// Token layout, url-safe base64 encoded with padding:
///
/// ```text
/// 0x80 | timestamp (u64 BE) | IV (16) | ciphertext (PKCS#7, n*16) | HMAC-SHA256 (32)
/// ```
///
/// The MAC covers everything before it. Tokens are interchangeable with
/// other Fernet implementations, so artifacts encrypted elsewhere decrypt here.
///
/// Decoding is strict: bad alphabet, bad padding, and non-canonical
/// trailing bits are all rejected before the MAC is checked.
pub struct FernetBackend {
    /// `None` means tokens never expire.
    max_age: Option<Duration>,
}

impl FernetBackend {
    pub fn new() -> Self {
        Self { max_age: None }
    }

    /// Reject tokens whose embedded timestamp is older than `max_age`.
    pub fn with_max_age(max_age: Duration) -> Self {
        Self {
            max_age: Some(max_age),
        }
    }

    fn encrypt_from_parts(
        key: &SymmetricKey,
        plaintext: &[u8],
        timestamp: u64,
        iv: &[u8; IV_LEN],
    ) -> Result<Vec<u8>> {
        let ciphertext = Aes128CbcEnc::new_from_slices(key.encryption_key(), iv)
            .map_err(|e| VaultError::EncryptionFailed {
                reason: format!("cipher init: {e}"),
            })?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

        let mut payload = Vec::with_capacity(HEADER_LEN + ciphertext.len() + HMAC_LEN);
        payload.push(VERSION);
        payload.extend_from_slice(&timestamp.to_be_bytes());
        payload.extend_from_slice(iv);
        payload.extend_from_slice(&ciphertext);

        let mut mac = Self::mac(key)?;
        mac.update(&payload);
        payload.extend_from_slice(&mac.finalize().into_bytes());

        Ok(URL_SAFE.encode(payload).into_bytes())
    }

    fn mac(key: &SymmetricKey) -> Result<HmacSha256> {
        <HmacSha256 as Mac>::new_from_slice(key.signing_key()).map_err(|e| VaultError::InvalidKey {
            reason: format!("signing key rejected: {e}"),
        })
    }

    fn check_age(&self, timestamp: u64) -> Result<()> {
        let Some(max_age) = self.max_age else {
            return Ok(());
        };

        let now = chrono::Utc::now().timestamp();
        let issued = i64::try_from(timestamp).map_err(|_| VaultError::InvalidToken)?;
        if issued > now.saturating_add(MAX_CLOCK_SKEW_SECS) {
            return Err(VaultError::InvalidToken);
        }

        let age_secs = u64::try_from(now.saturating_sub(issued)).unwrap_or(0);
        if age_secs > max_age.as_secs() {
            return Err(VaultError::TokenExpired { age_secs });
        }
        Ok(())
    }
}

impl Default for FernetBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CipherBackend for FernetBackend {
    fn encrypt(&self, key: &SymmetricKey, plaintext: &[u8]) -> Result<Vec<u8>> {
        let mut iv = [0u8; IV_LEN];
        OsRng
            .try_fill_bytes(&mut iv)
            .map_err(|e| VaultError::EncryptionFailed {
                reason: format!("OS random source unavailable: {e}"),
            })?;

        let timestamp = u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0);
        Self::encrypt_from_parts(key, plaintext, timestamp, &iv)
    }

    fn decrypt(&self, key: &SymmetricKey, token: &[u8]) -> Result<Vec<u8>> {
        let data = URL_SAFE
            .decode(token)
            .map_err(|_| VaultError::InvalidToken)?;

        if data.len() < HEADER_LEN + BLOCK_LEN + HMAC_LEN || data[0] != VERSION {
            return Err(VaultError::InvalidToken);
        }

        let (signed, tag) = data.split_at(data.len() - HMAC_LEN);
        let mut mac = Self::mac(key)?;
        mac.update(signed);
        mac.verify_slice(tag)
            .map_err(|_| VaultError::InvalidToken)?;

        let mut timestamp = [0u8; TIMESTAMP_LEN];
        timestamp.copy_from_slice(&signed[1..1 + TIMESTAMP_LEN]);
        self.check_age(u64::from_be_bytes(timestamp))?;

        let iv = &signed[1 + TIMESTAMP_LEN..HEADER_LEN];
        let ciphertext = &signed[HEADER_LEN..];
        if ciphertext.len() % BLOCK_LEN != 0 {
            return Err(VaultError::InvalidToken);
        }

        Aes128CbcDec::new_from_slices(key.encryption_key(), iv)
            .map_err(|_| VaultError::InvalidToken)?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| VaultError::InvalidToken)
    }

    fn name(&self) -> &str {
        "fernet"
    }
}
