use crate::core::errors::Result;
use crate::core::models::symmetric_key::SymmetricKey;

/// Port for authenticated-encryption backends.
///
/// Implementations live in `adapters::cipher` (e.g. FernetBackend).
/// The core layer only depends on this trait, never on a concrete backend.
pub trait CipherBackend: Send + Sync {
    /// Encrypt plaintext into a self-describing token.
    ///
    /// Every call must use a fresh nonce, so encrypting the same
    /// plaintext twice never yields the same token.
    fn encrypt(&self, key: &SymmetricKey, plaintext: &[u8]) -> Result<Vec<u8>>;

    /// Verify and decrypt a token. Fails closed on any tampering.
    fn decrypt(&self, key: &SymmetricKey, token: &[u8]) -> Result<Vec<u8>>;

    /// Human-readable name of this backend (e.g. "fernet").
    fn name(&self) -> &str;
}
