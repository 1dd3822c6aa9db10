use crate::core::errors::Result;
use crate::core::models::symmetric_key::SymmetricKey;

/// Port for obtaining the decryption key at runtime.
///
/// Where the key lives (environment, mounted file, secrets store) is a
/// deployment concern; the core only sees this trait.
pub trait SecretSource: Send + Sync {
    /// Fetch the key. Absence is `MissingSecret`, a malformed value is `InvalidKey`.
    fn fetch_key(&self) -> Result<SymmetricKey>;

    /// Where the key is read from, for diagnostics. Never the key itself.
    fn describe(&self) -> String;
}
