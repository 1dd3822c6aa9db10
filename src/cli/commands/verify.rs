use std::path::Path;

use crate::cli::KeySourceArgs;
use crate::cli::output;
use crate::core::errors::{Result, VaultError};

/// Execute the `lfcgeo-vault verify` command.
///
/// Decrypts `encrypted` in memory and byte-compares it with `plaintext`.
pub fn execute(encrypted: &Path, plaintext: &Path, key_args: &KeySourceArgs) -> Result<()> {
    let config = crate::cli::context::config();
    let source = super::secret_helpers::resolve_secret_source(key_args, config);
    output::detail(&format!("Key source: {}", source.describe()));

    let key = source.fetch_key()?;
    let decrypted = super::secret_helpers::file_cipher(config).decrypt_file(encrypted, &key)?;
    let expected = std::fs::read(plaintext).map_err(|e| VaultError::from_read(plaintext, e))?;

    if decrypted != expected {
        return Err(VaultError::VerificationFailed {
            original: plaintext.to_path_buf(),
            decrypted: encrypted.to_path_buf(),
        });
    }

    output::success(&format!(
        "{} matches {} ({} bytes)",
        encrypted.display(),
        plaintext.display(),
        expected.len()
    ));
    Ok(())
}
