use std::path::Path;

use crate::cli::KeySourceArgs;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::traits::cipher::CipherBackend;

/// Execute the `lfcgeo-vault encrypt` command.
///
/// Encrypts `file` with the provisioned key into its `.enc` sibling.
pub fn execute(file: &Path, key_args: &KeySourceArgs) -> Result<()> {
    let config = crate::cli::context::config();
    let source = super::secret_helpers::resolve_secret_source(key_args, config);
    output::detail(&format!("Key source: {}", source.describe()));

    let key = source.fetch_key()?;
    let service = super::secret_helpers::file_cipher(config);
    let dest = service.encrypt_file(file, &key)?;

    output::success(&format!(
        "Encrypted {} with {} -> {}",
        file.display(),
        service.cipher.name(),
        dest.display()
    ));
    Ok(())
}
