use std::io::Write;
use std::path::Path;

use crate::cli::KeySourceArgs;
use crate::cli::output;
use crate::core::errors::Result;

/// Execute the `lfcgeo-vault decrypt` command.
///
/// Without `out` the plaintext goes to stdout for the downstream loader;
/// nothing touches the disk in that case.
pub fn execute(file: &Path, out: Option<&Path>, key_args: &KeySourceArgs) -> Result<()> {
    let config = crate::cli::context::config();
    let source = super::secret_helpers::resolve_secret_source(key_args, config);
    output::detail(&format!("Key source: {}", source.describe()));

    let key = source.fetch_key()?;
    let service = super::secret_helpers::file_cipher(config);

    match out {
        Some(dest) => {
            service.decrypt_to_file(file, &key, dest)?;
            output::success(&format!("Decrypted {} -> {}", file.display(), dest.display()));
        }
        None => {
            let plaintext = service.decrypt_file(file, &key)?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&plaintext)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
