use std::io::Write;
use std::path::Path;

use secrecy::ExposeSecret;

use crate::adapters::secrets::file_key_store::FileKeyStore;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::services::key_service::KeyService;

/// Execute the `lfcgeo-vault keygen` command.
///
/// Writes a fresh key to `out` (or the configured key file), or prints it
/// to stdout when `to_stdout` is set so it can be piped into a secret store.
pub fn execute(out: Option<&Path>, to_stdout: bool, force: bool) -> Result<()> {
    let key = KeyService::generate_key()?;

    if to_stdout {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", key.to_encoded().expose_secret())?;
        return Ok(());
    }

    let config = crate::cli::context::config();
    let path = out.unwrap_or(config.data.key_file.as_path());
    let key_store = FileKeyStore::new(path.to_path_buf());
    key_store.save(&key, force)?;

    output::success(&format!("Saved new key to {}", key_store.path().display()));
    output::warning("Keep this file out of version control.");
    Ok(())
}
