use std::path::{Path, PathBuf};

use secrecy::ExposeSecret;

use crate::adapters::cipher::fernet_backend::FernetBackend;
use crate::adapters::secrets::file_key_store::FileKeyStore;
use crate::cli::output;
use crate::core::errors::{Result, VaultError};
use crate::core::services::encryption_service::{EncryptionService, write_atomic};
use crate::core::services::key_service::KeyService;

/// Options for the offline preparation pass.
#[derive(Debug, Default)]
pub struct PrepareOptions<'a> {
    pub source: Option<&'a Path>,
    pub key_file: Option<&'a Path>,
    pub keep_decrypted: bool,
    pub show_key: bool,
    pub force: bool,
}

/// Execute the `lfcgeo-vault prepare` command.
///
/// Generates a key, saves it, encrypts the dataset, then decrypts the
/// result and compares it byte for byte with the source. A ciphertext that
/// does not round-trip fails the command.
pub fn execute(opts: &PrepareOptions<'_>) -> Result<()> {
    let config = crate::cli::context::config();
    let source = opts.source.unwrap_or(config.data.source.as_path());
    let key_path = opts.key_file.unwrap_or(config.data.key_file.as_path());

    // Fail before a key file is written if there is nothing to encrypt
    if !source.is_file() {
        return Err(VaultError::FileNotFound {
            path: source.to_path_buf(),
        });
    }
    EncryptionService::<FernetBackend>::destination_for(source)?;

    output::header("Preparing encrypted dataset");

    let key = KeyService::generate_key()?;
    let key_store = FileKeyStore::new(key_path.to_path_buf());
    key_store.save(&key, opts.force)?;
    output::success(&format!("Saved key to {}", key_store.path().display()));
    if opts.show_key {
        println!("{}", key.to_encoded().expose_secret());
    }

    let service = EncryptionService::new(FernetBackend::new());
    let encrypted = service.encrypt_file(source, &key)?;
    output::success(&format!("Encrypted {} -> {}", source.display(), encrypted.display()));

    let decrypted = service.decrypt_file(&encrypted, &key)?;
    let decrypted_path = decrypted_path(source);
    if opts.keep_decrypted {
        write_atomic(&decrypted_path, &decrypted)?;
        output::detail(&format!("Decrypted copy: {}", decrypted_path.display()));
    }

    let original = std::fs::read(source).map_err(|e| VaultError::from_read(source, e))?;
    if original != decrypted {
        tracing::error!(
            original_bytes = original.len(),
            decrypted_bytes = decrypted.len(),
            "round-trip mismatch"
        );
        return Err(VaultError::VerificationFailed {
            original: source.to_path_buf(),
            decrypted: if opts.keep_decrypted {
                decrypted_path
            } else {
                encrypted
            },
        });
    }
    output::success(&format!("Verified round trip ({} bytes)", original.len()));

    output::warning(&format!(
        "Copy the key into the deployment's secret store under the name 'key' \
         before starting the app. Do not commit {}.",
        key_store.path().display()
    ));
    Ok(())
}

/// `data/squad.csv` -> `data/squad.dec.csv`
pub fn decrypted_path(source: &Path) -> PathBuf {
    match source.extension() {
        Some(ext) => source.with_extension(format!("dec.{}", ext.to_string_lossy())),
        None => source.with_extension("dec"),
    }
}
