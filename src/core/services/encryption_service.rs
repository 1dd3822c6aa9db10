use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::errors::{Result, VaultError};
use crate::core::models::symmetric_key::SymmetricKey;
use crate::core::traits::cipher::CipherBackend;

/// Extension given to encrypted siblings of a source file.
pub const ENCRYPTED_EXTENSION: &str = "enc";

/// Whole-file encryption and decryption on top of a `CipherBackend`.
///
/// Stateless: every call reads, transforms, and (for encrypt) writes once.
/// Writes go through a temporary file in the destination directory that is
/// renamed into place, so a failed write never leaves a partial token behind.
pub struct EncryptionService<C: CipherBackend> {
    pub cipher: C,
}

impl<C: CipherBackend> EncryptionService<C> {
    pub fn new(cipher: C) -> Self {
        Self { cipher }
    }

    /// `data/foo.csv` -> `data/foo.enc`. Only the final extension is replaced.
    pub fn encrypted_path(source: &Path) -> PathBuf {
        source.with_extension(ENCRYPTED_EXTENSION)
    }

    /// Destination for `source`, refusing a source that would encrypt onto itself.
    pub fn destination_for(source: &Path) -> Result<PathBuf> {
        let dest = Self::encrypted_path(source);
        if dest == source {
            return Err(VaultError::SourceAlreadyEncrypted {
                path: source.to_path_buf(),
            });
        }
        Ok(dest)
    }

    /// Encrypt `source` into its `.enc` sibling and return that path.
    ///
    /// The source file is never modified. An existing destination is replaced.
    pub fn encrypt_file(&self, source: &Path, key: &SymmetricKey) -> Result<PathBuf> {
        let dest = Self::destination_for(source)?;
        let plaintext = read_all(source)?;
        let token = self.cipher.encrypt(key, &plaintext)?;
        write_atomic(&dest, &token)?;

        tracing::info!(
            source = %source.display(),
            dest = %dest.display(),
            cipher = self.cipher.name(),
            "encrypted file"
        );
        Ok(dest)
    }

    /// Decrypt a token file and return the plaintext bytes. Writes nothing.
    pub fn decrypt_file(&self, source: &Path, key: &SymmetricKey) -> Result<Vec<u8>> {
        let token = read_all(source)?;
        let plaintext = self.cipher.decrypt(key, &token)?;

        tracing::info!(
            source = %source.display(),
            bytes = plaintext.len(),
            "decrypted file"
        );
        Ok(plaintext)
    }

    /// Decrypt a token file and write the plaintext to `dest`.
    pub fn decrypt_to_file(&self, source: &Path, key: &SymmetricKey, dest: &Path) -> Result<()> {
        let plaintext = self.decrypt_file(source, key)?;
        write_atomic(dest, &plaintext)
    }
}

fn read_all(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| VaultError::from_read(path, e))
}

/// Write `contents` to a temp file next to `dest`, then rename over `dest`.
pub(crate) fn write_atomic(dest: &Path, contents: &[u8]) -> Result<()> {
    let tmp = write_temp(dest, contents)?;
    tmp.persist(dest)
        .map_err(|e| VaultError::from_write(dest, e.error))?;
    Ok(())
}

/// Like `write_atomic`, but fails with `AlreadyExists` instead of replacing
/// `dest`. The check and the rename are a single filesystem operation.
pub(crate) fn write_atomic_new(dest: &Path, contents: &[u8]) -> Result<()> {
    let tmp = write_temp(dest, contents)?;
    tmp.persist_noclobber(dest)
        .map_err(|e| VaultError::from_write(dest, e.error))?;
    Ok(())
}

fn write_temp(dest: &Path, contents: &[u8]) -> Result<tempfile::NamedTempFile> {
    let write_failed = |source: std::io::Error| VaultError::WriteFailed {
        path: dest.to_path_buf(),
        source,
    };

    let dir = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_failed)?;
    tmp.write_all(contents).map_err(write_failed)?;
    tmp.as_file().sync_all().map_err(write_failed)?;
    Ok(tmp)
}
