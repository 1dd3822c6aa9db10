use std::path::PathBuf;

/// All domain errors for lfcgeo-vault.
///
/// Messages never include key material. Each variant carries enough
/// context to act on the failure without a debugger.
#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    #[error(
        "File not found: {path}\n\n  \
         Check that the path is correct and the file exists."
    )]
    FileNotFound { path: PathBuf },

    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Failed to write {path}: {source}\n\n  \
         The destination was left untouched."
    )]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Decryption failed: invalid token\n\n  \
         Either the key is wrong or the encrypted file is corrupted.\n\n  \
         Solutions:\n    \
         → Check that the provisioned key matches the one used to encrypt\n    \
         → Re-run 'lfcgeo-vault prepare' to produce a fresh key and ciphertext"
    )]
    InvalidToken,

    #[error("Invalid key: {reason}\n\n  Expected 32 bytes encoded as url-safe base64 (44 characters).")]
    InvalidKey { reason: String },

    #[error("Token expired: issued {age_secs}s ago, beyond the configured max_age")]
    TokenExpired { age_secs: u64 },

    #[error(
        "No key available from {source_name}\n\n  \
         Solutions:\n    \
         → Pass --key-file <path> pointing at the key written by 'lfcgeo-vault prepare'\n    \
         → Export the key in an environment variable and pass --key-env <VAR>\n    \
         → Add `key = \"...\"` to the secrets file and pass --secrets <path>"
    )]
    MissingSecret { source_name: String },

    #[error("Key generation failed: {reason}")]
    KeyGenerationFailed { reason: String },

    #[error("Encryption failed: {reason}")]
    EncryptionFailed { reason: String },

    #[error(
        "Verification failed: {decrypted} does not match {original}\n\n  \
         The ciphertext does not round-trip and must not be published."
    )]
    VerificationFailed { original: PathBuf, decrypted: PathBuf },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error(
        "{path} already exists\n\n  \
         Pass --force to replace it. Any ciphertext protected by the old key becomes unreadable."
    )]
    AlreadyExists { path: PathBuf },

    #[error(
        "{path} is already encrypted\n\n  \
         Its .enc sibling is the file itself. Point the command at the plaintext source."
    )]
    SourceAlreadyEncrypted { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl VaultError {
    /// Read/write failures: missing file, permission denied, disk full.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound { .. }
                | Self::ReadFailed { .. }
                | Self::WriteFailed { .. }
                | Self::AlreadyExists { .. }
                | Self::SourceAlreadyEncrypted { .. }
                | Self::Io(_)
        )
    }

    /// Wrong key, malformed key, or tampered/expired ciphertext.
    pub fn is_invalid_key_or_token(&self) -> bool {
        matches!(
            self,
            Self::InvalidToken | Self::InvalidKey { .. } | Self::TokenExpired { .. }
        )
    }

    /// Map an error from reading `path` to the IO class of the taxonomy.
    pub fn from_read(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::ReadFailed {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// Map an error from writing `path`. A destination that appeared while
    /// writing without overwrite becomes `AlreadyExists`.
    pub fn from_write(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::AlreadyExists {
            Self::AlreadyExists {
                path: path.to_path_buf(),
            }
        } else {
            Self::WriteFailed {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, VaultError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_file_not_found() {
        let err = VaultError::from_read(
            std::path::Path::new("missing.csv"),
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert!(matches!(err, VaultError::FileNotFound { .. }));
        assert!(err.is_io());
    }

    #[test]
    fn permission_denied_maps_to_read_failed() {
        let err = VaultError::from_read(
            std::path::Path::new("locked.csv"),
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(err, VaultError::ReadFailed { .. }));
        assert!(err.is_io());
        assert!(!err.is_invalid_key_or_token());
    }

    #[test]
    fn refusals_to_replace_are_io_class() {
        let exists = VaultError::from_write(
            std::path::Path::new("key.key"),
            std::io::Error::from(std::io::ErrorKind::AlreadyExists),
        );
        assert!(matches!(exists, VaultError::AlreadyExists { .. }));
        assert!(exists.is_io());
        assert!(exists.to_string().contains("--force"));

        let encrypted = VaultError::SourceAlreadyEncrypted {
            path: "squad.enc".into(),
        };
        assert!(encrypted.is_io());
        assert!(!encrypted.is_invalid_key_or_token());
    }

    #[test]
    fn token_errors_are_classified() {
        assert!(VaultError::InvalidToken.is_invalid_key_or_token());
        assert!(
            VaultError::InvalidKey {
                reason: "short".into()
            }
            .is_invalid_key_or_token()
        );
        assert!(!VaultError::InvalidToken.is_io());
        assert!(
            !VaultError::MissingSecret {
                source_name: "env".into()
            }
            .is_invalid_key_or_token()
        );
    }
}
