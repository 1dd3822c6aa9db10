use crate::adapters::cipher::fernet_backend::FernetBackend;
use crate::adapters::secrets::chain::ChainedSecretSource;
use crate::adapters::secrets::env_source::EnvSecretSource;
use crate::adapters::secrets::file_key_store::FileKeyStore;
use crate::adapters::secrets::toml_secrets::TomlSecretsSource;
use crate::cli::KeySourceArgs;
use crate::config::app_config::AppConfig;
use crate::core::services::encryption_service::EncryptionService;
use crate::core::traits::secret_source::SecretSource;

/// Pick the key source for a command.
///
/// An explicit flag selects exactly one source. Without flags the configured
/// sources are tried in order: environment variable, secrets file, key file.
pub fn resolve_secret_source(args: &KeySourceArgs, config: &AppConfig) -> Box<dyn SecretSource> {
    if let Some(path) = &args.key_file {
        return Box::new(FileKeyStore::new(path.clone()));
    }
    if let Some(var) = &args.key_env {
        return Box::new(EnvSecretSource::new(var.clone()));
    }
    if let Some(path) = &args.secrets {
        return Box::new(TomlSecretsSource::new(path.clone(), config.secrets.name.clone()));
    }

    let mut sources: Vec<Box<dyn SecretSource>> =
        vec![Box::new(EnvSecretSource::new(config.secrets.env_var.clone()))];
    if let Some(path) = &config.secrets.secrets_file {
        sources.push(Box::new(TomlSecretsSource::new(
            path.clone(),
            config.secrets.name.clone(),
        )));
    }
    sources.push(Box::new(FileKeyStore::new(config.data.key_file.clone())));

    Box::new(ChainedSecretSource::new(sources))
}

/// File cipher honouring the configured token lifetime (none by default).
pub fn file_cipher(config: &AppConfig) -> EncryptionService<FernetBackend> {
    let backend = match config.max_age() {
        Some(max_age) => FernetBackend::with_max_age(max_age),
        None => FernetBackend::new(),
    };
    EncryptionService::new(backend)
}
