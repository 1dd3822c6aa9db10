pub mod chain;
pub mod env_source;
pub mod file_key_store;
pub mod toml_secrets;
