pub mod cipher;
pub mod secret_source;
