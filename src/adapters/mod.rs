pub mod cipher;
pub mod secrets;
