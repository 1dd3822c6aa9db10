pub mod fernet_backend;
