pub mod decrypt;
pub mod encrypt;
pub mod keygen;
pub mod prepare;
pub mod secret_helpers;
pub mod verify;
