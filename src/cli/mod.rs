//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the library layer.

pub mod decrypt;
pub mod encrypt;
pub mod index;

pub use decrypt::{handle_decrypt_command, handle_verify_command, DecryptArgs};
pub use encrypt::{handle_encrypt_command, EncryptArgs};
pub use index::{handle_index_command, IndexArgs};
