//! Cryptographic functions for credsync
//!
//! Provides the AES-256-GCM credential envelope and the externally supplied
//! 256-bit key it is sealed under.

pub mod envelope;
pub mod key;

pub use envelope::{decode, encode, open, seal, Envelope, NONCE_SIZE, TAG_SIZE};
pub use key::{
    load_key, EnvKeySource, KeySource, StaticKeySource, SymmetricKey, DEFAULT_KEY_ENV_VAR,
    KEY_SIZE,
};
