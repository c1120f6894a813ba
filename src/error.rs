//! Custom error types for credsync
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for credsync operations
#[derive(Error, Debug)]
pub enum CredsyncError {
    /// The encryption key environment variable is not set
    #[error("Encryption key not set: environment variable {var} is empty or missing")]
    MissingKey { var: String },

    /// The key is present but is not 64 hex characters
    #[error("Malformed encryption key: {0}")]
    MalformedKey(String),

    /// Tag verification failed (wrong key, corrupted or tampered envelope)
    #[error("Decryption failed: invalid key or corrupted envelope")]
    Authentication,

    /// Decrypted content is not a valid credential document
    #[error("Invalid credential document: {0}")]
    Format(String),

    /// A required input (envelope, credential files, index root) is absent
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// A decoded entry is not on the allow-list
    #[error("Refusing to restore '{0}': name is not on the allow-list")]
    DisallowedName(String),

    /// Cipher construction or sealing errors
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

impl CredsyncError {
    /// Check if this error only affects a single entry
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::DisallowedName(_))
    }

    /// Check if this is an authentication failure
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication)
    }

    /// Operator-facing instructions for fixing the error, if any
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::MissingKey { var } => Some(format!(
                "Obtain the 256-bit credential key (64 hex characters) from your team's \
                 secret store, then run:\n  export {}=<key>",
                var
            )),
            Self::MalformedKey(_) => {
                Some("The key must be exactly 64 hexadecimal characters (32 bytes).".into())
            }
            Self::Authentication => {
                Some("Check that the encryption key matches the one used to encrypt.".into())
            }
            _ => None,
        }
    }
}

impl From<std::io::Error> for CredsyncError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CredsyncError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for credsync operations
pub type CredsyncResult<T> = Result<T, CredsyncError>;
