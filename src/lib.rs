//! credsync - encrypted credential bundles and directory indexes
//!
//! This library provides two independent utilities:
//!
//! - Bundling a small set of local credential files into one AES-256-GCM
//!   envelope (`nonce || ciphertext+tag`) and restoring them under an
//!   allow-list.
//! - Walking a directory tree and rendering a Markdown index of file sizes and
//!   modification times.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Working directory and settings management
//! - `error`: Custom error types
//! - `crypto`: Key parsing and the envelope codec
//! - `credentials`: Credential sets, the allow-list, gathering and restoring
//! - `storage`: Atomic file writes
//! - `index`: Directory indexer
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use credsync::credentials::CredentialSet;
//! use credsync::crypto::{decode, encode, SymmetricKey};
//!
//! let key = SymmetricKey::from_hex(&"00".repeat(32))?;
//! let files: CredentialSet = [(".env", "A=1")].into_iter().collect();
//!
//! let envelope = encode(&key, &files)?;
//! assert_eq!(decode(&key, &envelope)?, files);
//! ```

pub mod cli;
pub mod config;
pub mod credentials;
pub mod crypto;
pub mod error;
pub mod index;
pub mod storage;

pub use error::{CredsyncError, CredsyncResult};
