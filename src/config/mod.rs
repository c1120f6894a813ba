//! Configuration module for credsync
//!
//! This module provides configuration management including:
//! - Working directory and path resolution
//! - Optional per-directory settings file

pub mod paths;
pub mod settings;

pub use paths::WorkspacePaths;
pub use settings::{CredentialSource, IndexSettings, Settings};
