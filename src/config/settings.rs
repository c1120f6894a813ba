//! User settings for credsync
//!
//! Settings live in an optional `.credsync.json` in the working directory.
//! Every field has a default, so a missing file or a partial file is fine.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::paths::WorkspacePaths;
use crate::credentials::{AllowList, DEFAULT_ALLOWED_NAMES};
use crate::crypto::{EnvKeySource, DEFAULT_KEY_ENV_VAR};
use crate::error::CredsyncError;
use crate::index::{IndexOptions, DEFAULT_INCLUDE_HIDDEN, DEFAULT_MAX_DEPTH, DEFAULT_SKIP_NAMES};
use crate::storage::read_json;

/// A file the gatherer bundles into the envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialSource {
    /// Name relative to the working directory
    pub name: String,
    /// Whether a missing file deserves a warning
    #[serde(default)]
    pub required: bool,
}

impl CredentialSource {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
        }
    }

    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
        }
    }
}

/// Directory indexer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexSettings {
    /// Names never listed or counted
    #[serde(default = "default_skip_names")]
    pub skip_names: Vec<String>,

    /// Dot-names that are listed anyway
    #[serde(default = "default_include_hidden")]
    pub include_hidden: Vec<String>,

    /// Deepest level recursed into (root children are level 0)
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Report path used when none is given on the command line
    #[serde(default = "default_index_output")]
    pub output: PathBuf,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            skip_names: default_skip_names(),
            include_hidden: default_include_hidden(),
            max_depth: default_max_depth(),
            output: default_index_output(),
        }
    }
}

impl IndexSettings {
    /// Indexer options for these settings
    pub fn options(&self) -> IndexOptions {
        IndexOptions {
            skip_names: self.skip_names.iter().cloned().collect(),
            include_hidden: self.include_hidden.iter().cloned().collect(),
            max_depth: self.max_depth,
        }
    }
}

/// User settings for credsync
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Environment variable holding the hex key
    #[serde(default = "default_key_env_var")]
    pub key_env_var: String,

    /// Envelope path relative to the working directory
    #[serde(default = "default_envelope_file")]
    pub envelope_file: PathBuf,

    /// Files gathered by `encrypt`, in order
    #[serde(default = "default_credentials")]
    pub credentials: Vec<CredentialSource>,

    /// Names `decrypt` may write; can only narrow the built-in allow-list
    #[serde(default = "default_allow_list")]
    pub allow_list: Vec<String>,

    /// Directory indexer settings
    #[serde(default)]
    pub index: IndexSettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_key_env_var() -> String {
    DEFAULT_KEY_ENV_VAR.to_string()
}

fn default_envelope_file() -> PathBuf {
    PathBuf::from(".credentials.enc")
}

fn default_credentials() -> Vec<CredentialSource> {
    vec![
        CredentialSource::required(".env"),
        CredentialSource::optional(".mcp.json"),
    ]
}

fn default_allow_list() -> Vec<String> {
    DEFAULT_ALLOWED_NAMES.iter().map(|n| n.to_string()).collect()
}

fn default_skip_names() -> Vec<String> {
    DEFAULT_SKIP_NAMES.iter().map(|n| n.to_string()).collect()
}

fn default_include_hidden() -> Vec<String> {
    DEFAULT_INCLUDE_HIDDEN.iter().map(|n| n.to_string()).collect()
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_index_output() -> PathBuf {
    PathBuf::from("memory").join("file_index.md")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            key_env_var: default_key_env_var(),
            envelope_file: default_envelope_file(),
            credentials: default_credentials(),
            allow_list: default_allow_list(),
            index: IndexSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from the working directory, falling back to defaults
    pub fn load_or_default(paths: &WorkspacePaths) -> Result<Self, CredsyncError> {
        let settings: Settings = read_json(paths.settings_file()).map_err(|e| {
            CredsyncError::Config(format!("Failed to load settings file: {}", e))
        })?;

        if settings.key_env_var.trim().is_empty() {
            return Err(CredsyncError::Config(
                "key_env_var must name an environment variable".into(),
            ));
        }

        Ok(settings)
    }

    /// The built-in allow-list, narrowed to the configured names
    ///
    /// The settings file is not authenticated, so it can remove names but
    /// never add them.
    pub fn allow_list(&self) -> AllowList {
        let defaults = AllowList::default();
        for name in &self.allow_list {
            if !defaults.permits(name) {
                warn!("Ignoring allow-list entry '{}': not a built-in credential file", name);
            }
        }
        defaults.narrowed_to(&self.allow_list)
    }

    /// Where the key is read from
    pub fn key_source(&self) -> EnvKeySource {
        EnvKeySource::new(&self.key_env_var)
    }
}
