//! Path management for credsync
//!
//! Every relative path (credential files, envelope, settings, index output)
//! is resolved against one working directory.
//!
//! ## Working Directory Resolution Order
//!
//! 1. `--dir` on the command line, or the `CREDSYNC_DIR` environment variable
//! 2. The process's current directory

use std::path::{Path, PathBuf};

use crate::error::CredsyncError;

use super::settings::Settings;

/// Name of the optional settings file in the working directory
pub const SETTINGS_FILE_NAME: &str = ".credsync.json";

/// Resolves all paths used by credsync
#[derive(Debug, Clone)]
pub struct WorkspacePaths {
    base_dir: PathBuf,
}

impl WorkspacePaths {
    /// Create a new WorkspacePaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no directory was given and the current directory
    /// cannot be determined.
    pub fn new(dir: Option<PathBuf>) -> Result<Self, CredsyncError> {
        let base_dir = match dir {
            Some(dir) => dir,
            None => std::env::current_dir().map_err(|e| {
                CredsyncError::Config(format!("Could not determine current directory: {}", e))
            })?,
        };

        Ok(Self { base_dir })
    }

    /// Create WorkspacePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join(SETTINGS_FILE_NAME)
    }

    /// Resolve a path against the working directory; absolute paths pass through
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.base_dir.join(path)
    }

    /// Get the path to the envelope file named in settings
    pub fn envelope_file(&self, settings: &Settings) -> PathBuf {
        self.resolve(&settings.envelope_file)
    }

    /// Get the default path of the index report
    pub fn index_output(&self, settings: &Settings) -> PathBuf {
        self.resolve(&settings.index.output)
    }
}
