//! Reads credential files from disk into a credential set

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::config::CredentialSource;
use crate::error::{CredsyncError, CredsyncResult};

use super::{AllowList, CredentialSet};

/// What the gatherer found
#[derive(Debug, Default)]
pub struct GatherReport {
    pub files: CredentialSet,
    /// Names read, with their size in bytes, in source order
    pub found: Vec<(String, usize)>,
    pub missing_required: Vec<String>,
    pub missing_optional: Vec<String>,
}

/// Collects the configured credential sources from a directory
pub struct Gatherer {
    base_dir: PathBuf,
    sources: Vec<CredentialSource>,
}

impl Gatherer {
    /// Create a gatherer; every source must be on the allow-list
    pub fn new(
        base_dir: impl Into<PathBuf>,
        sources: Vec<CredentialSource>,
        allow_list: &AllowList,
    ) -> CredsyncResult<Self> {
        if let Some(source) = sources.iter().find(|s| !allow_list.permits(&s.name)) {
            return Err(CredsyncError::Config(format!(
                "credential source '{}' is not on the allow-list",
                source.name
            )));
        }

        Ok(Self {
            base_dir: base_dir.into(),
            sources,
        })
    }

    /// Read every source that exists
    ///
    /// Missing files never abort: a missing required file is logged as a
    /// warning, a missing optional one at debug level.
    pub fn gather(&self) -> CredsyncResult<GatherReport> {
        let mut report = GatherReport::default();

        for source in &self.sources {
            let path = self.base_dir.join(&source.name);

            match fs::read_to_string(&path) {
                Ok(content) => {
                    debug!(file = %source.name, bytes = content.len(), "gathered credential file");
                    report.found.push((source.name.clone(), content.len()));
                    report.files.insert(source.name.clone(), content);
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    if source.required {
                        warn!("No {} file found", source.name);
                        report.missing_required.push(source.name.clone());
                    } else {
                        debug!(file = %source.name, "optional credential file not present");
                        report.missing_optional.push(source.name.clone());
                    }
                }
                Err(e) => {
                    return Err(CredsyncError::Io(format!(
                        "Failed to read {}: {}",
                        path.display(),
                        e
                    )))
                }
            }
        }

        Ok(report)
    }
}
